pub mod analysis;
pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;

use analysis::indicators::AnalysisResult;
use chrono::NaiveDate;
use error::BureauError;
use extraction::PageSource;
use model::{CreditFacility, SubjectProfile};
use parsing::{ParseWarning, ParsedDocument};
use serde::{Deserialize, Serialize};

/// Everything one document-processing run produces: the normalized
/// records plus the derived indicators. Owned by the run; nothing is
/// shared across documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportBundle {
    pub profile: SubjectProfile,
    pub facilities: Vec<CreditFacility>,
    pub analysis: AnalysisResult,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ParseWarning>,
}

/// Main API entry point: run the full pipeline over a PDF byte stream.
///
/// Extraction (table and text strategies), normalization and analysis
/// run synchronously for one document. `as_of` anchors the date-based
/// indicators so the run is deterministic.
pub fn analyze_pdf(
    pdf_bytes: &[u8],
    source: &dyn PageSource,
    as_of: NaiveDate,
) -> Result<ReportBundle, BureauError> {
    let parsed = parse_pdf(pdf_bytes, source)?;
    Ok(analyze_document(parsed, as_of))
}

/// Extract and normalize only, without deriving indicators.
pub fn parse_pdf(
    pdf_bytes: &[u8],
    source: &dyn PageSource,
) -> Result<ParsedDocument, BureauError> {
    let pages = source.pages(pdf_bytes)?;
    parsing::parse_document(&pages)
}

/// Derive indicators for an already-parsed document.
pub fn analyze_document(parsed: ParsedDocument, as_of: NaiveDate) -> ReportBundle {
    let analysis = analysis::analyze(&parsed.profile, &parsed.facilities, as_of);
    ReportBundle {
        profile: parsed.profile,
        facilities: parsed.facilities,
        analysis,
        warnings: parsed.warnings,
    }
}
