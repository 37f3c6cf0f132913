use bureau_core::error::BureauError;
use bureau_core::export::{workbook_sheets, Sheet, SpreadsheetWriter};
use bureau_core::extraction::pdftotext::PdftotextSource;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Workbook writer emitting the three sheets as pretty JSON. An xlsx
/// writer is an external implementation of the same trait.
pub struct JsonWorkbookWriter;

impl SpreadsheetWriter for JsonWorkbookWriter {
    fn write(&self, sheets: &[Sheet]) -> Result<Vec<u8>, BureauError> {
        serde_json::to_vec_pretty(sheets).map_err(BureauError::Json)
    }

    fn format_name(&self) -> &str {
        "json"
    }
}

pub fn run(
    input_file: PathBuf,
    out: PathBuf,
    as_of: Option<NaiveDate>,
) -> Result<(), BureauError> {
    let as_of = as_of.unwrap_or_else(|| chrono::Utc::now().date_naive());

    let pdf_bytes = std::fs::read(&input_file)?;
    let source = PdftotextSource::new();
    let bundle = bureau_core::analyze_pdf(&pdf_bytes, &source, as_of)?;

    for w in &bundle.warnings {
        eprintln!("warning [{}]: {}", w.context, w.message);
    }

    let sheets = workbook_sheets(&bundle.profile, &bundle.facilities, &bundle.analysis);
    let writer = JsonWorkbookWriter;
    let bytes = writer.write(&sheets)?;
    std::fs::write(&out, bytes)?;

    eprintln!(
        "Exported {} sheet(s) as {} to {}",
        sheets.len(),
        writer.format_name(),
        out.display()
    );

    Ok(())
}
