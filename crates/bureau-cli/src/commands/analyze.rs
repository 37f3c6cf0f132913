use bureau_core::error::BureauError;
use bureau_core::extraction::pdftotext::PdftotextSource;
use bureau_core::parsing::ParsedDocument;
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    as_of: Option<NaiveDate>,
) -> Result<(), BureauError> {
    let as_of = as_of.unwrap_or_else(|| chrono::Utc::now().date_naive());

    // Pre-parsed JSON input skips extraction, like piping `parse --out`
    // back into the pipeline.
    let is_json = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let bundle = if is_json {
        let bytes = std::fs::read(&input_file)?;
        let parsed: ParsedDocument = serde_json::from_slice(&bytes)?;
        bureau_core::analyze_document(parsed, as_of)
    } else {
        let pdf_bytes = std::fs::read(&input_file)?;
        let source = PdftotextSource::new();
        bureau_core::analyze_pdf(&pdf_bytes, &source, as_of)?
    };

    for w in &bundle.warnings {
        eprintln!("warning [{}]: {}", w.context, w.message);
    }

    match output_format {
        "json" => output::json::print(&bundle)?,
        _ => print!("{}", output::table::format_bundle(&bundle)),
    }

    Ok(())
}
