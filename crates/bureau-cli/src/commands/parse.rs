use bureau_core::error::BureauError;
use bureau_core::extraction::pdftotext::PdftotextSource;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), BureauError> {
    let pdf_bytes = std::fs::read(&input_file)?;
    let source = PdftotextSource::new();
    let parsed = bureau_core::parse_pdf(&pdf_bytes, &source)?;

    for w in &parsed.warnings {
        eprintln!("warning [{}]: {}", w.context, w.message);
    }

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&parsed)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} facility record(s), written to {}",
                parsed.facilities.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => println!("{}", serde_json::to_string_pretty(&parsed)?),
            _ => print!("{}", output::table::format_parsed(&parsed)),
        },
    }

    Ok(())
}
