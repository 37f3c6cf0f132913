use bureau_core::error::BureauError;
use bureau_core::ReportBundle;

pub fn print(bundle: &ReportBundle) -> Result<(), BureauError> {
    let json = serde_json::to_string_pretty(bundle)?;
    println!("{json}");
    Ok(())
}
