use bureau_core::error::BureauError;
use bureau_core::parsing::fields::{self, CanonicalField};

pub fn list() -> Result<(), BureauError> {
    let max_key = CanonicalField::ALL
        .iter()
        .map(|f| f.key().len())
        .max()
        .unwrap_or(10);

    for field in CanonicalField::ALL {
        let syns = fields::synonyms_for(*field);
        println!("{:<width$}  {}", field.key(), syns.join(" | "), width = max_key);
    }
    Ok(())
}

pub fn match_one(label: &str) -> Result<(), BureauError> {
    match fields::match_label(label) {
        Some(field) => println!("{} -> {}", label, field.key()),
        None => println!("{} -> (no match)", label),
    }
    Ok(())
}
