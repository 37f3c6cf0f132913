pub mod analyze;
pub mod export;
pub mod fields;
pub mod parse;
