pub mod grid;
pub mod pdftotext;

use crate::error::BureauError;
use serde::{Deserialize, Serialize};

/// A detected table: one header row plus zero or more data rows of
/// cell strings. Cell counts per row are not guaranteed to match the
/// header; the extractors read by column index and tolerate ragged rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Content extracted from a single page of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub page_number: usize,
    pub tables: Vec<TableGrid>,
    pub text: String,
}

impl Page {
    pub fn is_blank(&self) -> bool {
        self.tables.is_empty() && self.text.trim().is_empty()
    }
}

/// Trait for document page-stream backends.
pub trait PageSource: Send + Sync {
    /// Produce the ordered page stream for a PDF byte stream.
    fn pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Page>, BureauError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
