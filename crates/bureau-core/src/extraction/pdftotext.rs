use crate::error::BureauError;
use crate::extraction::{grid, Page, PageSource};
use std::io::Write;
use std::process::Command;

/// Page-stream backend using pdftotext (from poppler-utils).
///
/// Runs `pdftotext -layout` so that tabular regions keep their column
/// alignment, then reconstructs table grids from the aligned text.
pub struct PdftotextSource;

impl PdftotextSource {
    pub fn new() -> Self {
        PdftotextSource
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSource for PdftotextSource {
    fn pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Page>, BureauError> {
        // Stage PDF bytes in a temp file for the external tool
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| BureauError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| BureauError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(tmpfile.path())
            .arg("-") // stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BureauError::PdftotextNotFound
                } else {
                    BureauError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(BureauError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);

        // pdftotext separates pages with form feed \x0c
        let pages: Vec<Page> = text
            .split('\x0c')
            .enumerate()
            .map(|(i, page_text)| {
                let lines: Vec<&str> = page_text.lines().collect();
                Page {
                    page_number: i + 1,
                    tables: grid::detect_grids(&lines),
                    text: page_text.to_string(),
                }
            })
            .filter(|p| !p.text.trim().is_empty() || p.page_number == 1)
            .collect();

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}
