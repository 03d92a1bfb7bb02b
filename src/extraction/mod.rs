//! Linear text extraction from PDF documents.
//!
//! Pages are extracted with `pdf-extract` and concatenated in page order without a separator.
//! Tables, columns and images are not reconstructed. `pdf-extract` can panic on malformed input
//! instead of returning an error, so every call runs behind `catch_unwind`.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use thiserror::Error;

/// Failure to turn a PDF into text. The display form mirrors what users see on the result page.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The file could not be read from disk.
    #[error("Error reading PDF: {0}")]
    Io(#[from] std::io::Error),
    /// The PDF library rejected the document.
    #[error("Error reading PDF: {0}")]
    Parse(String),
    /// The PDF library panicked while walking the document.
    #[error("Error reading PDF: malformed document")]
    Malformed,
}

/// Read the PDF at `path` and return its text, pages joined in order.
pub fn extract_text_from_pdf(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;
    let text = extract_text_from_bytes(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        chars = text.chars().count(),
        "Extracted PDF text"
    );
    Ok(text)
}

/// Extract text from an in-memory PDF, pages joined in order.
pub fn extract_text_from_bytes(bytes: &[u8]) -> Result<String, ExtractionError> {
    Ok(extract_pages(bytes)?.concat())
}

fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));
    match result {
        Ok(Ok(pages)) => {
            tracing::trace!(pages = pages.len(), "PDF pages extracted");
            Ok(pages)
        }
        Ok(Err(error)) => Err(ExtractionError::Parse(error.to_string())),
        Err(_) => {
            tracing::warn!("PDF extraction panicked");
            Err(ExtractionError::Malformed)
        }
    }
}
