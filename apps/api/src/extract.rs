//! Text Extractor — turns an uploaded resume file into a single string.
//!
//! PDF pages are read in order; a page that yields no extractable text
//! contributes nothing and is not an error. A document whose pages are all
//! empty extracts to the empty string.

use crate::errors::AppError;

/// Media type of an uploaded PDF file.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Extracts plain text from an uploaded file based on its declared media type.
///
/// `application/pdf` goes through the PDF extractor; anything else is
/// decoded as UTF-8 text.
pub fn extract_text(bytes: &[u8], media_type: &str) -> Result<String, AppError> {
    if media_type == PDF_MEDIA_TYPE {
        extract_pdf_text(bytes)
    } else {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| AppError::Validation("Resume file is not valid UTF-8 text".to_string()))?;
        Ok(text.to_string())
    }
}

/// Extracts text from PDF bytes, concatenating pages in order.
fn extract_pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Validation(format!("Failed to read PDF: {e}")))?;
    Ok(collapse_pages(&raw))
}

/// Joins the per-page text the extractor emits, skipping empty pages.
///
/// pdf-extract separates pages with form feeds (\x0c). Empty pages are
/// silently dropped rather than propagated as errors.
fn collapse_pages(raw: &str) -> String {
    let pages: Vec<&str> = raw
        .split('\x0c')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect();
    pages.join("\n")
}
