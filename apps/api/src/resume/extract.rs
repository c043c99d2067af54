//! Resume text extraction from uploaded PDF bytes.

use bytes::Bytes;
use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::errors::AppError;

pub const MIME_PDF: &str = "application/pdf";

/// Page separator emitted by the PDF text renderer.
const PAGE_BREAK: char = '\u{000C}';

/// An uploaded document, owned by the request that carried it.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub media_type: String,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Bytes>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type
            .split(';')
            .next()
            .map(|m| m.trim().eq_ignore_ascii_case(MIME_PDF))
            .unwrap_or(false)
    }
}

/// Extracts plain text from a PDF on the blocking pool.
///
/// Fails with `AppError::Extraction` when the bytes are not a readable PDF, when the
/// PDF library panics, or when no page yields text (scanned / image-only documents).
pub async fn extract_resume_text(document: RawDocument) -> Result<String, AppError> {
    let bytes = document.bytes;
    let text = tokio::task::spawn_blocking(move || extract_pdf(&bytes))
        .await
        .map_err(join_failure)??;

    debug!("Extracted {} characters of resume text", text.chars().count());
    Ok(text)
}

/// A panic inside the PDF library is an unreadable document; any other join failure
/// is ours.
fn join_failure(error: JoinError) -> AppError {
    if error.is_panic() {
        warn!("PDF extraction panicked: {error}");
        AppError::Extraction("Invalid PDF file or could not extract text".to_string())
    } else {
        AppError::Internal(anyhow::anyhow!(
            "spawn_blocking failed in PDF extraction: {error}"
        ))
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, AppError> {
    let raw = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        warn!("PDF parsing error: {e}");
        AppError::Extraction("Invalid PDF file or could not extract text".to_string())
    })?;

    let text = join_pages(raw.split(PAGE_BREAK));
    if text.trim().is_empty() {
        warn!("PDF contains no extractable text");
        return Err(AppError::Extraction(
            "Could not extract text from PDF".to_string(),
        ));
    }
    Ok(text)
}

/// Joins non-empty page fragments, one newline after each.
pub fn join_pages<'a>(pages: impl IntoIterator<Item = &'a str>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .fold(String::new(), |mut acc, page| {
            acc.push_str(page);
            acc.push('\n');
            acc
        })
}
