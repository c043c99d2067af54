//! Multipart form reading shared by the upload endpoints.

use std::collections::HashMap;

use axum::extract::Multipart;
use tracing::debug;

use crate::errors::AppError;
use crate::resume::extract::{RawDocument, MIME_PDF};

/// A parsed multipart body: at most one uploaded document plus the text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub document: Option<RawDocument>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Reads every part. The part named `file_field` is the document; it must be a PDF.
    /// Empty file parts are treated as absent.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == file_field {
                let media_type = media_type(field.content_type(), field.file_name());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read {name}: {e}")))?;
                if bytes.is_empty() {
                    continue;
                }

                let document = RawDocument::new(bytes, media_type);
                if !document.is_pdf() {
                    return Err(AppError::Validation(format!(
                        "Only PDF files are allowed (got {})",
                        document.media_type
                    )));
                }
                debug!("Received {} bytes in {name}", document.bytes.len());
                form.document = Some(document);
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read {name}: {e}")))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// A text field, trimmed; blank counts as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn require_text(&self, name: &str) -> Result<String, AppError> {
        self.text(name)
            .ok_or_else(|| AppError::Validation(format!("{name} is required")))
    }

    pub fn require_document(&mut self, name: &str) -> Result<RawDocument, AppError> {
        self.document
            .take()
            .ok_or_else(|| AppError::Validation(format!("{name} is required")))
    }
}

/// Declared content type, falling back to the file extension when the client sent none.
fn media_type(content_type: Option<&str>, file_name: Option<&str>) -> String {
    match content_type {
        Some(ct) if !ct.is_empty() => ct.to_string(),
        _ if file_name.is_some_and(|f| f.to_ascii_lowercase().ends_with(".pdf")) => {
            MIME_PDF.to_string()
        }
        _ => "application/octet-stream".to_string(),
    }
}
