// Resume intake: PDF text extraction followed by the resume/not-resume gate.

pub mod classifier;
pub mod extract;

use tracing::info;

use crate::errors::AppError;
use crate::resume::classifier::{RejectReason, ResumeClassifier};
use crate::resume::extract::{extract_resume_text, RawDocument};

/// Extracts resume text and rejects documents the classifier does not accept.
pub async fn read_resume(
    document: RawDocument,
    classifier: &ResumeClassifier,
) -> Result<String, AppError> {
    let text = extract_resume_text(document).await?;
    accept_resume_text(text, classifier)
}

/// The classification gate on already-extracted text.
pub fn accept_resume_text(
    text: String,
    classifier: &ResumeClassifier,
) -> Result<String, AppError> {
    let verdict = classifier.classify(&text);
    if verdict.is_resume {
        return Ok(text);
    }

    let reason = verdict.reason.unwrap_or(RejectReason::NotResumeContent);
    info!("Uploaded document rejected: {reason}");
    Err(AppError::ValidationRejected(reason))
}
