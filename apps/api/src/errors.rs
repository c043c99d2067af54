use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::resume::classifier::RejectReason;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The first six variants are the domain taxonomy: request-input problems
/// (`Extraction`, `ValidationRejected`), scrape outcomes for a primary source
/// (`ScrapeUnavailable`, `ScrapeEmptyResult`) and model failures
/// (`UpstreamUnavailable`, `UpstreamFormat`).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not extract text from document: {0}")]
    Extraction(String),

    #[error("{0}")]
    ValidationRejected(RejectReason),

    #[error("Job posting could not be fetched: {0}")]
    ScrapeUnavailable(String),

    #[error("Job posting had no usable content: {0}")]
    ScrapeEmptyResult(String),

    #[error("LLM service is not available: {0}")]
    UpstreamUnavailable(String),

    #[error("Invalid response format from LLM: {0}")]
    UpstreamFormat(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(error: LlmError) -> Self {
        match error {
            LlmError::Parse(_) | LlmError::EmptyContent => {
                AppError::UpstreamFormat(error.to_string())
            }
            LlmError::Unconfigured(_) | LlmError::Http(_) | LlmError::Api { .. } => {
                AppError::UpstreamUnavailable(error.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Extraction(msg) => {
                tracing::warn!("Extraction failed: {msg}");
                (StatusCode::BAD_REQUEST, "EXTRACTION_ERROR", self.to_string())
            }
            AppError::ValidationRejected(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NOT_A_RESUME",
                reason.to_string(),
            ),
            AppError::ScrapeUnavailable(msg) => {
                tracing::warn!("Scrape unavailable: {msg}");
                (StatusCode::BAD_GATEWAY, "SCRAPE_UNAVAILABLE", self.to_string())
            }
            AppError::ScrapeEmptyResult(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "SCRAPE_EMPTY_RESULT",
                self.to_string(),
            ),
            AppError::UpstreamUnavailable(msg) => {
                tracing::error!("LLM unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "UPSTREAM_UNAVAILABLE",
                    "The AI service is not available".to_string(),
                )
            }
            AppError::UpstreamFormat(msg) => {
                tracing::error!("LLM format error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_FORMAT_ERROR",
                    "Invalid response format from LLM".to_string(),
                )
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::Provider;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        let cases = [
            (AppError::Extraction("empty".into()), StatusCode::BAD_REQUEST),
            (
                AppError::ValidationRejected(RejectReason::NotResumeContent),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::ScrapeUnavailable("timeout".into()), StatusCode::BAD_GATEWAY),
            (
                AppError::ScrapeEmptyResult("no fields".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::UpstreamUnavailable("no key".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (AppError::UpstreamFormat("bad json".into()), StatusCode::BAD_GATEWAY),
            (AppError::NotFound("profile".into()), StatusCode::NOT_FOUND),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_model_errors_split_into_format_and_availability() {
        let malformed = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(
            AppError::from(LlmError::Parse(malformed)),
            AppError::UpstreamFormat(_)
        ));
        assert!(matches!(
            AppError::from(LlmError::EmptyContent),
            AppError::UpstreamFormat(_)
        ));
        assert!(matches!(
            AppError::from(LlmError::Unconfigured(Provider::Groq)),
            AppError::UpstreamUnavailable(_)
        ));
        assert!(matches!(
            AppError::from(LlmError::Api {
                status: 500,
                message: "boom".into()
            }),
            AppError::UpstreamUnavailable(_)
        ));
    }

    #[test]
    fn test_rejection_message_carries_reason() {
        let error = AppError::ValidationRejected(RejectReason::TooShort { min_length: 200 });
        assert!(error.to_string().contains("minimum 200 characters"));
    }
}
