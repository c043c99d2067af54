//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use super::pipeline::{analyze_with_text, analyze_with_url, PostingAnalysis};
use crate::enrichment::schema::{AnalysisResult, LearningResource};
use crate::enrichment::CourseQuery;
use crate::errors::AppError;
use crate::routes::form::UploadForm;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

const CV_FIELD: &str = "cv_file";

#[derive(Debug, Serialize)]
pub struct CourseRecommendationResponse {
    pub courses: Vec<LearningResource>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis
///
/// Multipart: `cv_file` (PDF) + `job_posting` (text).
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut form = UploadForm::read(multipart, CV_FIELD).await?;
    let document = form.require_document(CV_FIELD)?;
    let posting_text = form.require_text("job_posting")?;

    let result = analyze_with_text(&state, document, &posting_text).await?;
    Ok(Json(result))
}

/// POST /api/v1/analysis/linkedin
///
/// Multipart: `cv_file` (PDF) + `linkedin_url`. Scrapes the posting first; a failed or
/// empty scrape fails the request.
pub async fn handle_analyze_url(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PostingAnalysis>, AppError> {
    let mut form = UploadForm::read(multipart, CV_FIELD).await?;
    let document = form.require_document(CV_FIELD)?;
    let posting_url = form.require_text("linkedin_url")?;

    let result = analyze_with_url(&state, document, &posting_url).await?;
    Ok(Json(result))
}

/// POST /api/v1/courses/recommend
pub async fn handle_recommend_courses(
    State(state): State<AppState>,
    Json(query): Json<CourseQuery>,
) -> Result<Json<CourseRecommendationResponse>, AppError> {
    let courses = state.enrichment.recommend_courses(&query).await?;
    Ok(Json(CourseRecommendationResponse { courses }))
}
