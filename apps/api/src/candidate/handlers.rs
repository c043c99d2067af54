//! Axum route handlers for the Candidate API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use super::profile::{
    build_candidate_profile, chat_with_candidate, CandidateProfile, ChatAnswer, ProfileSources,
};
use crate::errors::AppError;
use crate::routes::form::UploadForm;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    pub profile_id: String,
    pub question: String,
}

/// POST /api/v1/candidates
///
/// Multipart, every part optional: `cv_file` (PDF), `github_url`, `linkedin_url`.
pub async fn handle_build_profile(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CandidateProfile>, AppError> {
    let mut form = UploadForm::read(multipart, "cv_file").await?;
    let sources = ProfileSources {
        resume: form.document.take(),
        github_url: form.text("github_url"),
        linkedin_url: form.text("linkedin_url"),
    };

    let profile = build_candidate_profile(&state, sources).await?;
    Ok(Json(profile))
}

/// POST /api/v1/candidates/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequestBody>,
) -> Result<Json<ChatAnswer>, AppError> {
    let answer = chat_with_candidate(&state, &request.profile_id, &request.question).await?;
    Ok(Json(answer))
}
