//! Candidate profile operations: build a multi-source profile, then answer questions
//! about it later by profile id.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::context::{build_chat_context, build_summary_context};
use super::fingerprint::profile_fingerprint;
use super::store::ProfileBundle;
use crate::errors::AppError;
use crate::github::GitHubProfile;
use crate::job_posting::JobPosting;
use crate::resume::extract::RawDocument;
use crate::resume::read_resume;
use crate::state::AppState;

const PREVIEW_CHARS: usize = 500;
const UNKNOWN_CANDIDATE: &str = "Unknown";

/// Everything the caller may supply. At least one source is required.
#[derive(Debug, Default)]
pub struct ProfileSources {
    pub resume: Option<RawDocument>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
}

impl ProfileSources {
    pub fn is_empty(&self) -> bool {
        self.resume.is_none() && self.github_url.is_none() && self.linkedin_url.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub profile_id: String,
    pub candidate_name: String,
    pub summary: String,
    pub github_data: Option<GitHubProfile>,
    pub linkedin_data: Option<JobPosting>,
    /// First 500 characters of the resume text, `...`-suffixed when cut.
    pub cv_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub sources: Vec<String>,
}

/// Gathers every supplied source concurrently, summarizes, stores and returns the profile.
///
/// The resume is primary: extraction or classification failure aborts the request and
/// cancels the secondary fetches. GitHub and job-page failures only leave their fields
/// empty.
pub async fn build_candidate_profile(
    state: &AppState,
    sources: ProfileSources,
) -> Result<CandidateProfile, AppError> {
    if sources.is_empty() {
        return Err(AppError::Validation(
            "At least one of CV, GitHub URL, or LinkedIn URL must be provided".to_string(),
        ));
    }

    let ProfileSources {
        resume,
        github_url,
        linkedin_url,
    } = sources;

    let resume_task = async {
        match resume {
            Some(document) => read_resume(document, &state.classifier).await,
            None => Ok(String::new()),
        }
    };
    let github_task = async {
        match github_url.as_deref() {
            Some(url) => Ok::<_, AppError>(state.github.fetch_profile(url).await),
            None => Ok(None),
        }
    };
    let linkedin_task = async {
        match linkedin_url.as_deref() {
            Some(url) => Ok::<_, AppError>(state.job_scraper.scrape(url).await),
            None => Ok(None),
        }
    };

    let (resume_text, github, linkedin) =
        tokio::try_join!(resume_task, github_task, linkedin_task)?;

    assemble_profile(
        state,
        GatheredSources {
            resume_text,
            github,
            linkedin,
            github_url,
            linkedin_url,
        },
    )
    .await
}

/// Normalized sources plus the URLs they came from (the URLs feed the fingerprint).
pub struct GatheredSources {
    pub resume_text: String,
    pub github: Option<GitHubProfile>,
    pub linkedin: Option<JobPosting>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
}

/// Summarizes gathered sources and stores the bundle under its fingerprint. The bundle
/// is only stored once the summary succeeds.
pub async fn assemble_profile(
    state: &AppState,
    gathered: GatheredSources,
) -> Result<CandidateProfile, AppError> {
    let GatheredSources {
        resume_text,
        github,
        linkedin,
        github_url,
        linkedin_url,
    } = gathered;

    let summary_context = build_summary_context(&resume_text, github.as_ref(), linkedin.as_ref());
    let summary = state.enrichment.summarize(&summary_context).await?;

    let profile_id = profile_fingerprint(
        &resume_text,
        github_url.as_deref(),
        linkedin_url.as_deref(),
    );

    let candidate_profile = CandidateProfile {
        profile_id: profile_id.clone(),
        candidate_name: candidate_name(github.as_ref(), linkedin.as_ref()),
        summary,
        github_data: github.clone(),
        linkedin_data: linkedin.clone(),
        cv_text: preview(&resume_text),
    };

    state
        .profiles
        .put(
            profile_id.clone(),
            ProfileBundle {
                resume_text,
                github,
                linkedin,
            },
        )
        .await;

    info!("Created candidate profile: {profile_id}");
    Ok(candidate_profile)
}

/// Answers an employer question from a stored profile.
pub async fn chat_with_candidate(
    state: &AppState,
    profile_id: &str,
    question: &str,
) -> Result<ChatAnswer, AppError> {
    if question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let bundle = state
        .profiles
        .get(profile_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Profile {profile_id} not found")))?;

    let context = build_chat_context(
        &bundle.resume_text,
        bundle.github.as_ref(),
        bundle.linkedin.as_ref(),
    );
    let answer = state.enrichment.chat(&context, question).await?;

    Ok(ChatAnswer {
        answer,
        sources: Vec::new(),
    })
}

fn candidate_name(github: Option<&GitHubProfile>, linkedin: Option<&JobPosting>) -> String {
    github
        .map(|g| g.name.clone())
        .filter(|name| !name.is_empty())
        .or_else(|| linkedin.map(|l| l.title.clone()).filter(|t| !t.is_empty()))
        .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string())
}

fn preview(resume_text: &str) -> Option<String> {
    if resume_text.is_empty() {
        return None;
    }
    let mut chars = resume_text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        Some(format!("{head}..."))
    } else {
        Some(head)
    }
}
