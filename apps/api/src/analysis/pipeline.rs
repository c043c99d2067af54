//! Resume-vs-posting analysis, from posting text or from a posting URL.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::enrichment::schema::AnalysisResult;
use crate::errors::AppError;
use crate::job_posting::fetch::{parse_job_url, JobScraper};
use crate::job_posting::JobPosting;
use crate::resume::extract::RawDocument;
use crate::resume::read_resume;
use crate::state::AppState;

/// URL analysis output: the analysis plus the posting it was scored against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingAnalysis {
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub job_posting: JobPosting,
}

pub async fn analyze_with_text(
    state: &AppState,
    document: RawDocument,
    posting_text: &str,
) -> Result<AnalysisResult, AppError> {
    if posting_text.trim().is_empty() {
        return Err(AppError::Validation("job_posting cannot be empty".to_string()));
    }

    let resume_text = read_resume(document, &state.classifier).await?;
    state.enrichment.analyze(&resume_text, posting_text).await
}

/// Reads the resume and scrapes the posting concurrently. Either failing aborts the
/// request; a resume failure drops the in-flight scrape.
pub async fn analyze_with_url(
    state: &AppState,
    document: RawDocument,
    posting_url: &str,
) -> Result<PostingAnalysis, AppError> {
    parse_job_url(posting_url).map_err(|e| AppError::Validation(e.to_string()))?;

    let (resume_text, (job_posting, posting_text)) = tokio::try_join!(
        read_resume(document, &state.classifier),
        fetch_posting(&state.job_scraper, posting_url),
    )?;

    let analysis = state.enrichment.analyze(&resume_text, &posting_text).await?;
    Ok(PostingAnalysis {
        analysis,
        job_posting,
    })
}

/// Scrapes a primary posting. Unlike secondary sources, nothing usable is an error.
pub async fn fetch_posting(
    scraper: &JobScraper,
    posting_url: &str,
) -> Result<(JobPosting, String), AppError> {
    let posting = scraper.scrape(posting_url).await.ok_or_else(|| {
        AppError::ScrapeUnavailable(format!("Failed to scrape the provided URL: {posting_url}"))
    })?;

    let text = posting.to_prompt_text();
    if text.is_empty() {
        return Err(AppError::ScrapeEmptyResult(
            "Scraped job posting had no usable text".to_string(),
        ));
    }

    info!("Scraped job posting '{}' ({} chars)", posting.title, text.chars().count());
    Ok((posting, text))
}
