//! Polite, stateful job-page fetching.
//!
//! Job boards block obvious bots, so a fetch looks like a browser visit: a random pause,
//! a warm-up hit on the site root to pick up session cookies, another pause, then the
//! posting itself. Every failure collapses to `None` for the caller; nothing partial is
//! ever returned.

use std::time::Duration;

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL};
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::parse::PostingParser;
use super::JobPosting;
use crate::config::ScraperConfig;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid job URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

/// Long-lived job-page scraper. The inner client keeps a cookie jar, so warm-up
/// cookies carry over to the posting request.
pub struct JobScraper {
    client: Client,
    parser: PostingParser,
    config: ScraperConfig,
}

impl JobScraper {
    pub fn new(config: ScraperConfig, parser: PostingParser) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9,tr;q=0.8"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
        headers.insert("DNT", HeaderValue::from_static("1"));
        headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));

        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            parser,
            config,
        })
    }

    /// Fetches and parses a job posting. Failures are logged, never raised.
    pub async fn scrape(&self, url: &str) -> Option<JobPosting> {
        match self.try_scrape(url).await {
            Ok(posting) => Some(posting),
            Err(e) => {
                warn!("Job scrape failed for {url}: {e}");
                None
            }
        }
    }

    async fn try_scrape(&self, url: &str) -> Result<JobPosting, ScrapeError> {
        let target = parse_job_url(url)?;
        info!("Scraping job posting: {target}");

        self.pause().await;
        self.warm_up(&target).await;
        self.pause().await;

        let page_timeout = Duration::from_secs(self.config.page_timeout_secs);
        let response = self
            .client
            .get(target.clone())
            .timeout(page_timeout)
            .send()
            .await
            .map_err(|e| classify(e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response.text().await.map_err(|e| classify(e, url))?;
        debug!("Job page loaded: {} bytes", html.len());

        let mut posting = self.parser.parse(&html);
        posting.url = url.to_string();
        posting.scraped_at = Some(Utc::now());
        Ok(posting)
    }

    /// Visits the site root to establish a session. Failure is not fatal.
    async fn warm_up(&self, target: &Url) {
        let root = site_root(target);
        let result = self
            .client
            .get(root.clone())
            .timeout(Duration::from_secs(self.config.warmup_timeout_secs))
            .send()
            .await;

        match result {
            Ok(response) => debug!("Warm-up {root} answered {}", response.status()),
            Err(e) => warn!("Warm-up request to {root} failed, continuing: {e}"),
        }
    }

    async fn pause(&self) {
        let delay = jitter(self.config.jitter_min_secs, self.config.jitter_max_secs);
        debug!("Waiting {:.1}s before next request", delay.as_secs_f64());
        tokio::time::sleep(delay).await;
    }
}

fn classify(error: reqwest::Error, url: &str) -> ScrapeError {
    if error.is_timeout() {
        ScrapeError::Timeout {
            url: url.to_string(),
        }
    } else {
        ScrapeError::Http(error)
    }
}

pub fn parse_job_url(url: &str) -> Result<Url, ScrapeError> {
    let parsed = Url::parse(url.trim()).map_err(|e| ScrapeError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ScrapeError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(parsed)
}

/// `scheme://host[:port]/` of the target.
fn site_root(target: &Url) -> Url {
    let mut root = target.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);
    root
}

/// Uniform random delay in `[min_secs, max_secs]`.
fn jitter(min_secs: f64, max_secs: f64) -> Duration {
    let span = (max_secs - min_secs).max(0.0);
    Duration::from_secs_f64(min_secs.max(0.0) + rand::random::<f64>() * span)
}
