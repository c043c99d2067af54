use std::time::Duration;

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};

use super::aggregate::aggregate;
use super::{GitHubProfile, GithubRepo, GithubUser};
use crate::config::GithubConfig;

const USER_AGENT: &str = concat!("talent-api/", env!("CARGO_PKG_VERSION"));
const PROFILE_MARKER: &str = "github.com/";

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned {status} for {path}")]
    Status { status: u16, path: String },
}

/// Read-only client for the public users/repos endpoints. No auth.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
    max_repos: u32,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            max_repos: config.max_repos,
        })
    }

    /// Fetches and aggregates a profile. `None` when the URL names no user or the user
    /// record can't be fetched; a failed repository listing only empties the stats.
    pub async fn fetch_profile(&self, profile_url: &str) -> Option<GitHubProfile> {
        let Some(username) = extract_username(profile_url) else {
            warn!("No GitHub username in URL: {profile_url}");
            return None;
        };

        let user = match self.fetch_user(&username).await {
            Ok(user) => user,
            Err(e) => {
                warn!("GitHub profile fetch failed for {username}: {e}");
                return None;
            }
        };

        let repos = self.fetch_repos(&username).await.unwrap_or_else(|e| {
            warn!("GitHub repository fetch failed for {username}: {e}");
            Vec::new()
        });

        info!("Fetched GitHub profile {username} ({} repos)", repos.len());
        Some(aggregate(&username, user, repos, Utc::now()))
    }

    async fn fetch_user(&self, username: &str) -> Result<GithubUser, GithubError> {
        let path = format!("/users/{username}");
        let response = self.client.get(format!("{}{path}", self.api_url)).send().await?;
        if !response.status().is_success() {
            return Err(GithubError::Status {
                status: response.status().as_u16(),
                path,
            });
        }
        Ok(response.json().await?)
    }

    async fn fetch_repos(&self, username: &str) -> Result<Vec<GithubRepo>, GithubError> {
        let path = format!("/users/{username}/repos");
        let per_page = self.max_repos.to_string();
        let response = self
            .client
            .get(format!("{}{path}", self.api_url))
            .query(&[
                ("sort", "updated"),
                ("per_page", per_page.as_str()),
                ("type", "owner"),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(GithubError::Status {
                status: response.status().as_u16(),
                path,
            });
        }
        Ok(response.json().await?)
    }
}

/// The path segment right after `github.com/`, ignoring trailing slash, query and fragment.
pub fn extract_username(profile_url: &str) -> Option<String> {
    let (_, rest) = profile_url.trim().split_once(PROFILE_MARKER)?;
    rest.split(['/', '?', '#'])
        .next()
        .filter(|segment| !segment.is_empty())
        .map(String::from)
}
