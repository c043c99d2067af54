//! Developer-platform profiles: a REST client plus a pure aggregation step.

pub mod aggregate;
pub mod client;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized developer profile handed to the context builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubProfile {
    pub username: String,
    pub name: String,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub total_stars_received: u64,
    pub total_forks_received: u64,
    /// Language → number of fetched repositories using it as primary language.
    pub languages: BTreeMap<String, u32>,
    /// At most five, most-starred first.
    pub top_repositories: Vec<RepositorySummary>,
    pub recent_activity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub description: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub language: Option<String>,
    pub url: String,
    pub topics: Vec<String>,
    pub updated_at: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Raw API shapes (only the fields we read)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubUser {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubRepo {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub language: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Kept as text; unparseable timestamps only drop the repo from recency stats.
    pub updated_at: Option<String>,
}
