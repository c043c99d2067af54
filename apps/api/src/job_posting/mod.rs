//! Job postings: structured records recovered from uncontrolled job-board HTML.
//!
//! `parse` turns a page into a [`JobPosting`] with ordered selector cascades
//! (`selectors`) and label/bullet regex cascades (`sections`); `fetch` owns the
//! network side (session warm-up, jitter, timeouts).

pub mod fetch;
pub mod parse;
pub mod sections;
pub mod selectors;

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub company_description: String,
    pub role_description: String,
    pub qualifications: Vec<String>,
    pub url: String,
    pub scraped_at: Option<DateTime<Utc>>,
}

impl JobPosting {
    /// Renders the posting as the plain-text job description handed to the model.
    /// Empty sections are skipped; an empty result means nothing usable was scraped.
    pub fn to_prompt_text(&self) -> String {
        let mut parts = Vec::new();

        let header: Vec<&str> = [&self.title, &self.company, &self.location]
            .into_iter()
            .map(String::as_str)
            .filter(|p| !p.is_empty())
            .collect();
        if !header.is_empty() {
            parts.push(format!("Job: {}", header.join(" | ")));
        }

        if !self.company_description.is_empty() {
            parts.push(format!("Company Description:\n{}", self.company_description));
        }
        if !self.role_description.is_empty() {
            parts.push(format!("Role Description:\n{}", self.role_description));
        }
        if !self.description.is_empty() {
            parts.push(format!("Job Description:\n{}", self.description));
        }
        if !self.qualifications.is_empty() {
            parts.push(format!(
                "Qualifications:\n- {}",
                self.qualifications.join("\n- ")
            ));
        }

        parts.join("\n\n").trim().to_string()
    }
}

/// Strips stray tags and collapses all whitespace runs to single spaces.
pub fn clean_text(text: &str) -> String {
    TAG_RE
        .replace_all(text, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
