//! Candidate context builders: bounded plain-text views over the available sources.
//!
//! Pure functions. Every limit counts characters, so truncation never splits a
//! code point.

use serde::Serialize;

use crate::github::GitHubProfile;
use crate::job_posting::JobPosting;

const NOT_PROVIDED: &str = "Not provided";

const SUMMARY_RESUME_CHARS: usize = 2000;
const SUMMARY_PROFILE_CHARS: usize = 1000;

const CHAT_RESUME_CHARS: usize = 3000;
const CHAT_PROFILE_CHARS: usize = 1000;
const CHAT_TOP_REPOSITORIES: usize = 3;

const CHAT_LEAD: &str = "You are answering questions on behalf of a job candidate. \
    Use the following information to answer accurately and professionally.\n";
const CHAT_TRAIL: &str = "\nAnswer the employer's question professionally, accurately, and concisely. \
    If you don't have information to answer, say so honestly.";

/// Longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Three labelled sections, each present with a placeholder when its source is absent.
pub fn build_summary_context(
    resume_text: &str,
    github: Option<&GitHubProfile>,
    linkedin: Option<&JobPosting>,
) -> String {
    let resume = if resume_text.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        truncate_chars(resume_text, SUMMARY_RESUME_CHARS).to_string()
    };
    let github = github.map_or_else(
        || NOT_PROVIDED.to_string(),
        |g| truncate_chars(&pretty_json(g), SUMMARY_PROFILE_CHARS).to_string(),
    );
    let linkedin = linkedin.map_or_else(
        || NOT_PROVIDED.to_string(),
        |l| truncate_chars(&pretty_json(l), SUMMARY_PROFILE_CHARS).to_string(),
    );

    format!("CV Content:\n{resume}\n\nGitHub Profile:\n{github}\n\nLinkedIn Profile:\n{linkedin}")
}

/// System context for answering questions as the candidate. Absent sources are omitted.
pub fn build_chat_context(
    resume_text: &str,
    github: Option<&GitHubProfile>,
    linkedin: Option<&JobPosting>,
) -> String {
    let mut parts = vec![CHAT_LEAD.to_string()];

    if !resume_text.is_empty() {
        parts.push(format!(
            "CV/Resume:\n{}",
            truncate_chars(resume_text, CHAT_RESUME_CHARS)
        ));
    }
    if let Some(github) = github {
        let summary = github_bullets(github);
        parts.push(format!(
            "GitHub Profile Summary:\n{}",
            truncate_chars(&summary, CHAT_PROFILE_CHARS)
        ));
    }
    if let Some(linkedin) = linkedin {
        parts.push(format!(
            "LinkedIn Profile:\n{}",
            truncate_chars(&pretty_json(linkedin), CHAT_PROFILE_CHARS)
        ));
    }

    parts.push(CHAT_TRAIL.to_string());
    parts.join("\n\n")
}

fn github_bullets(github: &GitHubProfile) -> String {
    let or_na = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".to_string());
    let languages = if github.languages.is_empty() {
        "N/A".to_string()
    } else {
        github
            .languages
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let top: Vec<_> = github
        .top_repositories
        .iter()
        .take(CHAT_TOP_REPOSITORIES)
        .collect();

    format!(
        "- Username: {}\n- Name: {}\n- Bio: {}\n- Location: {}\n- Public Repos: {}\n\
         - Followers: {}\n- Languages: {languages}\n- Top Repositories: {}\n- Recent Activity: {}",
        github.username,
        github.name,
        or_na(&github.bio),
        or_na(&github.location),
        github.public_repos,
        github.followers,
        pretty_json(&top),
        github.recent_activity,
    )
}
