use std::str::FromStr;

use anyhow::{Context, Result};

use crate::llm_client::Provider;

/// Resume-indicator vocabulary used by the document classifier.
pub const DEFAULT_CV_KEYWORDS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "resume",
    "cv",
    "curriculum vitae",
    "work experience",
    "professional experience",
    "qualifications",
    "summary",
    "objective",
    "profile",
    "contact",
    "email",
    "phone",
    "projects",
    "certifications",
    "languages",
    "references",
];

/// Application configuration loaded from environment variables.
/// Only the listen port and log level are process-critical; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub llm: LlmConfig,
    pub github: GithubConfig,
    pub scraper: ScraperConfig,
    pub classifier: ClassifierConfig,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: Provider,
    /// Absent key leaves the model client unconfigured; calls fail as upstream-unavailable.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub api_url: String,
    pub max_repos: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub jitter_min_secs: f64,
    pub jitter_max_secs: f64,
    pub warmup_timeout_secs: u64,
    pub page_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub keywords: Vec<String>,
    pub keyword_threshold: usize,
    pub min_length: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_CV_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            keyword_threshold: 3,
            min_length: 200,
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            jitter_min_secs: 3.0,
            jitter_max_secs: 7.0,
            warmup_timeout_secs: 15,
            page_timeout_secs: 45,
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            max_repos: 30,
            timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let provider = optional_env("LLM_PROVIDER")
            .map(|v| v.parse::<Provider>())
            .transpose()?
            .unwrap_or(Provider::Groq);

        let scraper = ScraperConfig {
            jitter_min_secs: parse_env("SCRAPE_JITTER_MIN_SECS", 3.0)?,
            jitter_max_secs: parse_env("SCRAPE_JITTER_MAX_SECS", 7.0)?,
            warmup_timeout_secs: parse_env("SCRAPE_WARMUP_TIMEOUT_SECS", 15)?,
            page_timeout_secs: parse_env("SCRAPE_PAGE_TIMEOUT_SECS", 45)?,
        };
        if scraper.jitter_min_secs < 0.0 || scraper.jitter_max_secs < scraper.jitter_min_secs {
            anyhow::bail!(
                "SCRAPE_JITTER_MIN_SECS must be >= 0 and <= SCRAPE_JITTER_MAX_SECS (got {}..{})",
                scraper.jitter_min_secs,
                scraper.jitter_max_secs
            );
        }

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            llm: LlmConfig {
                provider,
                api_key: optional_env("GROQ_API_KEY"),
                base_url: optional_env("GROQ_BASE_URL")
                    .unwrap_or_else(|| provider.default_base_url().to_string()),
                model: optional_env("GROQ_MODEL")
                    .unwrap_or_else(|| "llama-3.3-70b-versatile".to_string()),
                timeout_secs: parse_env("LLM_TIMEOUT_SECS", 60)?,
            },
            github: GithubConfig {
                api_url: optional_env("GITHUB_API_URL")
                    .unwrap_or_else(|| "https://api.github.com".to_string()),
                max_repos: parse_env("GITHUB_MAX_REPOS", 30)?,
                timeout_secs: 10,
            },
            scraper,
            classifier: ClassifierConfig {
                keyword_threshold: parse_env("CV_KEYWORD_THRESHOLD", 3)?,
                min_length: parse_env("CV_MIN_LENGTH", 200)?,
                ..ClassifierConfig::default()
            },
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

/// Returns the variable's value, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_has_nineteen_terms() {
        assert_eq!(DEFAULT_CV_KEYWORDS.len(), 19);
        assert_eq!(ClassifierConfig::default().keywords.len(), 19);
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u32 = parse_env("TALENT_API_TEST_SURELY_UNSET", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("TALENT_API_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("TALENT_API_TEST_BAD_PORT", 8080);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("TALENT_API_TEST_BAD_PORT"), "{message}");
    }

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("TALENT_API_TEST_BLANK", "   ");
        assert_eq!(optional_env("TALENT_API_TEST_BLANK"), None);
    }
}
