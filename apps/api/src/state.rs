use std::sync::Arc;

use crate::candidate::store::ProfileStore;
use crate::config::Config;
use crate::enrichment::EnrichmentGateway;
use crate::github::client::GithubClient;
use crate::job_posting::fetch::JobScraper;
use crate::resume::classifier::ResumeClassifier;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every client is built once in `main` and shared; nothing here is a global.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub classifier: Arc<ResumeClassifier>,
    pub enrichment: EnrichmentGateway,
    pub job_scraper: Arc<JobScraper>,
    pub github: Arc<GithubClient>,
    /// Pluggable profile store. Default: InMemoryProfileStore.
    pub profiles: Arc<dyn ProfileStore>,
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use crate::candidate::store::InMemoryProfileStore;
    use crate::config::{ClassifierConfig, GithubConfig, LlmConfig, ScraperConfig};
    use crate::job_posting::parse::PostingParser;
    use crate::llm_client::{ChatModel, Provider};

    /// Config pointing every outbound client at `upstream` with no scrape jitter.
    pub fn test_config(upstream: &str) -> Config {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            llm: LlmConfig {
                provider: Provider::Groq,
                api_key: None,
                base_url: upstream.to_string(),
                model: "test-model".to_string(),
                timeout_secs: 5,
            },
            github: GithubConfig {
                api_url: upstream.to_string(),
                max_repos: 30,
                timeout_secs: 2,
            },
            scraper: ScraperConfig {
                jitter_min_secs: 0.0,
                jitter_max_secs: 0.0,
                warmup_timeout_secs: 1,
                page_timeout_secs: 2,
            },
            classifier: ClassifierConfig::default(),
            max_upload_bytes: 1024 * 1024,
        }
    }

    pub fn test_state(model: Arc<dyn ChatModel>, upstream: &str) -> AppState {
        let config = test_config(upstream);
        AppState {
            classifier: Arc::new(ResumeClassifier::new(&config.classifier)),
            enrichment: EnrichmentGateway::new(model),
            job_scraper: Arc::new(
                JobScraper::new(config.scraper.clone(), PostingParser::default()).unwrap(),
            ),
            github: Arc::new(GithubClient::new(&config.github).unwrap()),
            profiles: Arc::new(InMemoryProfileStore::new()),
            config,
        }
    }
}
