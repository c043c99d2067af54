mod analysis;
mod candidate;
mod config;
mod enrichment;
mod errors;
mod github;
mod job_posting;
mod llm_client;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::candidate::store::InMemoryProfileStore;
use crate::config::Config;
use crate::enrichment::EnrichmentGateway;
use crate::github::client::GithubClient;
use crate::job_posting::fetch::JobScraper;
use crate::job_posting::parse::PostingParser;
use crate::job_posting::sections::MarkerVocabulary;
use crate::llm_client::HttpChatClient;
use crate::resume::classifier::ResumeClassifier;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Talent API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = HttpChatClient::new(&config.llm)?;
    if llm.is_configured() {
        info!(
            "LLM client initialized (provider: {}, model: {})",
            config.llm.provider,
            llm.model()
        );
    } else {
        warn!("GROQ_API_KEY is not set; model-backed endpoints will return 503");
    }

    // Initialize scrapers
    let parser = PostingParser::new(&MarkerVocabulary::default())?;
    let job_scraper = JobScraper::new(config.scraper.clone(), parser)?;
    let github = GithubClient::new(&config.github)?;
    info!(
        "Scrapers initialized (jitter {}-{}s, GitHub API {})",
        config.scraper.jitter_min_secs, config.scraper.jitter_max_secs, config.github.api_url
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        classifier: Arc::new(ResumeClassifier::new(&config.classifier)),
        enrichment: EnrichmentGateway::new(Arc::new(llm)),
        job_scraper: Arc::new(job_scraper),
        github: Arc::new(github),
        profiles: Arc::new(InMemoryProfileStore::new()),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
