//! Search API server entry point.
//!
//! Loads configuration from the environment (with `.env` support for local
//! development), inspects the index schema once, and serves the HTTP API.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use contract_search::server::{self, AppState};
use contract_search::{IndexClient, Result, ServiceConfig, SummaryClient};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;
    let index = IndexClient::new(&config)?;
    let summary = SummaryClient::new(&config)?;

    // One inspection per process; handlers read the snapshot without locking.
    let schema = index.inspect_schema().await;

    let state = Arc::new(AppState {
        schema,
        index,
        summary,
    });

    server::serve(state, &config.host, config.port).await
}
