//! Service configuration, read once from the environment at startup.
//!
//! [`ServiceConfig`] carries everything the two remote collaborators and the
//! API server need: endpoints, credentials, API versions, the request
//! timeout, and bind address. Missing required variables are reported
//! together, by name, so an operator can fix the environment in one pass.

use crate::error::{Result, SearchError};

/// API version sent to the search index.
const DEFAULT_SEARCH_API_VERSION: &str = "2023-07-01-Preview";

/// API version sent to the completion service.
const DEFAULT_OPENAI_API_VERSION: &str = "2024-02-15-preview";

/// Configuration for the search bridge service.
///
/// Construct with [`ServiceConfig::from_env`] in the binary, or build the
/// struct directly in tests.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the hosted search service.
    pub search_endpoint: String,
    /// Name of the document index to query.
    pub search_index: String,
    /// API key for the search service.
    pub search_api_key: String,
    /// API version for search and index-inspection calls.
    pub search_api_version: String,
    /// Base URL of the completion service.
    pub openai_endpoint: String,
    /// Deployment (model) name used for summarization.
    pub openai_deployment: String,
    /// API key for the completion service.
    pub openai_api_key: String,
    /// API version for completion calls.
    pub openai_api_version: String,
    /// Per-request HTTP timeout in seconds for both collaborators.
    pub timeout_seconds: u64,
    /// Maximum number of hits requested from the index per query.
    pub top: u32,
    /// Host the API server binds to.
    pub host: String,
    /// Port the API server binds to.
    pub port: u16,
}

impl ServiceConfig {
    /// Read configuration from process environment variables.
    ///
    /// Required: `AZURE_AI_SEARCH_ENDPOINT`, `AZURE_AI_SEARCH_INDEX`,
    /// `AZURE_AI_SEARCH_API_KEY`, `AZURE_OPENAI_ENDPOINT`,
    /// `AZURE_OPENAI_DEPLOYMENT`, `AZURE_OPENAI_API_KEY`.
    ///
    /// Optional with defaults: `AZURE_AI_SEARCH_API_VERSION`,
    /// `AZURE_OPENAI_API_VERSION`, `SEARCH_TIMEOUT_SECONDS` (30),
    /// `SEARCH_TOP` (50), `BIND_HOST` (`0.0.0.0`), `BIND_PORT` (8000).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] naming every missing required
    /// variable, or describing the first invalid value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Separated from [`Self::from_env`] so tests can supply variables
    /// without touching process state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();
        let mut require = |name: &'static str| -> String {
            match lookup(name).filter(|v| !v.is_empty()) {
                Some(value) => value,
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let search_endpoint = require("AZURE_AI_SEARCH_ENDPOINT");
        let search_index = require("AZURE_AI_SEARCH_INDEX");
        let search_api_key = require("AZURE_AI_SEARCH_API_KEY");
        let openai_endpoint = require("AZURE_OPENAI_ENDPOINT");
        let openai_deployment = require("AZURE_OPENAI_DEPLOYMENT");
        let openai_api_key = require("AZURE_OPENAI_API_KEY");

        if !missing.is_empty() {
            return Err(SearchError::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let config = Self {
            search_endpoint,
            search_index,
            search_api_key,
            search_api_version: lookup("AZURE_AI_SEARCH_API_VERSION")
                .unwrap_or_else(|| DEFAULT_SEARCH_API_VERSION.to_owned()),
            openai_endpoint,
            openai_deployment,
            openai_api_key,
            openai_api_version: lookup("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_VERSION.to_owned()),
            timeout_seconds: parse_var(&lookup, "SEARCH_TIMEOUT_SECONDS", 30)?,
            top: parse_var(&lookup, "SEARCH_TOP", 50)?,
            host: lookup("BIND_HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse_var(&lookup, "BIND_PORT", 8000)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - both endpoints must parse as absolute URLs
    /// - `timeout_seconds` must be greater than 0
    /// - `top` must be greater than 0
    pub fn validate(&self) -> Result<()> {
        if url::Url::parse(&self.search_endpoint).is_err() {
            return Err(SearchError::Config(format!(
                "AZURE_AI_SEARCH_ENDPOINT is not a valid URL: {}",
                self.search_endpoint
            )));
        }
        if url::Url::parse(&self.openai_endpoint).is_err() {
            return Err(SearchError::Config(format!(
                "AZURE_OPENAI_ENDPOINT is not a valid URL: {}",
                self.openai_endpoint
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.top == 0 {
            return Err(SearchError::Config("top must be greater than 0".into()));
        }
        Ok(())
    }
}

/// Parse an optional numeric variable, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T> {
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| SearchError::Config(format!("{name} is not a valid number: {raw}"))),
    }
}
