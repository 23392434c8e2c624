//! Error types for the contract-search crate.
//!
//! All errors use stable string messages suitable for display to callers
//! and programmatic handling. API keys never appear in error messages.

/// Errors that can occur while serving a search request.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid or incomplete service configuration.
    #[error("config error: {0}")]
    Config(String),

    /// An HTTP request could not be built or transported.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The search index rejected a request or returned a non-success status.
    #[error("index error: {0}")]
    Index(String),

    /// A response body could not be parsed into the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The summarization service rejected a request or returned a
    /// non-success status. Non-fatal at the orchestration level.
    #[error("summary error: {0}")]
    Summary(String),

    /// The API server failed to bind or serve.
    #[error("server error: {0}")]
    Server(String),
}

/// Convenience type alias for contract-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
