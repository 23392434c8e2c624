//! # contract-search
//!
//! A query-and-result bridge between free-text user queries and a hosted
//! document search index, with a generative summarization pass over the
//! results.
//!
//! ## Design
//!
//! - Cleans raw queries into fuzzy `term~1 OR …` plans so near-identical
//!   spellings still match
//! - Normalizes loosely-schemaed hit documents into one canonical result
//!   shape, resolving filenames across inconsistent index field naming
//! - Inspects the index schema once at startup to learn searchable and
//!   retrievable fields, degrading to a fixed default set on failure
//! - Summarizes the full result set with a single completion call, attached
//!   to the first result only
//! - Remote calls are single-attempt with bounded timeouts; a malformed hit
//!   is skipped without aborting its batch
//!
//! ## Security
//!
//! - API keys live in configuration only and never appear in errors or logs
//! - Queries are logged at debug/trace level only

pub mod config;
pub mod error;
pub mod hit;
pub mod http;
pub mod index;
pub mod orchestrator;
pub mod query;
pub mod resolve;
pub mod schema;
pub mod server;
pub mod summary;
pub mod transform;

pub use config::ServiceConfig;
pub use error::{Result, SearchError};
pub use index::IndexClient;
pub use orchestrator::run_search;
pub use query::QueryPlan;
pub use schema::IndexSchema;
pub use server::AppState;
pub use summary::SummaryClient;
pub use transform::CanonicalResult;
