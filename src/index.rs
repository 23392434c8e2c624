//! Remote search index collaborator.
//!
//! Two calls: the fuzzy document search (`POST …/docs/search`) and the
//! one-time index-definition inspection (`GET …/indexes/{name}`) used to
//! learn which fields are searchable and retrievable. Both authenticate
//! with an `api-key` header and run against a client with a bounded
//! timeout, so a stalled remote surfaces as a failure.

use serde_json::{json, Value};

use crate::config::ServiceConfig;
use crate::error::{Result, SearchError};
use crate::http::{self, API_KEY_HEADER};
use crate::query::QueryPlan;
use crate::schema::IndexSchema;

/// Client for the hosted document search index.
#[derive(Debug, Clone)]
pub struct IndexClient {
    client: reqwest::Client,
    search_url: String,
    definition_url: String,
    api_key: String,
    top: u32,
}

impl IndexClient {
    /// Build a client from service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let endpoint = config.search_endpoint.trim_end_matches('/');
        Ok(Self {
            client: http::build_client(config.timeout_seconds)?,
            search_url: format!(
                "{endpoint}/indexes/{}/docs/search?api-version={}",
                config.search_index, config.search_api_version
            ),
            definition_url: format!(
                "{endpoint}/indexes/{}?api-version={}",
                config.search_index, config.search_api_version
            ),
            api_key: config.search_api_key.clone(),
            top: config.top,
        })
    }

    /// Inspect the index definition and snapshot its field lists.
    ///
    /// Inspection failure is non-fatal: the service starts with the fixed
    /// default field set and logs the degradation.
    pub async fn inspect_schema(&self) -> IndexSchema {
        match self.fetch_definition().await {
            Ok(definition) => {
                let schema = IndexSchema::from_definition(&definition);
                tracing::info!(
                    searchable = schema.searchable_fields.len(),
                    retrievable = schema.retrievable_fields.len(),
                    "index schema loaded"
                );
                schema
            }
            Err(err) => {
                tracing::warn!(error = %err, "index inspection failed, using default field set");
                IndexSchema::fallback()
            }
        }
    }

    async fn fetch_definition(&self) -> Result<Value> {
        let response = self
            .client
            .get(&self.definition_url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("index definition request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Index(format!(
                "HTTP {}: {}",
                status.as_u16(),
                http::extract_error_message(&body)
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("index definition is not valid JSON: {e}")))
    }

    /// Execute one search call for the given plan.
    ///
    /// Single attempt, no retry. The full Lucene syntax is requested so the
    /// fuzzy markers in the plan are honoured, and `searchMode: "any"` lets
    /// any one term match.
    ///
    /// # Errors
    ///
    /// [`SearchError::Http`] on transport failure, [`SearchError::Index`]
    /// on a non-success status, [`SearchError::Parse`] when the body is
    /// not JSON.
    pub async fn search(&self, plan: &QueryPlan) -> Result<Value> {
        let mut body = json!({
            "search": plan.fuzzy_query,
            "queryType": "full",
            "top": self.top,
            "select": plan.select_fields.join(","),
            "searchFields": plan.search_fields.join(","),
            "searchMode": "any",
            "count": true,
            "orderby": "search.score() desc",
            "minimumCoverage": 25,
        });
        if !plan.highlight_fields.is_empty() {
            body["highlight"] = Value::String(plan.highlight_fields.join(","));
            body["highlightPreTag"] = Value::String("<mark>".to_owned());
            body["highlightPostTag"] = Value::String("</mark>".to_owned());
        }

        tracing::debug!(search = %plan.fuzzy_query, top = self.top, "issuing search request");

        let response = self
            .client
            .post(&self.search_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Index(format!(
                "HTTP {}: {}",
                status.as_u16(),
                http::extract_error_message(&body)
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("search response is not valid JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ServiceConfig {
        ServiceConfig {
            search_endpoint: "https://search.example.net/".into(),
            search_index: "contracts".into(),
            search_api_key: "key".into(),
            search_api_version: "2023-07-01-Preview".into(),
            openai_endpoint: "https://openai.example.net".into(),
            openai_deployment: "gpt-test".into(),
            openai_api_key: "key".into(),
            openai_api_version: "2024-02-15-preview".into(),
            timeout_seconds: 30,
            top: 50,
            host: "127.0.0.1".into(),
            port: 0,
        }
    }

    #[test]
    fn urls_built_from_endpoint_and_index() {
        let client = IndexClient::new(&test_config()).expect("client");
        assert_eq!(
            client.search_url,
            "https://search.example.net/indexes/contracts/docs/search?api-version=2023-07-01-Preview"
        );
        assert_eq!(
            client.definition_url,
            "https://search.example.net/indexes/contracts?api-version=2023-07-01-Preview"
        );
    }

    #[test]
    fn trailing_endpoint_slash_not_doubled() {
        let client = IndexClient::new(&test_config()).expect("client");
        assert!(!client.search_url.contains("net//"));
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IndexClient>();
    }
}
