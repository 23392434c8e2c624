//! Generative summarization collaborator.
//!
//! One chat-completion call per search response: the original query plus
//! the concatenated result content go in, a short summary comes out. The
//! orchestrator treats every failure here as non-fatal, since results are
//! worth returning without a summary.

use serde_json::{json, Value};

use crate::config::ServiceConfig;
use crate::error::{Result, SearchError};
use crate::http::{self, API_KEY_HEADER};

/// Instruction framing every summarization call.
const SYSTEM_PROMPT: &str = "Find relevant contract language and summarize key points briefly. \
                             Focus on exact matches and similarities.";

/// Upper bound on generated summary length, in tokens.
const MAX_COMPLETION_TOKENS: u32 = 200;

const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.95;

/// Client for the hosted completion service.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    client: reqwest::Client,
    completions_url: String,
    api_key: String,
}

impl SummaryClient {
    /// Build a client from service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let endpoint = config.openai_endpoint.trim_end_matches('/');
        Ok(Self {
            client: http::build_client(config.timeout_seconds)?,
            completions_url: format!(
                "{endpoint}/openai/deployments/{}/chat/completions?api-version={}",
                config.openai_deployment, config.openai_api_version
            ),
            api_key: config.openai_api_key.clone(),
        })
    }

    /// Request one summary for `query` over the concatenated `context`.
    ///
    /// A response without completion content yields an empty string rather
    /// than an error.
    ///
    /// # Errors
    ///
    /// [`SearchError::Http`] on transport failure, [`SearchError::Summary`]
    /// on a non-success status, [`SearchError::Parse`] when the body is not
    /// JSON.
    pub async fn summarize(&self, query: &str, context: &str) -> Result<String> {
        let body = json!({
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": format!("Query: {query}\nContext: {context}")}
            ],
            "max_tokens": MAX_COMPLETION_TOKENS,
            "temperature": TEMPERATURE,
            "top_p": TOP_P,
        });

        let response = self
            .client
            .post(&self.completions_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("summarization request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Summary(format!(
                "HTTP {}: {}",
                status.as_u16(),
                http::extract_error_message(&body)
            )));
        }

        let completion: Value = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("completion response is not valid JSON: {e}")))?;

        match extract_completion_text(&completion) {
            Some(text) => Ok(text),
            None => {
                tracing::warn!("no completion content in summarization response");
                Ok(String::new())
            }
        }
    }
}

/// Pull the first choice's message content out of a completion response.
fn extract_completion_text(completion: &Value) -> Option<String> {
    completion
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|text| text.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn completion_text_extracted_and_trimmed() {
        let completion = json!({
            "choices": [{"message": {"role": "assistant", "content": "  Key points...  "}}]
        });
        assert_eq!(
            extract_completion_text(&completion),
            Some("Key points...".to_owned())
        );
    }

    #[test]
    fn missing_choices_yields_none() {
        assert_eq!(extract_completion_text(&json!({})), None);
        assert_eq!(extract_completion_text(&json!({"choices": []})), None);
    }

    #[test]
    fn null_content_yields_none() {
        let completion = json!({"choices": [{"message": {"content": null}}]});
        assert_eq!(extract_completion_text(&completion), None);
    }

    #[test]
    fn completions_url_includes_deployment_and_version() {
        let config = ServiceConfig {
            search_endpoint: "https://search.example.net".into(),
            search_index: "contracts".into(),
            search_api_key: "key".into(),
            search_api_version: "2023-07-01-Preview".into(),
            openai_endpoint: "https://openai.example.net/".into(),
            openai_deployment: "gpt-test".into(),
            openai_api_key: "key".into(),
            openai_api_version: "2024-02-15-preview".into(),
            timeout_seconds: 30,
            top: 50,
            host: "127.0.0.1".into(),
            port: 0,
        };
        let client = SummaryClient::new(&config).expect("client");
        assert_eq!(
            client.completions_url,
            "https://openai.example.net/openai/deployments/gpt-test/chat/completions?api-version=2024-02-15-preview"
        );
    }
}
