//! Request orchestration: plan → search → transform → summarize → assemble.
//!
//! One request moves through the stages sequentially. The remote search
//! call is the only hard failure; an unrecognized response shape degrades
//! to zero results, a malformed hit is skipped with the rest of the batch
//! kept, and summarization failure leaves the results without a summary.

use serde_json::Value;

use crate::error::Result;
use crate::index::IndexClient;
use crate::query;
use crate::schema::IndexSchema;
use crate::summary::SummaryClient;
use crate::transform::{self, CanonicalResult};

/// Run one search request end to end.
///
/// The caller guarantees `query` is non-empty; punctuation-only queries
/// clean down to an empty plan and return no results without touching the
/// remote index.
///
/// The generated summary is attached to the first result only; the
/// summarization call answers the query once, not per result. Every other
/// result carries an empty summary.
///
/// # Errors
///
/// Fails only when the search call itself fails (transport, non-success
/// status, or a non-JSON body). Summarization failures are logged and
/// absorbed.
pub async fn run_search(
    query: &str,
    schema: &IndexSchema,
    index: &IndexClient,
    summary: &SummaryClient,
) -> Result<Vec<CanonicalResult>> {
    let plan = query::build_plan(query, schema);
    tracing::debug!(
        original = %plan.original_query,
        fuzzy = %plan.fuzzy_query,
        terms = plan.cleaned_terms.len(),
        "query plan built"
    );

    if plan.is_empty() {
        tracing::debug!("no tokens survived cleaning, returning no results");
        return Ok(Vec::new());
    }

    let response = index.search(&plan).await?;
    let hits = extract_hits(&response);
    tracing::debug!(count = hits.len(), "search returned hits");

    let mut results = Vec::with_capacity(hits.len());
    for (idx, raw) in hits.iter().enumerate() {
        match transform::transform_hit(raw, idx) {
            Ok(result) => results.push(result),
            Err(err) => {
                tracing::warn!(index = idx, error = %err, "skipping malformed hit");
            }
        }
    }

    if results.is_empty() {
        return Ok(results);
    }

    let context = results
        .iter()
        .map(|r| r.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let generated = match summary.summarize(query, &context).await {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(error = %err, "summarization failed, returning results without summary");
            String::new()
        }
    };

    for result in &mut results {
        result.summary.clear();
    }
    results[0].summary = generated;

    Ok(results)
}

/// Pull the ordered hit collection out of a search response.
///
/// Anything other than an object with a `value` array, including an
/// object carrying a top-level `error` member, counts as zero results.
fn extract_hits(response: &Value) -> &[Value] {
    let Some(object) = response.as_object() else {
        tracing::warn!("search response is not a JSON object, treating as no results");
        return &[];
    };
    if object.contains_key("error") {
        tracing::warn!("search response carries an error member, treating as no results");
        return &[];
    }
    match object.get("value").and_then(Value::as_array) {
        Some(hits) => hits,
        None => {
            tracing::warn!("search response has no value collection, treating as no results");
            &[]
        }
    }
}
