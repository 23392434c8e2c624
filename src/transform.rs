//! Canonical result assembly from raw hits.
//!
//! Each hit becomes one [`CanonicalResult`]: highlighted content when the
//! index supplied highlights, a summary candidate from captions or a
//! truncated context excerpt, and identity fields from the resolution
//! passes. A hit that is not a JSON object is the one way this stage fails;
//! the orchestrator skips such hits and keeps the batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SearchError};
use crate::hit::RawHit;
use crate::resolve;

/// Characters of context kept in a truncated summary candidate.
const SUMMARY_PREVIEW_CHARS: usize = 200;

/// Characters of content used for a synthesized filename.
const FILENAME_PREVIEW_CHARS: usize = 50;

/// The normalized, field-complete record returned to callers.
///
/// Every string field defaults to `""` rather than being absent, and
/// `filename` is never empty: a hit with no resolvable identity gets a
/// content preview instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalResult {
    /// Document content; the first highlight fragment when available.
    pub content: String,
    /// Surrounding context supplied by the index, verbatim.
    pub context: String,
    /// Relevance score from the index, `>= 0`.
    pub relevance: f64,
    /// Caption or context excerpt; replaced by the orchestrator's
    /// response-level summary policy.
    pub summary: String,
    /// Resolved document name.
    pub filename: String,
    /// Raw `filepath` field, passthrough.
    pub filepath: String,
    /// Raw `metadata_storage_path` field, passthrough.
    pub metadata_storage_path: String,
    /// Raw `metadata_storage_name` field, passthrough.
    pub metadata_storage_name: String,
    /// Raw `url` field, passthrough.
    pub url: String,
}

/// Transform one raw hit into a canonical result.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] when the hit is not a JSON object. Any
/// other malformation degrades to defaults instead of failing.
pub fn transform_hit(raw: &Value, index: usize) -> Result<CanonicalResult> {
    let hit = RawHit::from_value(raw)
        .ok_or_else(|| SearchError::Parse(format!("hit {index} is not a JSON object")))?;

    let content = hit.str_field("content");
    let context = hit.str_field("context");
    let relevance = hit.f64_field("@search.score").unwrap_or(0.0).max(0.0);

    let highlighted_content = first_content_highlight(&hit).unwrap_or_else(|| content.clone());
    let summary = summary_candidate(&hit, &context);

    let resolved = resolve::resolve_file_fields(&hit);
    let filename = if resolved.filename.is_empty() {
        synthesize_filename(&content)
    } else {
        resolved.filename
    };

    Ok(CanonicalResult {
        content: highlighted_content,
        context,
        relevance,
        summary,
        filename,
        filepath: resolved.filepath,
        metadata_storage_path: resolved.metadata_storage_path,
        metadata_storage_name: resolved.metadata_storage_name,
        url: resolved.url,
    })
}

/// First highlight fragment for the content field, when present.
fn first_content_highlight(hit: &RawHit<'_>) -> Option<String> {
    hit.object_field("@search.highlights")?
        .get("content")?
        .as_array()?
        .first()?
        .as_str()
        .map(str::to_owned)
}

/// Caption text when the index provided captions, else a truncated context
/// excerpt, else empty.
fn summary_candidate(hit: &RawHit<'_>, context: &str) -> String {
    let caption = hit
        .array_field("@search.captions")
        .and_then(|captions| captions.first())
        .and_then(|caption| caption.get("text"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    if !caption.is_empty() {
        caption.to_owned()
    } else if !context.is_empty() {
        let excerpt: String = context.chars().take(SUMMARY_PREVIEW_CHARS).collect();
        format!("{excerpt}...")
    } else {
        String::new()
    }
}

/// Build a filename from the leading content characters.
fn synthesize_filename(content: &str) -> String {
    let preview: String = content.chars().take(FILENAME_PREVIEW_CHARS).collect();
    let truncated = content.chars().count() > FILENAME_PREVIEW_CHARS;
    let mut filename = preview.trim().to_owned();
    if truncated {
        filename.push_str("...");
    }
    filename
}
