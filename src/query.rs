//! Query normalization: raw user text → fuzzy query plan.
//!
//! Cleaning strips punctuation and collapses whitespace; each surviving
//! token is marked for edit-distance-1 fuzzy matching and the tokens are
//! OR-joined so any term may match. This stage never fails; malformed
//! input degrades to an empty, low-signal plan.

use crate::schema::{IndexSchema, DEFAULT_SEARCHABLE_FIELDS};

/// Fields the index supports highlighting on.
const HIGHLIGHTABLE_FIELDS: &[&str] = &["content", "title"];

/// An immutable query plan, built once per request and consumed by the
/// search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    /// The query exactly as the caller submitted it.
    pub original_query: String,
    /// Cleaned tokens in input order.
    pub cleaned_terms: Vec<String>,
    /// Fuzzy disjunction, e.g. `termination~1 OR clause~1`. Empty when no
    /// tokens survive cleaning.
    pub fuzzy_query: String,
    /// Fields the index should match against.
    pub search_fields: Vec<String>,
    /// Fields the index should return. `["*"]` means all retrievable fields.
    pub select_fields: Vec<String>,
    /// Subset of `search_fields` to request highlights for.
    pub highlight_fields: Vec<String>,
}

impl QueryPlan {
    /// True when cleaning left no tokens. The orchestrator treats an empty
    /// plan as match-nothing and skips the remote call.
    pub fn is_empty(&self) -> bool {
        self.cleaned_terms.is_empty()
    }
}

/// Build a query plan from raw user text and the index schema snapshot.
pub fn build_plan(query: &str, schema: &IndexSchema) -> QueryPlan {
    let cleaned = clean_query(query);
    let cleaned_terms: Vec<String> = cleaned.split_whitespace().map(str::to_owned).collect();

    let fuzzy_query = cleaned_terms
        .iter()
        .map(|term| format!("{term}~1"))
        .collect::<Vec<_>>()
        .join(" OR ");

    let search_fields = if schema.searchable_fields.is_empty() {
        DEFAULT_SEARCHABLE_FIELDS
            .iter()
            .map(|f| (*f).to_owned())
            .collect()
    } else {
        schema.searchable_fields.clone()
    };

    let select_fields = if schema.retrievable_fields.is_empty() {
        vec!["*".to_owned()]
    } else {
        schema.retrievable_fields.clone()
    };

    let highlight_fields = search_fields
        .iter()
        .filter(|f| HIGHLIGHTABLE_FIELDS.contains(&f.as_str()))
        .cloned()
        .collect();

    QueryPlan {
        original_query: query.to_owned(),
        cleaned_terms,
        fuzzy_query,
        search_fields,
        select_fields,
        highlight_fields,
    }
}

/// Strip every character that is not alphanumeric or whitespace, then
/// collapse runs of whitespace into single spaces.
fn clean_query(query: &str) -> String {
    let stripped: String = query
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
