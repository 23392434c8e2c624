//! Filename and path resolution from loosely-schemaed hits.
//!
//! Index configurations disagree about where a document's identity lives:
//! blob-indexer setups use `metadata_storage_name`/`metadata_storage_path`,
//! custom pipelines use `filepath` or `url`, and some only carry `title`.
//! Resolution scans a fixed preference order in three passes: a value that
//! is already a bare filename beats one that needs path-splitting, which
//! beats an arbitrary raw value.

use crate::hit::RawHit;

/// Candidate fields for filename resolution, in preference order.
const CANDIDATE_FIELDS: &[&str] = &[
    "metadata_storage_name",
    "metadata_storage_path",
    "filepath",
    "file_path",
    "path",
    "url",
    "source",
    "title",
];

/// Identity fields resolved from one hit.
///
/// `filename` comes from the three-pass scan; the remaining fields are
/// unconditional passthroughs from the hit, empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFields {
    pub filename: String,
    pub filepath: String,
    pub metadata_storage_path: String,
    pub metadata_storage_name: String,
    pub url: String,
}

/// Resolve identity fields from a raw hit.
///
/// Never fails: a hit with no usable candidate yields an empty `filename`,
/// which the result transformer replaces with a content preview.
pub fn resolve_file_fields(hit: &RawHit<'_>) -> ResolvedFields {
    ResolvedFields {
        filename: resolve_filename(hit),
        filepath: hit.str_field("filepath"),
        metadata_storage_path: hit.str_field("metadata_storage_path"),
        metadata_storage_name: hit.str_field("metadata_storage_name"),
        url: hit.str_field("url"),
    }
}

/// Three ordered passes over [`CANDIDATE_FIELDS`]; first match wins.
fn resolve_filename(hit: &RawHit<'_>) -> String {
    // Pass 1: a value with no path separators is already a filename.
    for field in CANDIDATE_FIELDS {
        let value = hit.str_field(field);
        if !value.is_empty() && !value.contains('/') && !value.contains('\\') {
            tracing::trace!(field = *field, value = %value, "clean filename candidate");
            return value;
        }
    }

    // Pass 2: extract the final segment from URL- or path-shaped values.
    for field in CANDIDATE_FIELDS {
        let value = hit.str_field(field);
        if value.is_empty() {
            continue;
        }
        if let Some(name) = extract_filename(&value) {
            tracing::trace!(field = *field, value = %value, name = %name, "filename extracted from path");
            return name;
        }
    }

    // Pass 3: any non-empty candidate, verbatim.
    for field in CANDIDATE_FIELDS {
        let value = hit.str_field(field);
        if !value.is_empty() {
            tracing::trace!(field = *field, value = %value, "raw fallback filename");
            return value;
        }
    }

    String::new()
}

/// Extract a filename from a URL-, Windows-, or POSIX-shaped value.
///
/// URLs drop any query-string suffix before taking the final `/` segment.
/// Returns `None` when the value has no separators or the final segment is
/// empty.
fn extract_filename(value: &str) -> Option<String> {
    let segment = if value.starts_with("http://") || value.starts_with("https://") {
        let base = value.split('?').next().unwrap_or(value);
        base.trim_end_matches('/').rsplit('/').next()
    } else if value.contains('\\') {
        value.trim_end_matches('\\').rsplit('\\').next()
    } else if value.contains('/') {
        value.trim_end_matches('/').rsplit('/').next()
    } else {
        None
    };

    segment
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
