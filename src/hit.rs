//! Tolerant field access over raw index hits.
//!
//! Hit documents have no fixed schema: field presence and naming vary by
//! index configuration, and a field expected to be a string may arrive as a
//! number, null, or list. [`RawHit`] wraps the hit's JSON object with typed
//! getters that default on absence or type mismatch, so downstream code
//! never branches on JSON shape.

use serde_json::{Map, Value};

/// A borrowed view of one raw hit document.
#[derive(Debug, Clone, Copy)]
pub struct RawHit<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawHit<'a> {
    /// Wrap a raw JSON value. Returns `None` when the hit is not an object.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|fields| Self { fields })
    }

    /// Field value as an owned string.
    ///
    /// Strings are returned as-is; numbers and booleans are rendered;
    /// null, arrays, objects, and absent fields become `""`.
    pub fn str_field(&self, name: &str) -> String {
        match self.fields.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Field value as a float, accepting numbers and numeric strings.
    pub fn f64_field(&self, name: &str) -> Option<f64> {
        match self.fields.get(name) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.parse().ok(),
            _ => None,
        }
    }

    /// Field value as an array, or `None` for any other shape.
    pub fn array_field(&self, name: &str) -> Option<&'a Vec<Value>> {
        self.fields.get(name).and_then(Value::as_array)
    }

    /// Field value as an object, or `None` for any other shape.
    pub fn object_field(&self, name: &str) -> Option<&'a Map<String, Value>> {
        self.fields.get(name).and_then(Value::as_object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_hit_rejected() {
        assert!(RawHit::from_value(&json!("just a string")).is_none());
        assert!(RawHit::from_value(&json!([1, 2, 3])).is_none());
        assert!(RawHit::from_value(&json!(null)).is_none());
    }

    #[test]
    fn string_field_returned_verbatim() {
        let hit = json!({"content": "contract text"});
        let hit = RawHit::from_value(&hit).expect("object");
        assert_eq!(hit.str_field("content"), "contract text");
    }

    #[test]
    fn numeric_field_rendered_as_string() {
        let hit = json!({"title": 42});
        let hit = RawHit::from_value(&hit).expect("object");
        assert_eq!(hit.str_field("title"), "42");
    }

    #[test]
    fn absent_and_null_fields_are_empty_strings() {
        let hit = json!({"context": null});
        let hit = RawHit::from_value(&hit).expect("object");
        assert_eq!(hit.str_field("context"), "");
        assert_eq!(hit.str_field("missing"), "");
    }

    #[test]
    fn list_valued_field_is_empty_string() {
        let hit = json!({"content": ["a", "b"]});
        let hit = RawHit::from_value(&hit).expect("object");
        assert_eq!(hit.str_field("content"), "");
    }

    #[test]
    fn score_coerced_from_number_and_string() {
        let hit = json!({"@search.score": 1.5, "alt": "2.25"});
        let hit = RawHit::from_value(&hit).expect("object");
        assert_eq!(hit.f64_field("@search.score"), Some(1.5));
        assert_eq!(hit.f64_field("alt"), Some(2.25));
        assert_eq!(hit.f64_field("missing"), None);
    }

    #[test]
    fn non_numeric_score_is_none() {
        let hit = json!({"@search.score": "high"});
        let hit = RawHit::from_value(&hit).expect("object");
        assert_eq!(hit.f64_field("@search.score"), None);
    }

    #[test]
    fn collection_getters_check_shape() {
        let hit = json!({
            "@search.captions": [{"text": "snippet"}],
            "@search.highlights": {"content": ["<mark>hit</mark>"]}
        });
        let hit = RawHit::from_value(&hit).expect("object");
        assert_eq!(hit.array_field("@search.captions").map(Vec::len), Some(1));
        assert!(hit.object_field("@search.highlights").is_some());
        assert!(hit.array_field("@search.highlights").is_none());
        assert!(hit.object_field("@search.captions").is_none());
    }
}
