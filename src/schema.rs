//! Index schema snapshot: which fields are searchable and retrievable.
//!
//! Populated once at startup from the index-inspection call and read-only
//! afterwards. When inspection fails the service degrades to a fixed
//! default field set rather than refusing to start.

use serde_json::Value;

/// Searchable fields assumed when the index definition is unavailable.
pub const DEFAULT_SEARCHABLE_FIELDS: &[&str] = &["content", "title"];

/// Field lists derived from the remote index definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSchema {
    /// Fields flagged `searchable` in the index definition, in definition order.
    pub searchable_fields: Vec<String>,
    /// Fields flagged `retrievable` in the index definition, in definition order.
    pub retrievable_fields: Vec<String>,
}

impl IndexSchema {
    /// Parse an index definition into a schema snapshot.
    ///
    /// Expects a `fields` collection where each entry carries `name`,
    /// `searchable`, and `retrievable`. Absent flags count as `false`;
    /// entries without a name are ignored.
    pub fn from_definition(definition: &Value) -> Self {
        let mut searchable_fields = Vec::new();
        let mut retrievable_fields = Vec::new();

        let fields = definition
            .get("fields")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for field in fields {
            let Some(name) = field.get("name").and_then(Value::as_str) else {
                continue;
            };
            if flag(field, "searchable") {
                searchable_fields.push(name.to_owned());
            }
            if flag(field, "retrievable") {
                retrievable_fields.push(name.to_owned());
            }
        }

        Self {
            searchable_fields,
            retrievable_fields,
        }
    }

    /// The fixed fallback schema used when inspection fails.
    pub fn fallback() -> Self {
        Self {
            searchable_fields: DEFAULT_SEARCHABLE_FIELDS
                .iter()
                .map(|f| (*f).to_owned())
                .collect(),
            retrievable_fields: Vec::new(),
        }
    }
}

fn flag(field: &Value, name: &str) -> bool {
    field.get(name).and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn definition_fields_partitioned_by_flags() {
        let definition = json!({
            "name": "contracts",
            "fields": [
                {"name": "id", "type": "Edm.String", "key": true, "searchable": false, "retrievable": true},
                {"name": "content", "type": "Edm.String", "searchable": true, "retrievable": true},
                {"name": "title", "type": "Edm.String", "searchable": true, "retrievable": true},
                {"name": "metadata_storage_path", "type": "Edm.String", "retrievable": true}
            ]
        });
        let schema = IndexSchema::from_definition(&definition);
        assert_eq!(schema.searchable_fields, vec!["content", "title"]);
        assert_eq!(
            schema.retrievable_fields,
            vec!["id", "content", "title", "metadata_storage_path"]
        );
    }

    #[test]
    fn field_order_preserved() {
        let definition = json!({
            "fields": [
                {"name": "zeta", "searchable": true},
                {"name": "alpha", "searchable": true}
            ]
        });
        let schema = IndexSchema::from_definition(&definition);
        assert_eq!(schema.searchable_fields, vec!["zeta", "alpha"]);
    }

    #[test]
    fn missing_flags_default_to_false() {
        let definition = json!({"fields": [{"name": "content"}]});
        let schema = IndexSchema::from_definition(&definition);
        assert!(schema.searchable_fields.is_empty());
        assert!(schema.retrievable_fields.is_empty());
    }

    #[test]
    fn malformed_definition_yields_empty_schema() {
        let schema = IndexSchema::from_definition(&json!({"fields": "oops"}));
        assert!(schema.searchable_fields.is_empty());

        let schema = IndexSchema::from_definition(&json!(null));
        assert!(schema.searchable_fields.is_empty());
    }

    #[test]
    fn nameless_field_ignored() {
        let definition = json!({
            "fields": [
                {"searchable": true},
                {"name": "content", "searchable": true}
            ]
        });
        let schema = IndexSchema::from_definition(&definition);
        assert_eq!(schema.searchable_fields, vec!["content"]);
    }

    #[test]
    fn fallback_uses_default_searchable_set() {
        let schema = IndexSchema::fallback();
        assert_eq!(schema.searchable_fields, vec!["content", "title"]);
        assert!(schema.retrievable_fields.is_empty());
    }
}
