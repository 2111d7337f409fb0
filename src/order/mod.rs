use serde_json::{Map, Value};

use std::fs;
use std::path::Path;

pub mod error;
pub use error::OrderError;

/// A template or request document: a JSON object with a required `options`
/// sub-object. The `options` object is held separately so the one-level
/// merge rule can treat it independently of the other top-level keys.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDocument {
    fields: Map<String, Value>,
    options: Map<String, Value>,
}

impl OrderDocument {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<OrderDocument, OrderError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        if contents.trim().is_empty() {
            return Err(OrderError::MalformedInput {
                path: path.to_path_buf(),
                reason: "file is empty".to_string(),
            });
        }

        let value: Value =
            serde_json::from_str(&contents).map_err(|e| OrderError::MalformedInput {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Self::from_value(value).map_err(|reason| OrderError::MalformedInput {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn from_value(value: Value) -> Result<OrderDocument, String> {
        let Value::Object(mut fields) = value else {
            return Err("document is not a JSON object".to_string());
        };

        let options = match fields.remove("options") {
            Some(Value::Object(options)) => options,
            Some(_) => return Err("'options' is not a JSON object".to_string()),
            None => return Err("missing required 'options' key".to_string()),
        };

        Ok(OrderDocument { fields, options })
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }
}

/// Merges a request document over a template document, one level deep.
///
/// Top-level request keys override template keys; `options` is merged
/// independently under the same rule. Neither input is mutated.
pub fn merge(template: &OrderDocument, request: &OrderDocument) -> Map<String, Value> {
    let mut merged = template.fields.clone();
    for (key, value) in &request.fields {
        merged.insert(key.clone(), value.clone());
    }

    let mut options = template.options.clone();
    for (key, value) in &request.options {
        options.insert(key.clone(), value.clone());
    }

    merged.insert("options".to_string(), Value::Object(options));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn document(value: Value) -> OrderDocument {
        OrderDocument::from_value(value).unwrap()
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("template.json");
        let mut file = File::create(&file_path).unwrap();

        let template_data = r#"
    {
        "orderid": "ORDER_ID",
        "options": {
            "include_sr": true
        }
    }
    "#;

        file.write_all(template_data.as_bytes()).unwrap();

        let template = OrderDocument::from_file(file_path).unwrap();

        assert_eq!(template.fields()["orderid"], json!("ORDER_ID"));
        assert_eq!(template.options()["include_sr"], json!(true));
    }

    #[test]
    fn test_from_file_empty() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.json");
        File::create(&file_path).unwrap();

        let err = OrderDocument::from_file(&file_path).unwrap_err();
        assert!(matches!(err, OrderError::MalformedInput { .. }));
    }

    #[test]
    fn test_from_file_not_an_object() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("list.json");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"[1, 2, 3]").unwrap();

        let err = OrderDocument::from_file(&file_path).unwrap_err();
        assert!(matches!(err, OrderError::MalformedInput { .. }));
    }

    #[test]
    fn test_missing_options_is_malformed() {
        let err = OrderDocument::from_value(json!({"note": "x"})).unwrap_err();
        assert!(err.contains("options"));
    }

    #[test]
    fn test_merge_request_overrides_template() {
        let template = document(json!({
            "orderid": "ORDER_ID",
            "priority": "low",
            "options": {"include_sr": true, "include_cfmask": false}
        }));
        let request = document(json!({
            "priority": "high",
            "options": {"include_cfmask": true}
        }));

        let merged = merge(&template, &request);

        assert_eq!(merged["orderid"], json!("ORDER_ID"));
        assert_eq!(merged["priority"], json!("high"));
        assert_eq!(merged["options"]["include_sr"], json!(true));
        assert_eq!(merged["options"]["include_cfmask"], json!(true));
    }

    #[test]
    fn test_merge_is_idempotent_on_identical_documents() {
        let template = document(json!({
            "orderid": "ORDER_ID",
            "options": {"include_sr": true}
        }));

        let merged = merge(&template, &template.clone());

        let mut expected = template.fields().clone();
        expected.insert("options".to_string(), Value::Object(template.options().clone()));
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_merge_options_is_independent() {
        let template = document(json!({
            "note": "default",
            "options": {"a": 1}
        }));
        let request_a = document(json!({"note": "changed", "options": {}}));
        let request_b = document(json!({"options": {"b": 2}}));

        // A non-options override must not leak into the merged options.
        let merged_a = merge(&template, &request_a);
        assert_eq!(merged_a["options"], json!({"a": 1}));

        // An options override must not touch the other top-level keys.
        let merged_b = merge(&template, &request_b);
        assert_eq!(merged_b["note"], json!("default"));
        assert_eq!(merged_b["options"], json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_merge_inputs_not_mutated() {
        let template = document(json!({"options": {"a": 1}}));
        let request = document(json!({"note": "x", "options": {"b": 2}}));

        let merged = merge(&template, &request);

        assert_eq!(merged, json!({"note": "x", "options": {"a": 1, "b": 2}}).as_object().unwrap().clone());
        assert_eq!(template.options(), json!({"a": 1}).as_object().unwrap());
        assert_eq!(request.fields()["note"], json!("x"));
    }
}
