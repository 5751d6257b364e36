use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::form_urlencoded;

/// Converted request parameters, keyed by parameter name.
///
/// Serializes as a plain JSON object, which is the request body of the full
/// API. [`QueryParams::to_query_pairs`] flattens it for a URL query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(Map<String, Value>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Flatten into `(name, value)` pairs for a query string.
    ///
    /// Scalars are rendered as text, arrays are joined with `|` and objects
    /// use bracket notation (`grouping[field]=...`). An empty object is kept
    /// as a bare key (`associations[media]=`). Nulls are skipped.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            push_pairs(&mut pairs, key.clone(), value);
        }
        pairs
    }

    /// URL-encoded query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_query_pairs())
            .finish()
    }
}

fn push_pairs(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Object(map) if map.is_empty() => pairs.push((key, String::new())),
        Value::Object(map) => {
            for (child_key, child) in map {
                push_pairs(pairs, format!("{key}[{child_key}]"), child);
            }
        }
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join("|");
            pairs.push((key, joined));
        }
        scalar => {
            if let Some(text) = scalar_text(scalar) {
                pairs.push((key, text));
            }
        }
    }
}

/// Text form of a scalar JSON value.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl From<QueryParams> for Value {
    fn from(params: QueryParams) -> Self {
        Value::Object(params.0)
    }
}

impl From<Map<String, Value>> for QueryParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_nested_values_for_query_string() {
        let params = QueryParams::from(
            json!({
                "p": 2,
                "limit": 25,
                "manufacturer": "a|b",
                "grouping": { "field": "displayGroup" },
                "ids": ["x", 1, null],
                "skip": null,
            })
            .as_object()
            .cloned()
            .unwrap(),
        );

        let mut pairs = params.to_query_pairs();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("grouping[field]".to_string(), "displayGroup".to_string()),
                ("ids".to_string(), "x|1".to_string()),
                ("limit".to_string(), "25".to_string()),
                ("manufacturer".to_string(), "a|b".to_string()),
                ("p".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn empty_objects_keep_their_key() {
        let params = QueryParams::from(
            json!({
                "associations": {
                    "media": {},
                    "manufacturer": { "associations": { "media": {} } },
                },
            })
            .as_object()
            .cloned()
            .unwrap(),
        );

        let mut pairs = params.to_query_pairs();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                (
                    "associations[manufacturer][associations][media]".to_string(),
                    String::new()
                ),
                ("associations[media]".to_string(), String::new()),
            ]
        );
        assert_eq!(
            params.to_query_string(),
            "associations%5Bmanufacturer%5D%5Bassociations%5D%5Bmedia%5D=&associations%5Bmedia%5D="
        );
    }

    #[test]
    fn query_string_is_url_encoded() {
        let mut params = QueryParams::new();
        params.insert("properties", "a|b");
        assert_eq!(params.to_query_string(), "properties=a%7Cb");
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut params = QueryParams::new();
        params.insert("limit", 10);
        assert_eq!(serde_json::to_string(&params).unwrap(), r#"{"limit":10}"#);
    }
}
