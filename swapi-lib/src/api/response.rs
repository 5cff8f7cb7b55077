//! Envelope of list responses.

use serde::Deserialize;
use serde_json::Value;

/// A decoded list response.
///
/// List endpoints answer with `{"data": [...], "meta": {...}}`, optionally
/// accompanied by `errors`, `warnings` and `messages`. Missing parts decode to
/// empty values.
///
/// # Example
///
/// ```ignore
/// #[derive(serde::Deserialize)]
/// struct Company { id: u64, name: String }
///
/// let response: ListResponse<Company> = client
///     .account()
///     .companies()
///     .list_as(&Query::new().limit(20))
///     .await?;
///
/// println!("{} of {:?}", response.data.len(), response.total());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T = Value> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Value,
    #[serde(default)]
    pub errors: Value,
    #[serde(default)]
    pub warnings: Value,
    #[serde(default)]
    pub messages: Value,
}

impl<T> ListResponse<T> {
    /// Returns the total number of matching records, when the server reports it.
    pub fn total(&self) -> Option<usize> {
        total_from_meta(&self.meta)
    }
}

/// Reads the record total from `meta.total`, `meta.page.total_count` or
/// `meta.page.total`.
///
/// Numbers sent as strings are accepted.
pub(crate) fn total_from_meta(meta: &Value) -> Option<usize> {
    let page = meta.get("page");
    meta.get("total")
        .or_else(|| page.and_then(|page| page.get("total_count")))
        .or_else(|| page.and_then(|page| page.get("total")))
        .and_then(as_count)
}

fn as_count(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_from_meta() {
        assert_eq!(total_from_meta(&json!({"total": 42})), Some(42));
        assert_eq!(total_from_meta(&json!({"total": "7"})), Some(7));
        assert_eq!(total_from_meta(&json!({"page": {"total_count": 3}})), Some(3));
        assert_eq!(total_from_meta(&json!({"page": {"total": 5}})), Some(5));
        assert_eq!(total_from_meta(&json!({"total": -1})), None);
        assert_eq!(total_from_meta(&json!({})), None);
        assert_eq!(total_from_meta(&Value::Null), None);
    }

    #[test]
    fn test_decode_partial_envelope() {
        let response: ListResponse = serde_json::from_value(json!({"data": [{"id": 1}]})).unwrap();
        assert_eq!(response.data, vec![json!({"id": 1})]);
        assert_eq!(response.meta, Value::Null);
        assert_eq!(response.total(), None);

        let response: ListResponse = serde_json::from_value(json!({"meta": {"total": 0}})).unwrap();
        assert!(response.data.is_empty());
        assert_eq!(response.total(), Some(0));
    }

    #[test]
    fn test_decode_typed_items() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Item {
            id: u32,
        }

        let response: ListResponse<Item> = serde_json::from_value(json!({
            "data": [{"id": 1}, {"id": 2}],
            "meta": {"total": 2},
            "warnings": ["slow query"]
        }))
        .unwrap();
        assert_eq!(response.data, vec![Item { id: 1 }, Item { id: 2 }]);
        assert_eq!(response.warnings, json!(["slow query"]));
    }
}
