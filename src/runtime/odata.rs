//! Helpers for reading OData response envelopes.
//!
//! SharePoint answers `odata=verbose` requests with `{"d": ...}` and
//! collections as `{"d": {"results": [...]}}`. Light metadata responses use
//! `{"value": [...]}` instead. These helpers accept either shape.

use serde_json::Value;

/// Strips the verbose `d` envelope, if present.
#[must_use]
pub fn unwrap_envelope(body: &Value) -> &Value {
    body.get("d").unwrap_or(body)
}

/// Returns the entries of a collection payload, if the value is one.
///
/// Accepts a bare array, `{"results": [...]}` and `{"value": [...]}`.
#[must_use]
pub fn collection_entries(value: &Value) -> Option<&Vec<Value>> {
    value
        .as_array()
        .or_else(|| value.get("results").and_then(Value::as_array))
        .or_else(|| value.get("value").and_then(Value::as_array))
}

/// Returns `true` for a deferred navigation link (`{"__deferred": {...}}`).
#[must_use]
pub fn is_deferred(value: &Value) -> bool {
    value.get("__deferred").is_some()
}

/// Returns the `__metadata.type` annotation of an entity, if present.
#[must_use]
pub fn metadata_type(value: &Value) -> Option<&str> {
    value
        .get("__metadata")
        .and_then(|metadata| metadata.get("type"))
        .and_then(Value::as_str)
}

/// Returns `true` for an expanded entity or entity collection.
///
/// Verbose entities carry `__metadata.uri`; complex values (e.g.
/// `SP.ResourcePath`, multi-choice values) carry only a type and are kept
/// as scalars.
#[must_use]
pub fn is_entity(value: &Value) -> bool {
    let has_uri = |v: &Value| v.get("__metadata").and_then(|m| m.get("uri")).is_some();
    has_uri(value)
        || value
            .get("results")
            .and_then(Value::as_array)
            .and_then(|entries| entries.first())
            .is_some_and(has_uri)
}

/// Extracts the return value of a service operation.
///
/// Verbose responses wrap scalars under the operation name
/// (`{"d": {"GetWebDavUrl": "..."}}`) and light responses under `value`.
/// An object with a single non-metadata key is unwrapped to that key's
/// value; anything else is returned as-is.
#[must_use]
pub fn scalar_value(body: &Value) -> Value {
    let value = unwrap_envelope(body);
    if let Some(map) = value.as_object() {
        if let Some(inner) = map.get("value") {
            if map.len() == 1 {
                return inner.clone();
            }
        }
        let mut keys = map.keys().filter(|key| key.as_str() != "__metadata");
        if let (Some(key), None) = (keys.next(), keys.next()) {
            return map[key].clone();
        }
    }
    value.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope() {
        assert_eq!(unwrap_envelope(&json!({"d": {"Id": 1}})), &json!({"Id": 1}));
        assert_eq!(unwrap_envelope(&json!({"Id": 1})), &json!({"Id": 1}));
    }

    #[test]
    fn test_collection_entries_shapes() {
        let verbose = json!({"results": [{"Id": 1}, {"Id": 2}]});
        assert_eq!(collection_entries(&verbose).map(Vec::len), Some(2));

        let light = json!({"value": [{"Id": 1}]});
        assert_eq!(collection_entries(&light).map(Vec::len), Some(1));

        let bare = json!([]);
        assert_eq!(collection_entries(&bare).map(Vec::len), Some(0));

        assert!(collection_entries(&json!({"Id": 1})).is_none());
    }

    #[test]
    fn test_deferred_and_metadata() {
        let deferred = json!({"__deferred": {"uri": "https://x/_api/Web/Lists"}});
        assert!(is_deferred(&deferred));
        assert!(!is_deferred(&json!({"Title": "x"})));

        let entity = json!({"__metadata": {"type": "SP.List"}, "Title": "x"});
        assert_eq!(metadata_type(&entity), Some("SP.List"));
        assert_eq!(metadata_type(&json!({})), None);
    }

    #[test]
    fn test_is_entity_distinguishes_complex_values() {
        let entity = json!({"__metadata": {"type": "SP.Folder", "uri": "https://x/_api/Web/RootFolder"}});
        assert!(is_entity(&entity));

        let expanded = json!({"results": [{"__metadata": {"uri": "u", "type": "SP.Field"}}]});
        assert!(is_entity(&expanded));

        let complex = json!({"__metadata": {"type": "SP.ResourcePath"}, "DecodedUrl": "/x"});
        assert!(!is_entity(&complex));

        let multi_choice = json!({"__metadata": {"type": "Collection(Edm.String)"}, "results": ["a"]});
        assert!(!is_entity(&multi_choice));
    }

    #[test]
    fn test_scalar_value_unwraps_operation_name() {
        let body = json!({"d": {"GetWebDavUrl": "https://contoso/webdav"}});
        assert_eq!(scalar_value(&body), json!("https://contoso/webdav"));
    }

    #[test]
    fn test_scalar_value_unwraps_light_value() {
        assert_eq!(scalar_value(&json!({"value": 5})), json!(5));
    }

    #[test]
    fn test_scalar_value_keeps_structured_objects() {
        let body = json!({"d": {"__metadata": {"type": "T"}, "SiteId": "a", "SiteStatus": 2}});
        assert_eq!(
            scalar_value(&body),
            json!({"__metadata": {"type": "T"}, "SiteId": "a", "SiteStatus": 2})
        );
    }

    #[test]
    fn test_scalar_value_unwraps_single_structured_key() {
        let body = json!({"d": {"Status": {"SiteStatus": 2, "SiteUrl": "u"}}});
        assert_eq!(scalar_value(&body), json!({"SiteStatus": 2, "SiteUrl": "u"}));
    }
}
