//! Structured values sent as operation payloads.
//!
//! A client value is a plain serializable struct (as opposed to an
//! addressable entity). On the wire it carries a `__metadata` annotation
//! naming its server type, e.g.
//! `{"__metadata": {"type": "SP.CamlQuery"}, "ViewXml": "..."}`.

use serde::Serialize;
use serde_json::{json, Value};

/// A serializable value with a server-side type name.
pub trait ClientValue: Serialize {
    /// The server-side type name (e.g., `SP.CamlQuery`).
    fn entity_type_name(&self) -> &'static str;

    /// Serializes the value with its `__metadata` annotation.
    ///
    /// Values that do not serialize to a JSON object are returned as-is.
    /// A value that fails to serialize is logged and sent as `null`.
    fn to_json(&self) -> Value {
        let mut value = match serde_json::to_value(self) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(
                    "Failed to serialize {} payload: {error}",
                    self.entity_type_name()
                );
                Value::Null
            }
        };
        if let Value::Object(map) = &mut value {
            map.insert(
                "__metadata".to_string(),
                json!({ "type": self.entity_type_name() }),
            );
        }
        value
    }
}
