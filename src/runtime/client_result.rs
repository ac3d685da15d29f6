//! Single-value result containers.
//!
//! Service operations that return a scalar or a structured value (rather
//! than an entity) hand back a [`ClientResult<T>`]. The container stays
//! empty until the owning context executes the query.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A sink that receives the JSON value returned by a service operation.
pub trait ValueSink: Send + Sync {
    /// Stores the returned value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not deserialize into the sink's type.
    fn set_json(&self, value: Value) -> Result<(), serde_json::Error>;
}

/// A shared, initially empty, single-value container.
///
/// Clones share the same slot.
///
/// # Example
///
/// ```rust
/// use sharepoint_api::runtime::ClientResult;
///
/// let result: ClientResult<String> = ClientResult::new();
/// assert!(!result.is_resolved());
///
/// result.set_value("https://contoso.sharepoint.com/_webdav".to_string());
/// assert_eq!(result.value().as_deref(), Some("https://contoso.sharepoint.com/_webdav"));
/// ```
pub struct ClientResult<T>(Arc<Mutex<Option<T>>>);

impl<T> ClientResult<T> {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(None)))
    }

    /// Returns `true` once a value has been stored.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Stores a value, replacing any previous one.
    pub fn set_value(&self, value: T) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
    }
}

impl<T: Clone> ClientResult<T> {
    /// Returns a copy of the stored value, or `None` while unresolved.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T> Clone for ClientResult<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Default for ClientResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ClientResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_tuple("ClientResult").field(&*guard).finish()
    }
}

impl<T: DeserializeOwned + Send> ValueSink for ClientResult<T> {
    fn set_json(&self, value: Value) -> Result<(), serde_json::Error> {
        let value = serde_json::from_value(value)?;
        self.set_value(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_new_result_is_unresolved() {
        let result: ClientResult<String> = ClientResult::new();
        assert!(!result.is_resolved());
        assert!(result.value().is_none());
    }

    #[test]
    fn test_clones_share_the_slot() {
        let result: ClientResult<i64> = ClientResult::new();
        let handle = result.clone();

        handle.set_value(42);
        assert_eq!(result.value(), Some(42));
    }

    #[test]
    fn test_set_json_deserializes_scalar() {
        let result: ClientResult<String> = ClientResult::new();
        result.set_json(json!("https://contoso")).unwrap();
        assert_eq!(result.value().as_deref(), Some("https://contoso"));
    }

    #[test]
    fn test_set_json_deserializes_struct() {
        #[derive(Clone, Debug, Deserialize, PartialEq)]
        #[serde(rename_all = "PascalCase")]
        struct Status {
            site_status: i32,
        }

        let result: ClientResult<Status> = ClientResult::new();
        result
            .set_json(json!({"__metadata": {"type": "X"}, "SiteStatus": 2}))
            .unwrap();
        assert_eq!(result.value(), Some(Status { site_status: 2 }));
    }

    #[test]
    fn test_set_json_rejects_wrong_type() {
        let result: ClientResult<i64> = ClientResult::new();
        assert!(result.set_json(json!("not a number")).is_err());
        assert!(!result.is_resolved());
    }
}
