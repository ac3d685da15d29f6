//! Property storage with change tracking.
//!
//! [`PropertyBag`] holds the properties of a client object as they are
//! populated from server responses or set locally. Properties set with
//! `persist_changes` are recorded so that an update only sends what was
//! modified.
//!
//! # Example
//!
//! ```rust
//! use sharepoint_api::runtime::{PropertyBag, PropertyValue};
//! use serde_json::json;
//!
//! let mut bag = PropertyBag::new();
//!
//! // Values loaded from the server are not dirty
//! bag.set("Title", PropertyValue::Scalar(json!("Tasks")), false);
//! assert!(!bag.is_dirty());
//!
//! // Local modifications are
//! bag.set("Description", PropertyValue::Scalar(json!("Team tasks")), true);
//! assert!(bag.is_dirty());
//! assert_eq!(bag.changed_fields(), json!({"Description": "Team tasks"}));
//!
//! bag.mark_clean();
//! assert!(!bag.is_dirty());
//! ```

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::runtime::client_object::ClientObject;

/// A value held in a [`PropertyBag`].
#[derive(Clone, Debug)]
pub enum PropertyValue {
    /// A JSON scalar or complex value.
    Scalar(Value),
    /// A nested resource proxy.
    Object(ClientObject),
}

impl PropertyValue {
    /// Returns the scalar value, if this is one.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Object(_) => None,
        }
    }

    /// Returns the nested object, if this is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ClientObject> {
        match self {
            Self::Object(object) => Some(object),
            Self::Scalar(_) => None,
        }
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

impl From<ClientObject> for PropertyValue {
    fn from(object: ClientObject) -> Self {
        Self::Object(object)
    }
}

/// Named properties of a client object plus the set of locally changed names.
#[derive(Clone, Debug, Default)]
pub struct PropertyBag {
    values: HashMap<String, PropertyValue>,
    changed: Vec<String>,
}

impl PropertyBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a property, recording it as changed when `persist_changes` is set.
    pub fn set(&mut self, name: impl Into<String>, value: PropertyValue, persist_changes: bool) {
        let name = name.into();
        if persist_changes && !self.changed.contains(&name) {
            self.changed.push(name.clone());
        }
        self.values.insert(name, value);
    }

    /// Returns a property, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    /// Returns `true` if the property is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the bag holds no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if any property was changed locally since the last
    /// [`mark_clean`](Self::mark_clean).
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Returns the names of locally changed properties, in the order they
    /// were first changed.
    #[must_use]
    pub fn changed_names(&self) -> &[String] {
        &self.changed
    }

    /// Returns the locally changed scalar properties as a JSON object.
    ///
    /// Nested objects are not part of an entity's own payload and are skipped.
    #[must_use]
    pub fn changed_fields(&self) -> Value {
        let mut fields = Map::new();
        for name in &self.changed {
            if let Some(PropertyValue::Scalar(value)) = self.values.get(name) {
                fields.insert(name.clone(), value.clone());
            }
        }
        Value::Object(fields)
    }

    /// Forgets local changes; values are kept.
    pub fn mark_clean(&mut self) {
        self.changed.clear();
    }
}
