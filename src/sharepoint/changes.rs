//! Change log entries and the queries that select them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::runtime::{ClientObject, ClientValue, Entity, EntityCollection, PropertyState};

/// Selects which changes `getChanges` returns.
///
/// Object-type flags choose what changed; change-type flags choose how.
/// Unset flags are omitted from the payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeQuery {
    /// Include changes to items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<bool>,
    /// Include changes to lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<bool>,
    /// Include changes to fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<bool>,
    /// Include changes to views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<bool>,
    /// Include additions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add: Option<bool>,
    /// Include updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,
    /// Include deletions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_object: Option<bool>,
    /// Include renames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename: Option<bool>,
}

impl ChangeQuery {
    /// Returns the default list-level query: additions, updates and
    /// deletions of the list itself.
    #[must_use]
    pub fn list_scope() -> Self {
        Self {
            list: Some(true),
            add: Some(true),
            update: Some(true),
            delete_object: Some(true),
            ..Self::default()
        }
    }
}

impl ClientValue for ChangeQuery {
    fn entity_type_name(&self) -> &'static str {
        "SP.ChangeQuery"
    }
}

/// A change log entry.
#[derive(Clone, Debug)]
pub struct Change {
    object: ClientObject,
}

impl Entity for Change {
    const NAME: &'static str = "SP.Change";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl Change {
    /// The kind of change (`1` = add, `2` = update, `3` = delete, ...).
    #[must_use]
    pub fn change_type(&self) -> PropertyState<i32> {
        self.object.get_property("ChangeType")
    }

    /// When the change happened.
    #[must_use]
    pub fn time(&self) -> PropertyState<DateTime<Utc>> {
        self.object.get_property("Time")
    }
}

/// A collection of change log entries.
#[derive(Clone, Debug)]
pub struct ChangeCollection {
    object: ClientObject,
}

impl Entity for ChangeCollection {
    const NAME: &'static str = "Collection(SP.Change)";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl EntityCollection for ChangeCollection {
    type Item = Change;
}
