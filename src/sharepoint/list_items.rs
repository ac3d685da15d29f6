//! List items and the inputs used to create them.
//!
//! # Creating Items
//!
//! [`List::add_item`](crate::sharepoint::List::add_item) accepts an
//! [`ItemCreation`], either a property map (POSTed to the list's `items`
//! collection) or a [`ListItemCreationInformation`] (sent to `addItem`,
//! which can place the item in a folder).
//!
//! ```rust
//! use sharepoint_api::sharepoint::ItemCreation;
//! use serde_json::json;
//!
//! let creation = ItemCreation::try_from(json!({"Title": "Write docs"})).unwrap();
//! assert!(matches!(creation, ItemCreation::Properties(_)));
//!
//! // Anything but a JSON object is rejected
//! assert!(ItemCreation::try_from(json!(["Title"])).is_err());
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use crate::runtime::{
    ClientError, ClientObject, ClientQuery, ClientValue, Entity, EntityCollection,
    IdentityResolver, PathParameter, PathSegment, PropertyState, ResourcePath,
};
use crate::sharepoint::List;

/// Binds an unbound item to `<list path>/getItemById(<id>)` once its `Id`
/// is known. The parent collection is the list's `items`.
fn item_path(_name: &str, value: &Value, items_path: &ResourcePath) -> Option<ResourcePath> {
    let id = PathParameter::from_json(value)?;
    let list_path = items_path.parent()?;
    Some(list_path.service_operation("getItemById", Some(vec![id])))
}

pub(crate) const ITEM_IDENTITY: IdentityResolver = IdentityResolver::new(&["Id"], item_path);

/// A list item.
#[derive(Clone, Debug)]
pub struct ListItem {
    object: ClientObject,
}

impl Entity for ListItem {
    const NAME: &'static str = "SP.ListItem";

    fn from_object(object: ClientObject) -> Self {
        object.set_identity_resolver(ITEM_IDENTITY);
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl ListItem {
    /// The item id.
    #[must_use]
    pub fn id(&self) -> PropertyState<i64> {
        self.object.get_property("Id")
    }

    /// Returns a field value as raw JSON.
    #[must_use]
    pub fn get_field_value(&self, name: &str) -> PropertyState<Value> {
        self.object.get_property(name)
    }

    /// Sets a field value for the next update.
    pub fn set_field_value(&self, name: &str, value: impl Into<Value>) -> &Self {
        self.object.set_property(name, value.into(), true);
        self
    }

    /// Enqueues an update (MERGE) sending the changed fields.
    pub fn update(&self) -> &Self {
        self.object
            .context()
            .add_query(ClientQuery::UpdateEntity {
                target: self.object.clone(),
            });
        self
    }

    /// Enqueues deletion of the item and detaches it from its collection.
    pub fn delete_object(&self) -> &Self {
        self.object
            .context()
            .add_query(ClientQuery::DeleteEntity {
                target: self.object.clone(),
            });
        self.object.remove_from_parent_collection();
        self
    }

    /// Derives the item's entity type from the list it belongs to.
    ///
    /// Uses `ListItemEntityTypeFullName` when the list has it loaded,
    /// otherwise `SP.Data.<Title>ListItem` built from the list title (from
    /// its properties or its `GetByTitle` path). Leaves the type untouched
    /// when neither is known.
    pub fn ensure_type_name(&self, list: &List) {
        if let PropertyState::Fetched(name) = list.list_item_entity_type_full_name() {
            self.object.set_entity_type_name(name);
            return;
        }

        let title = list
            .title()
            .fetched()
            .or_else(|| list.resource_path().as_ref().and_then(title_from_path));

        match title {
            Some(title) => {
                self.object.set_entity_type_name(format!(
                    "SP.Data.{}ListItem",
                    title.replace(' ', "_x0020_")
                ));
            }
            None => tracing::debug!("List title unknown; keeping item entity type {}", Self::NAME),
        }
    }
}

fn title_from_path(path: &ResourcePath) -> Option<String> {
    match path.segment() {
        PathSegment::ServiceOperation {
            name,
            params: Some(params),
        } if name.eq_ignore_ascii_case("GetByTitle") => match params.first() {
            Some(PathParameter::String(title)) => Some(title.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// The items of a list.
#[derive(Clone, Debug)]
pub struct ListItemCollection {
    object: ClientObject,
}

impl Entity for ListItemCollection {
    const NAME: &'static str = "Collection(SP.ListItem)";

    fn from_object(object: ClientObject) -> Self {
        object.set_child_identity_resolver(ITEM_IDENTITY);
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl EntityCollection for ListItemCollection {
    type Item = ListItem;
}

/// Creation parameters for `addItem`.
///
/// `folder_url` is filled in by [`List::add_item`] from the list's root
/// folder; callers normally set only the leaf name and object type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListItemCreationInformation {
    /// Absolute URL of the folder receiving the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_url: Option<String>,
    /// Name of the new item (or folder).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf_name: Option<String>,
    /// `0` for a file, `1` for a folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_object_type: Option<i32>,
}

impl ListItemCreationInformation {
    /// Creates empty creation information.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the leaf name.
    #[must_use]
    pub fn leaf_name(mut self, name: impl Into<String>) -> Self {
        self.leaf_name = Some(name.into());
        self
    }

    /// Sets the underlying object type.
    #[must_use]
    pub const fn underlying_object_type(mut self, object_type: i32) -> Self {
        self.underlying_object_type = Some(object_type);
        self
    }
}

impl ClientValue for ListItemCreationInformation {
    fn entity_type_name(&self) -> &'static str {
        "SP.ListItemCreationInformation"
    }
}

/// Input of [`List::add_item`].
#[derive(Clone, Debug, PartialEq)]
pub enum ItemCreation {
    /// Field values of the new item.
    Properties(Map<String, Value>),
    /// Structured creation information.
    CreationInfo(ListItemCreationInformation),
}

impl From<Map<String, Value>> for ItemCreation {
    fn from(properties: Map<String, Value>) -> Self {
        Self::Properties(properties)
    }
}

impl From<ListItemCreationInformation> for ItemCreation {
    fn from(info: ListItemCreationInformation) -> Self {
        Self::CreationInfo(info)
    }
}

impl TryFrom<Value> for ItemCreation {
    type Error = ClientError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let kind = match value {
            Value::Object(properties) => return Ok(Self::Properties(properties)),
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        };
        Err(ClientError::UnsupportedItemPayload { kind })
    }
}
