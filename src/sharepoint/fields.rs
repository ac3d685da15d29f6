//! List fields and lookup relationships.

use crate::runtime::{ClientObject, Entity, EntityCollection, PropertyState};

/// A field (column) of a list.
#[derive(Clone, Debug)]
pub struct Field {
    object: ClientObject,
}

impl Entity for Field {
    const NAME: &'static str = "SP.Field";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl Field {
    /// The display name.
    #[must_use]
    pub fn title(&self) -> PropertyState<String> {
        self.object.get_property("Title")
    }

    /// The internal name used in CAML and item payloads.
    #[must_use]
    pub fn internal_name(&self) -> PropertyState<String> {
        self.object.get_property("InternalName")
    }

    /// The field type name (e.g., `Text`, `Lookup`).
    #[must_use]
    pub fn type_as_string(&self) -> PropertyState<String> {
        self.object.get_property("TypeAsString")
    }
}

/// The fields of a list.
#[derive(Clone, Debug)]
pub struct FieldCollection {
    object: ClientObject,
}

impl Entity for FieldCollection {
    const NAME: &'static str = "Collection(SP.Field)";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl EntityCollection for FieldCollection {
    type Item = Field;
}

impl FieldCollection {
    /// Returns the field with the given internal name or title. No query
    /// is enqueued.
    #[must_use]
    pub fn get_by_internal_name_or_title(&self, name: &str) -> Field {
        Field::new(
            self.object.context(),
            self.resource_path().map(|path| {
                path.service_operation("GetByInternalNameOrTitle", Some(vec![name.into()]))
            }),
        )
    }
}

/// A lookup field in another list that uses this list as its source.
#[derive(Clone, Debug)]
pub struct RelatedField {
    object: ClientObject,
}

impl Entity for RelatedField {
    const NAME: &'static str = "SP.RelatedField";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl RelatedField {
    /// The id of the lookup field.
    #[must_use]
    pub fn field_id(&self) -> PropertyState<String> {
        self.object.get_property("FieldId")
    }

    /// The id of the list containing the lookup field.
    #[must_use]
    pub fn list_id(&self) -> PropertyState<String> {
        self.object.get_property("ListId")
    }
}

/// The related fields of a list.
#[derive(Clone, Debug)]
pub struct RelatedFieldCollection {
    object: ClientObject,
}

impl Entity for RelatedFieldCollection {
    const NAME: &'static str = "Collection(SP.RelatedField)";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl EntityCollection for RelatedFieldCollection {
    type Item = RelatedField;
}
