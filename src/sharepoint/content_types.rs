//! Content types.

use serde_json::Value;

use crate::runtime::{ClientObject, Entity, EntityCollection, PropertyState};

/// A content type associated with a list.
#[derive(Clone, Debug)]
pub struct ContentType {
    object: ClientObject,
}

impl Entity for ContentType {
    const NAME: &'static str = "SP.ContentType";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl ContentType {
    /// The content type name.
    #[must_use]
    pub fn name(&self) -> PropertyState<String> {
        self.object.get_property("Name")
    }

    /// The content type id (e.g., `0x0100...`).
    ///
    /// Verbose responses return the id as `{"StringValue": "0x01..."}`.
    #[must_use]
    pub fn id(&self) -> PropertyState<String> {
        match self.object.get_property::<Value>("Id") {
            PropertyState::Fetched(Value::String(id)) => PropertyState::Fetched(id),
            PropertyState::Fetched(value) => value
                .get("StringValue")
                .and_then(Value::as_str)
                .map_or(PropertyState::Unfetched, |id| {
                    PropertyState::Fetched(id.to_string())
                }),
            PropertyState::Unfetched => PropertyState::Unfetched,
        }
    }
}

/// The content types of a list.
#[derive(Clone, Debug)]
pub struct ContentTypeCollection {
    object: ClientObject,
}

impl Entity for ContentTypeCollection {
    const NAME: &'static str = "Collection(SP.ContentType)";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl EntityCollection for ContentTypeCollection {
    type Item = ContentType;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_reads_verbose_shape() {
        let ctx = crate::sharepoint::test_support::context();
        let content_type = ContentType::new(&ctx, None);
        content_type.object().apply_json(&json!({
            "Id": {"__metadata": {"type": "SP.ContentTypeId"}, "StringValue": "0x0100AB"},
            "Name": "Item"
        }));

        assert_eq!(content_type.id(), PropertyState::Fetched("0x0100AB".to_string()));
        assert_eq!(content_type.name(), PropertyState::Fetched("Item".to_string()));
    }

    #[test]
    fn test_id_reads_plain_string() {
        let ctx = crate::sharepoint::test_support::context();
        let content_type = ContentType::new(&ctx, None);
        content_type.object().set_property("Id", json!("0x01"), false);

        assert_eq!(content_type.id(), PropertyState::Fetched("0x01".to_string()));
    }
}
