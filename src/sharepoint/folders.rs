//! Folders.

use crate::runtime::{ClientObject, Entity, PropertyState};

/// A folder in a list or document library.
#[derive(Clone, Debug)]
pub struct Folder {
    object: ClientObject,
}

impl Entity for Folder {
    const NAME: &'static str = "SP.Folder";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl Folder {
    /// The server-relative URL of the folder (e.g., `/sites/dev/Lists/Tasks`).
    #[must_use]
    pub fn server_relative_url(&self) -> PropertyState<String> {
        self.object.get_property("ServerRelativeUrl")
    }

    /// The folder name.
    #[must_use]
    pub fn name(&self) -> PropertyState<String> {
        self.object.get_property("Name")
    }

    /// The number of items in the folder.
    #[must_use]
    pub fn item_count(&self) -> PropertyState<i64> {
        self.object.get_property("ItemCount")
    }
}
