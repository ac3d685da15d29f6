//! Checked-out files.

use crate::runtime::{ClientObject, Entity, EntityCollection, PropertyState};

/// A file checked out by a user, as reported by `GetCheckedOutFiles`.
#[derive(Clone, Debug)]
pub struct CheckedOutFile {
    object: ClientObject,
}

impl Entity for CheckedOutFile {
    const NAME: &'static str = "SP.CheckedOutFile";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl CheckedOutFile {
    /// The id of the user holding the checkout.
    #[must_use]
    pub fn checked_out_by_id(&self) -> PropertyState<i64> {
        self.object.get_property("CheckedOutById")
    }

    /// The server-relative URL of the file.
    ///
    /// Read from `ServerRelativePath.DecodedUrl`.
    #[must_use]
    pub fn server_relative_url(&self) -> PropertyState<String> {
        self.object
            .get_property::<serde_json::Value>("ServerRelativePath")
            .fetched()
            .and_then(|path| path.get("DecodedUrl")?.as_str().map(String::from))
            .map_or(PropertyState::Unfetched, PropertyState::Fetched)
    }
}

/// The files checked out in a list.
#[derive(Clone, Debug)]
pub struct CheckedOutFileCollection {
    object: ClientObject,
}

impl Entity for CheckedOutFileCollection {
    const NAME: &'static str = "Collection(SP.CheckedOutFile)";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl EntityCollection for CheckedOutFileCollection {
    type Item = CheckedOutFile;
}
