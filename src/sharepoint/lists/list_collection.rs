//! The lists of a site.

use crate::runtime::{ClientObject, Entity, EntityCollection, PathParameter};
use super::list::LIST_IDENTITY;
use crate::sharepoint::List;

/// The lists of a site.
///
/// Members hydrated from a response bind `GetById`/`GetByTitle` paths below
/// this collection.
#[derive(Clone, Debug)]
pub struct ListCollection {
    object: ClientObject,
}

impl Entity for ListCollection {
    const NAME: &'static str = "Collection(SP.List)";

    fn from_object(object: ClientObject) -> Self {
        object.set_child_identity_resolver(LIST_IDENTITY);
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl EntityCollection for ListCollection {
    type Item = List;
}

impl ListCollection {
    /// Returns the list with the given title. No query is enqueued.
    #[must_use]
    pub fn get_by_title(&self, title: &str) -> List {
        self.get_by("GetByTitle", title.into())
    }

    /// Returns the list with the given id (a GUID). No query is enqueued.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> List {
        self.get_by("GetById", PathParameter::Guid(id.to_string()))
    }

    fn get_by(&self, operation: &str, param: PathParameter) -> List {
        List::new(
            self.object.context(),
            self.resource_path()
                .map(|path| path.service_operation(operation, Some(vec![param]))),
        )
    }
}
