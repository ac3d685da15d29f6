//! List views.

use crate::runtime::{ClientObject, Entity, EntityCollection, PropertyState};

/// A list view.
#[derive(Clone, Debug)]
pub struct View {
    object: ClientObject,
}

impl Entity for View {
    const NAME: &'static str = "SP.View";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl View {
    /// The view id.
    #[must_use]
    pub fn id(&self) -> PropertyState<String> {
        self.object.get_property("Id")
    }

    /// The view title.
    #[must_use]
    pub fn title(&self) -> PropertyState<String> {
        self.object.get_property("Title")
    }

    /// The CAML `<Query>` of the view.
    #[must_use]
    pub fn view_query(&self) -> PropertyState<String> {
        self.object.get_property("ViewQuery")
    }

    /// Whether this is the list's default view.
    #[must_use]
    pub fn default_view(&self) -> PropertyState<bool> {
        self.object.get_property("DefaultView")
    }
}

/// The views of a list.
#[derive(Clone, Debug)]
pub struct ViewCollection {
    object: ClientObject,
}

impl Entity for ViewCollection {
    const NAME: &'static str = "Collection(SP.View)";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl EntityCollection for ViewCollection {
    type Item = View;
}

impl ViewCollection {
    /// Returns the view with the given title. No query is enqueued.
    #[must_use]
    pub fn get_by_title(&self, title: &str) -> View {
        View::new(
            self.object.context(),
            self.resource_path()
                .map(|path| path.service_operation("GetByTitle", Some(vec![title.into()]))),
        )
    }
}
