//! List forms.

use crate::runtime::{ClientObject, Entity, EntityCollection, PropertyState};

/// A list form (display, edit or new).
#[derive(Clone, Debug)]
pub struct Form {
    object: ClientObject,
}

impl Entity for Form {
    const NAME: &'static str = "SP.Form";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl Form {
    /// The form type (`4` = display, `6` = edit, `8` = new).
    #[must_use]
    pub fn form_type(&self) -> PropertyState<i32> {
        self.object.get_property("FormType")
    }

    /// The server-relative URL of the form page.
    #[must_use]
    pub fn server_relative_url(&self) -> PropertyState<String> {
        self.object.get_property("ServerRelativeUrl")
    }
}

/// The forms of a list.
#[derive(Clone, Debug)]
pub struct FormCollection {
    object: ClientObject,
}

impl Entity for FormCollection {
    const NAME: &'static str = "Collection(SP.Form)";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl EntityCollection for FormCollection {
    type Item = Form;
}
