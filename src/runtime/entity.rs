//! Typed facades over [`ClientObject`].
//!
//! Every SharePoint resource type is a small struct wrapping a
//! [`ClientObject`]. The [`Entity`] trait gives them a common constructor
//! and shared accessors; [`EntityCollection`] adds typed access to
//! collection members.
//!
//! # Implementing an Entity
//!
//! ```rust,ignore
//! use sharepoint_api::runtime::{ClientObject, Entity};
//!
//! #[derive(Clone, Debug)]
//! pub struct Folder {
//!     object: ClientObject,
//! }
//!
//! impl Entity for Folder {
//!     const NAME: &'static str = "SP.Folder";
//!
//!     fn from_object(object: ClientObject) -> Self {
//!         Self { object }
//!     }
//!
//!     fn object(&self) -> &ClientObject {
//!         &self.object
//!     }
//! }
//!
//! let folder = Folder::new(&ctx, Some(ResourcePath::new("Web").child("RootFolder")));
//! ```

use crate::runtime::client_object::{ClientObject, PropertyState};
use crate::runtime::context::ClientContext;
use crate::runtime::path::ResourcePath;

/// A typed SharePoint resource proxy.
pub trait Entity: Clone + Sized {
    /// The default server-side entity type (e.g., `SP.List`).
    ///
    /// Sent as `__metadata.type` in update payloads until a response
    /// supplies the concrete type.
    const NAME: &'static str;

    /// Property names that hold nested entities rather than values.
    ///
    /// Selecting one of these in [`load`](Entity::load) also expands it.
    const NAVIGATION_PROPERTIES: &'static [&'static str] = &[];

    /// Wraps an existing object handle.
    ///
    /// Implementations may install identity resolvers on the object.
    fn from_object(object: ClientObject) -> Self;

    /// Returns the wrapped object handle.
    fn object(&self) -> &ClientObject;

    /// Creates a proxy bound to `path` (or unbound) with the default entity type.
    #[must_use]
    fn new(context: &ClientContext, path: Option<ResourcePath>) -> Self {
        let object = ClientObject::new(context, path);
        object.set_entity_type_name(Self::NAME);
        Self::from_object(object)
    }

    /// Returns the context executing this entity's queries.
    #[must_use]
    fn context(&self) -> &ClientContext {
        self.object().context()
    }

    /// Returns the resource path, if bound.
    #[must_use]
    fn resource_path(&self) -> Option<ResourcePath> {
        self.object().resource_path()
    }

    /// Returns the path of a navigation segment below this entity.
    #[must_use]
    fn child_path(&self, segment: &str) -> Option<ResourcePath> {
        self.object().child_path(segment)
    }

    /// Returns `true` if the property has been populated.
    #[must_use]
    fn is_property_available(&self, name: &str) -> bool {
        self.object().is_property_available(name)
    }

    /// Returns a navigation property as a typed proxy.
    ///
    /// A fetched value is returned as-is. Otherwise a fresh proxy bound to
    /// `<this path>/<segment>` is returned; no query is enqueued.
    #[must_use]
    fn navigation_property<E: Entity>(&self, property: &str, segment: &str) -> E {
        match self.object().object_property(property) {
            PropertyState::Fetched(object) => E::from_object(object),
            PropertyState::Unfetched => E::new(self.context(), self.child_path(segment)),
        }
    }

    /// Enqueues a read of this entity, restricted to `select` when non-empty.
    ///
    /// Selected navigation properties are expanded, so after execution
    /// their getters return the hydrated proxy.
    fn load(&self, select: &[&str]) -> &Self {
        let expand: Vec<&str> = select
            .iter()
            .copied()
            .filter(|name| Self::NAVIGATION_PROPERTIES.contains(name))
            .collect();
        self.context().load_expanded(self.object(), select, &expand);
        self
    }
}

/// A typed collection of SharePoint resources.
pub trait EntityCollection: Entity {
    /// The member type.
    type Item: Entity;

    /// Returns the number of loaded members.
    #[must_use]
    fn len(&self) -> usize {
        self.object().child_count()
    }

    /// Returns `true` if no members are loaded.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the member at `index`.
    #[must_use]
    fn get(&self, index: usize) -> Option<Self::Item> {
        self.object()
            .children()
            .into_iter()
            .nth(index)
            .map(<Self::Item as Entity>::from_object)
    }

    /// Returns all loaded members.
    #[must_use]
    fn items(&self) -> Vec<Self::Item> {
        self.object()
            .children()
            .into_iter()
            .map(<Self::Item as Entity>::from_object)
            .collect()
    }

    /// Adds a member locally.
    fn add_child(&self, item: &Self::Item) {
        self.object().add_child(item.object());
    }
}
