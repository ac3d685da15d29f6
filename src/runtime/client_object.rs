//! The shared proxy handle behind every SharePoint entity.
//!
//! A [`ClientObject`] couples a property bag with an optional
//! [`ResourcePath`] and the [`ClientContext`] that executes its queries.
//! Typed entities such as [`List`](crate::sharepoint::List) are thin
//! wrappers around one.
//!
//! # Lifecycle
//!
//! An object starts either bound to a path (created by navigation) or
//! unbound (created locally, e.g. a new list item). An unbound object may
//! bind itself once, when one of its identifying properties is set and an
//! [`IdentityResolver`] can derive a path from its parent collection.
//! A server response populates its properties; `remove_from_parent_collection`
//! detaches it locally.
//!
//! # Thread Safety
//!
//! `ClientObject` is `Clone`, `Send` and `Sync`. Clones share state. Internal
//! locks are never held across calls into other objects or the context.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::runtime::context::ClientContext;
use crate::runtime::odata;
use crate::runtime::path::ResourcePath;
use crate::runtime::tracking::{PropertyBag, PropertyValue};

/// Whether a property has been populated.
///
/// Getters on typed entities branch on this instead of probing the
/// property bag ad hoc: a fetched value is returned verbatim, an unfetched
/// one falls back to a derived child proxy or to nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyState<T> {
    /// The property has a value, loaded or set locally.
    Fetched(T),
    /// The property has not been populated yet.
    Unfetched,
}

impl<T> PropertyState<T> {
    /// Returns `true` if the property has a value.
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    /// Converts into an `Option`, discarding the unfetched state.
    #[must_use]
    pub fn fetched(self) -> Option<T> {
        match self {
            Self::Fetched(value) => Some(value),
            Self::Unfetched => None,
        }
    }

    /// Maps a fetched value.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PropertyState<U> {
        match self {
            Self::Fetched(value) => PropertyState::Fetched(f(value)),
            Self::Unfetched => PropertyState::Unfetched,
        }
    }

    /// Returns the fetched value or computes a fallback.
    pub fn unwrap_or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            Self::Fetched(value) => value,
            Self::Unfetched => fallback(),
        }
    }
}

/// Derives a resource path for an unbound object from an identifying property.
///
/// The derive function receives the property name, its value and the
/// resource path of the object's parent collection.
#[derive(Clone, Copy)]
pub struct IdentityResolver {
    properties: &'static [&'static str],
    derive: fn(&str, &Value, &ResourcePath) -> Option<ResourcePath>,
}

impl IdentityResolver {
    /// Creates a resolver triggered by the given property names.
    #[must_use]
    pub const fn new(
        properties: &'static [&'static str],
        derive: fn(&str, &Value, &ResourcePath) -> Option<ResourcePath>,
    ) -> Self {
        Self { properties, derive }
    }

    /// Returns `true` if setting `name` may bind a path.
    #[must_use]
    pub fn applies_to(&self, name: &str) -> bool {
        self.properties.contains(&name)
    }

    /// Derives the path for `name = value` under `parent`.
    #[must_use]
    pub fn derive(&self, name: &str, value: &Value, parent: &ResourcePath) -> Option<ResourcePath> {
        (self.derive)(name, value, parent)
    }
}

impl fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

/// Back-reference from a member to the collection that holds it.
struct ParentCollection {
    path: Option<ResourcePath>,
    handle: Weak<ObjectInner>,
}

#[derive(Default)]
struct ObjectState {
    resource_path: Option<ResourcePath>,
    properties: PropertyBag,
    entity_type_name: Option<String>,
    parent: Option<ParentCollection>,
    detached: bool,
    children: Vec<ClientObject>,
    identity: Option<IdentityResolver>,
    child_identity: Option<IdentityResolver>,
}

struct ObjectInner {
    context: ClientContext,
    state: Mutex<ObjectState>,
}

/// Shared handle to a client-side resource proxy.
#[derive(Clone)]
pub struct ClientObject(Arc<ObjectInner>);

// Verify ClientObject is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientObject>();
};

impl ClientObject {
    /// Creates a proxy, bound to `resource_path` when one is given.
    #[must_use]
    pub fn new(context: &ClientContext, resource_path: Option<ResourcePath>) -> Self {
        Self(Arc::new(ObjectInner {
            context: context.clone(),
            state: Mutex::new(ObjectState {
                resource_path,
                ..ObjectState::default()
            }),
        }))
    }

    fn state(&self) -> MutexGuard<'_, ObjectState> {
        self.0.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the context executing this object's queries.
    #[must_use]
    pub fn context(&self) -> &ClientContext {
        &self.0.context
    }

    /// Returns `true` if both handles refer to the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the resource path, if bound.
    #[must_use]
    pub fn resource_path(&self) -> Option<ResourcePath> {
        self.state().resource_path.clone()
    }

    /// Binds the object to a path. Returns `false` if it was already bound.
    pub fn set_resource_path(&self, path: ResourcePath) -> bool {
        let mut state = self.state();
        if state.resource_path.is_some() {
            return false;
        }
        state.resource_path = Some(path);
        true
    }

    /// Returns the path of a navigation segment below this object.
    ///
    /// `None` while this object is unbound.
    #[must_use]
    pub fn child_path(&self, segment: &str) -> Option<ResourcePath> {
        self.state()
            .resource_path
            .as_ref()
            .map(|path| path.child(segment))
    }

    /// Returns the server-side entity type name, if known.
    #[must_use]
    pub fn entity_type_name(&self) -> Option<String> {
        self.state().entity_type_name.clone()
    }

    /// Sets the server-side entity type name.
    pub fn set_entity_type_name(&self, name: impl Into<String>) {
        self.state().entity_type_name = Some(name.into());
    }

    /// Installs the resolver that may bind this object from its own properties.
    pub fn set_identity_resolver(&self, resolver: IdentityResolver) {
        self.state().identity = Some(resolver);
    }

    /// Installs the resolver handed to members added to this collection.
    pub fn set_child_identity_resolver(&self, resolver: IdentityResolver) {
        self.state().child_identity = Some(resolver);
    }

    /// Returns `true` if the property has been populated.
    #[must_use]
    pub fn is_property_available(&self, name: &str) -> bool {
        self.state().properties.contains(name)
    }

    /// Returns a copy of a property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        self.state().properties.get(name).cloned()
    }

    /// Returns a property as a two-state value.
    #[must_use]
    pub fn property_state(&self, name: &str) -> PropertyState<PropertyValue> {
        self.property(name)
            .map_or(PropertyState::Unfetched, PropertyState::Fetched)
    }

    /// Returns a scalar property deserialized into `T`.
    ///
    /// A present value that does not deserialize into `T` (including a
    /// nested object) is reported as unfetched.
    #[must_use]
    pub fn get_property<T: DeserializeOwned>(&self, name: &str) -> PropertyState<T> {
        let value = match self.state().properties.get(name) {
            Some(PropertyValue::Scalar(value)) => value.clone(),
            _ => return PropertyState::Unfetched,
        };
        serde_json::from_value(value).map_or(PropertyState::Unfetched, PropertyState::Fetched)
    }

    /// Returns a nested object property.
    #[must_use]
    pub fn object_property(&self, name: &str) -> PropertyState<Self> {
        match self.state().properties.get(name) {
            Some(PropertyValue::Object(object)) => PropertyState::Fetched(object.clone()),
            _ => PropertyState::Unfetched,
        }
    }

    /// Stores a property.
    ///
    /// With `persist_changes` the property is recorded as changed and will
    /// be sent by the next update. If the object is still unbound and its
    /// identity resolver applies to `name`, a path is derived from the
    /// parent collection's path and adopted.
    pub fn set_property(
        &self,
        name: &str,
        value: impl Into<PropertyValue>,
        persist_changes: bool,
    ) -> &Self {
        let value = value.into();
        let mut state = self.state();

        let identity = match (&value, state.identity) {
            (PropertyValue::Scalar(scalar), Some(resolver))
                if state.resource_path.is_none() && resolver.applies_to(name) =>
            {
                Some((resolver, scalar.clone()))
            }
            _ => None,
        };

        state.properties.set(name, value, persist_changes);

        if let Some((resolver, scalar)) = identity {
            let parent_path = state.parent.as_ref().and_then(|p| p.path.clone());
            match parent_path {
                Some(parent_path) => {
                    if let Some(path) = resolver.derive(name, &scalar, &parent_path) {
                        tracing::debug!("Derived resource path {} from property {}", path, name);
                        state.resource_path = Some(path);
                    }
                }
                None => {
                    tracing::warn!(
                        "Cannot derive a resource path from property {}: object has no parent collection",
                        name
                    );
                }
            }
        }

        self
    }

    /// Runs `continuation` once `name` is populated.
    ///
    /// If the property is already available the continuation runs
    /// immediately. Otherwise a read of the property is queued and the
    /// continuation runs right after that read executes.
    pub fn ensure_property<F>(&self, name: &str, continuation: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_property_available(name) {
            continuation();
            return;
        }
        self.0
            .context
            .load_then(self, &[name], Box::new(continuation));
    }

    /// Adds a member to this collection.
    ///
    /// The member records this collection as its parent and inherits the
    /// collection's member identity resolver unless it has its own.
    pub fn add_child(&self, child: &Self) {
        let (path, resolver) = {
            let state = self.state();
            (state.resource_path.clone(), state.child_identity)
        };
        {
            let mut child_state = child.state();
            child_state.parent = Some(ParentCollection {
                path,
                handle: Arc::downgrade(&self.0),
            });
            child_state.detached = false;
            if child_state.identity.is_none() {
                child_state.identity = resolver;
            }
        }
        self.state().children.push(child.clone());
    }

    /// Returns the members of this collection.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.state().children.clone()
    }

    /// Returns the number of members of this collection.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.state().children.len()
    }

    /// Returns the resource path of the collection holding this object.
    #[must_use]
    pub fn parent_collection_path(&self) -> Option<ResourcePath> {
        self.state().parent.as_ref().and_then(|p| p.path.clone())
    }

    /// Detaches this object from its parent collection.
    ///
    /// Local only; if the collection proxy is gone, only the back-reference
    /// is dropped.
    pub fn remove_from_parent_collection(&self) {
        let parent = {
            let mut state = self.state();
            state.detached = true;
            state.parent.take()
        };
        if let Some(handle) = parent.and_then(|p| p.handle.upgrade()) {
            let collection = Self(handle);
            collection
                .state()
                .children
                .retain(|member| !member.ptr_eq(self));
        }
    }

    /// Returns `true` once [`remove_from_parent_collection`](Self::remove_from_parent_collection) ran.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.state().detached
    }

    /// Returns `true` if properties were changed locally.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.state().properties.is_dirty()
    }

    /// Returns the locally changed scalar properties.
    #[must_use]
    pub fn changed_fields(&self) -> Value {
        self.state().properties.changed_fields()
    }

    /// Forgets local changes.
    pub fn mark_clean(&self) {
        self.state().properties.mark_clean();
    }

    /// Serializes the changed properties as an entity payload, annotated
    /// with `__metadata.type` when the entity type is known.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let state = self.state();
        let mut payload = state.properties.changed_fields();
        if let (Value::Object(map), Some(type_name)) = (&mut payload, &state.entity_type_name) {
            map.insert("__metadata".to_string(), json!({ "type": type_name }));
        }
        payload
    }

    /// Populates this object from a response payload (envelope removed).
    ///
    /// Collections receive one member per entry. Expanded navigation
    /// properties become nested proxies; deferred links are skipped.
    pub fn apply_json(&self, value: &Value) {
        self.apply_json_expanding(value, &[]);
    }

    /// Populates this object from the response to a read that expanded
    /// `expand`.
    ///
    /// An expanded property is stored as a nested proxy even when its
    /// payload carries no entity metadata, such as an empty collection.
    pub fn apply_json_expanding(&self, value: &Value, expand: &[String]) {
        if let Some(type_name) = odata::metadata_type(value) {
            self.set_entity_type_name(type_name);
        }

        if let Some(entries) = odata::collection_entries(value) {
            for entry in entries {
                let member = Self::new(&self.0.context, None);
                self.add_child(&member);
                member.apply_json(entry);
            }
            return;
        }

        let Some(map) = value.as_object() else {
            return;
        };
        for (key, item) in map {
            if key == "__metadata" || odata::is_deferred(item) {
                continue;
            }
            let expanded = item.is_object() && expand.iter().any(|name| name == key);
            if expanded || odata::is_entity(item) {
                let nested = Self::new(&self.0.context, self.child_path(key));
                nested.apply_json(item);
                self.set_property(key, nested, false);
            } else {
                self.set_property(key, item.clone(), false);
            }
        }
    }
}

impl fmt::Debug for ClientObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("ClientObject")
            .field("resource_path", &state.resource_path)
            .field("entity_type_name", &state.entity_type_name)
            .field("properties", &state.properties.len())
            .field("children", &state.children.len())
            .finish()
    }
}
