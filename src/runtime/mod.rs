//! Client object runtime.
//!
//! This module implements the machinery shared by all SharePoint proxies:
//! resource addressing, property tracking, deferred queries and the
//! context that executes them.
//!
//! # Overview
//!
//! - [`ResourcePath`]: Immutable, lazily rendered resource address
//! - [`ClientObject`]: Shared proxy handle (properties + path + context)
//! - [`PropertyState`]: Fetched/unfetched property lookup
//! - [`ClientQuery`]: One deferred HTTP operation
//! - [`ClientResult`]: Single-value result container
//! - [`ClientContext`]: Query queue and executor
//! - [`Entity`] / [`EntityCollection`]: Typed facades over `ClientObject`
//! - [`ClientError`]: Query execution errors

mod client_object;
mod client_result;
mod client_value;
mod context;
mod entity;
mod errors;
pub mod odata;
mod path;
mod query;
mod tracking;

pub use client_object::{ClientObject, IdentityResolver, PropertyState};
pub use client_result::{ClientResult, ValueSink};
pub use client_value::ClientValue;
pub use context::{ClientContext, Continuation, RequestHook};
pub use entity::{Entity, EntityCollection};
pub use errors::ClientError;
pub use path::{PathParameter, PathSegment, ResourcePath};
pub use query::{ClientQuery, Payload, ReturnType, ServiceOperationQuery};
pub use tracking::{PropertyBag, PropertyValue};
