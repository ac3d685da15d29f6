//! Deferred query descriptions.
//!
//! A [`ClientQuery`] captures the intent of exactly one HTTP request. Queries
//! are built by entity methods, queued on the
//! [`ClientContext`](crate::ClientContext), and only turned into requests
//! when the context is executed.
//!
//! # Request mapping
//!
//! | Query | Request |
//! |---|---|
//! | `Read` | `GET <path>?$select=...&$expand=...` |
//! | `ServiceOperation` | `POST <binding path>/<Name(args)>` with the payload as body |
//! | `UpdateEntity` | `POST <path>` with `X-HTTP-Method: MERGE`, `IF-MATCH: *` |
//! | `DeleteEntity` | `DELETE <path>` with `IF-MATCH: *` |

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::{DataType, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder};
use crate::runtime::client_object::ClientObject;
use crate::runtime::client_result::ValueSink;
use crate::runtime::errors::ClientError;
use crate::runtime::odata;
use crate::runtime::path::{PathParameter, ResourcePath};

/// The body of a service operation.
#[derive(Clone, Debug)]
pub enum Payload {
    /// A ready JSON value.
    Json(Value),
    /// An entity whose changed properties are serialized at execution time.
    Entity(ClientObject),
}

impl Payload {
    /// Serializes the payload.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Entity(object) => object.to_json(),
        }
    }
}

/// Where the result of a service operation goes.
#[derive(Clone)]
pub enum ReturnType {
    /// An entity or collection proxy, hydrated from the response.
    Object(ClientObject),
    /// A single-value container, filled with the unwrapped return value.
    Value(Arc<dyn ValueSink>),
}

impl ReturnType {
    /// Returns the object sink, if this is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ClientObject> {
        match self {
            Self::Object(object) => Some(object),
            Self::Value(_) => None,
        }
    }
}

impl fmt::Debug for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(object) => f.debug_tuple("Object").field(object).finish(),
            Self::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// A call of a named service operation on a bound resource.
///
/// # Example
///
/// ```rust,ignore
/// let query = ServiceOperationQuery::new(list.object(), "GetItems")
///     .payload(Payload::Json(CamlQuery::all_items().to_json()))
///     .payload_key("query")
///     .returns(ReturnType::Object(items.object().clone()));
/// ```
#[derive(Clone, Debug)]
pub struct ServiceOperationQuery {
    binding: ClientObject,
    method_name: String,
    method_params: Option<Vec<PathParameter>>,
    payload: Option<Payload>,
    payload_key: Option<String>,
    return_type: Option<ReturnType>,
}

impl ServiceOperationQuery {
    /// Creates a parameterless call of `method_name` on `binding`.
    #[must_use]
    pub fn new(binding: &ClientObject, method_name: impl Into<String>) -> Self {
        Self {
            binding: binding.clone(),
            method_name: method_name.into(),
            method_params: None,
            payload: None,
            payload_key: None,
            return_type: None,
        }
    }

    /// Sets the positional path arguments.
    #[must_use]
    pub fn params(mut self, params: Vec<PathParameter>) -> Self {
        self.method_params = Some(params);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Wraps the body under `key` (e.g. `{"query": {...}}`).
    #[must_use]
    pub fn payload_key(mut self, key: impl Into<String>) -> Self {
        self.payload_key = Some(key.into());
        self
    }

    /// Sets the result sink.
    #[must_use]
    pub fn returns(mut self, return_type: ReturnType) -> Self {
        self.return_type = Some(return_type);
        self
    }

    /// Returns the object the operation is invoked on.
    #[must_use]
    pub const fn binding(&self) -> &ClientObject {
        &self.binding
    }

    /// Returns the operation name.
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Returns the positional path arguments.
    #[must_use]
    pub fn method_params(&self) -> Option<&[PathParameter]> {
        self.method_params.as_deref()
    }

    /// Returns the unwrapped payload.
    #[must_use]
    pub const fn payload_value(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Returns the wrapper key of the payload.
    #[must_use]
    pub fn payload_key_name(&self) -> Option<&str> {
        self.payload_key.as_deref()
    }

    /// Returns the result sink.
    #[must_use]
    pub const fn return_type(&self) -> Option<&ReturnType> {
        self.return_type.as_ref()
    }

    /// Serializes the request body, wrapped under the payload key if one is set.
    #[must_use]
    pub fn body(&self) -> Option<Value> {
        let payload = self.payload.as_ref()?.to_json();
        Some(match &self.payload_key {
            Some(key) => {
                let mut wrapper = Map::new();
                wrapper.insert(key.clone(), payload);
                Value::Object(wrapper)
            }
            None => payload,
        })
    }
}

/// One deferred HTTP operation.
#[derive(Clone, Debug)]
pub enum ClientQuery {
    /// Load the target's properties.
    Read {
        /// The object to populate.
        target: ClientObject,
        /// Properties to select; empty selects the default set.
        select: Vec<String>,
        /// Navigation properties to return inline instead of as deferred links.
        expand: Vec<String>,
    },
    /// Invoke a service operation.
    ServiceOperation(ServiceOperationQuery),
    /// Send the target's changed properties.
    UpdateEntity {
        /// The object to update.
        target: ClientObject,
    },
    /// Delete the target on the server.
    DeleteEntity {
        /// The object to delete.
        target: ClientObject,
    },
}

impl ClientQuery {
    /// Returns the object the query acts on.
    #[must_use]
    pub const fn target(&self) -> &ClientObject {
        match self {
            Self::Read { target, .. }
            | Self::UpdateEntity { target }
            | Self::DeleteEntity { target } => target,
            Self::ServiceOperation(operation) => &operation.binding,
        }
    }

    /// Returns a short label for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::ServiceOperation(_) => "service operation",
            Self::UpdateEntity { .. } => "update",
            Self::DeleteEntity { .. } => "delete",
        }
    }

    /// Returns the service operation, if this is one.
    #[must_use]
    pub const fn as_service_operation(&self) -> Option<&ServiceOperationQuery> {
        match self {
            Self::ServiceOperation(operation) => Some(operation),
            _ => None,
        }
    }

    /// Builds the HTTP request for this query.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnresolvedPath`] if the target is unbound.
    pub fn to_request(&self) -> Result<HttpRequest, ClientError> {
        let builder = match self {
            Self::Read {
                target,
                select,
                expand,
            } => {
                let path = resolve_path(target)?;
                let mut builder = HttpRequest::builder(HttpMethod::Get, path.to_url());
                if !select.is_empty() {
                    builder = builder.query_param("$select", select.join(","));
                }
                if !expand.is_empty() {
                    builder = builder.query_param("$expand", expand.join(","));
                }
                builder
            }
            Self::ServiceOperation(operation) => {
                let path = resolve_path(&operation.binding)?.service_operation(
                    operation.method_name.clone(),
                    operation.method_params.clone(),
                );
                let builder = HttpRequest::builder(HttpMethod::Post, path.to_url());
                match operation.body() {
                    Some(body) => builder.body(body).body_type(DataType::Json),
                    None => builder,
                }
            }
            Self::UpdateEntity { target } => {
                let path = resolve_path(target)?;
                HttpRequest::builder(HttpMethod::Post, path.to_url())
                    .body(target.to_json())
                    .body_type(DataType::Json)
                    .header("X-HTTP-Method", "MERGE")
                    .header("IF-MATCH", "*")
            }
            Self::DeleteEntity { target } => {
                let path = resolve_path(target)?;
                HttpRequest::builder(HttpMethod::Delete, path.to_url()).header("IF-MATCH", "*")
            }
        };
        build(builder)
    }

    /// Applies a successful response body to the query's sink.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Deserialize`] if a value sink cannot accept
    /// the returned value.
    pub fn apply_response(&self, body: &Value) -> Result<(), ClientError> {
        match self {
            Self::Read { target, expand, .. } => {
                target.apply_json_expanding(odata::unwrap_envelope(body), expand);
            }
            Self::ServiceOperation(operation) => match &operation.return_type {
                Some(ReturnType::Object(object)) => {
                    object.apply_json(odata::unwrap_envelope(body));
                    object.mark_clean();
                }
                Some(ReturnType::Value(sink)) => sink.set_json(odata::scalar_value(body))?,
                None => {}
            },
            Self::UpdateEntity { target } => target.mark_clean(),
            Self::DeleteEntity { .. } => {}
        }
        Ok(())
    }
}

fn resolve_path(object: &ClientObject) -> Result<ResourcePath, ClientError> {
    object
        .resource_path()
        .ok_or_else(|| ClientError::UnresolvedPath {
            entity: object
                .entity_type_name()
                .unwrap_or_else(|| "ClientObject".to_string()),
        })
}

fn build(builder: HttpRequestBuilder) -> Result<HttpRequest, ClientError> {
    builder
        .build()
        .map_err(|error| ClientError::Http(HttpError::from(error)))
}
