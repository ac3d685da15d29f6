//! Error types for query construction and execution.
//!
//! The SDK maps transport failures onto semantic variants:
//!
//! - **404**: [`ClientError::NotFound`] - The addressed resource doesn't exist
//! - **Other 4xx/5xx**: [`ClientError::Http`] - Wrapped HTTP error
//!
//! # Example
//!
//! ```rust,ignore
//! use sharepoint_api::ClientError;
//!
//! match ctx.execute_query().await {
//!     Ok(()) => {}
//!     Err(ClientError::NotFound { path, .. }) => println!("{path} does not exist"),
//!     Err(e) => println!("Query failed: {e} (request id: {:?})", e.request_id()),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;

/// Error type for client object queries.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The addressed resource was not found (HTTP 404).
    #[error("Resource not found: {path}")]
    NotFound {
        /// The service-relative path that was requested.
        path: String,
        /// The correlation id reported by the server.
        request_id: Option<String>,
    },

    /// A query targets an object that never received a resource path.
    ///
    /// This happens when a proxy is created without a path and none of its
    /// identifying properties were set before execution.
    #[error("Cannot resolve a resource path for {entity}")]
    UnresolvedPath {
        /// The entity type of the unaddressable object.
        entity: String,
    },

    /// `add_item` received a JSON value that is neither a property map nor
    /// creation information.
    #[error("Unsupported list item payload: expected a JSON object, got {kind}")]
    UnsupportedItemPayload {
        /// The JSON kind that was supplied (e.g., "array", "string").
        kind: &'static str,
    },

    /// A response could not be deserialized into the expected type.
    #[error("Failed to deserialize response: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ClientError {
    /// Maps an HTTP error for the given path, turning a 404 into
    /// [`ClientError::NotFound`].
    #[must_use]
    pub fn from_http(error: HttpError, path: &str) -> Self {
        match error {
            HttpError::Response(response) if response.code == 404 => Self::NotFound {
                path: path.to_string(),
                request_id: response.error_reference,
            },
            other => Self::Http(other),
        }
    }

    /// Returns the server correlation id, if one was reported.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::NotFound { request_id, .. } => request_id.as_deref(),
            Self::Http(HttpError::Response(response)) => response.error_reference.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    fn response_error(code: u16) -> HttpError {
        HttpError::Response(HttpResponseError {
            code,
            message: "failure".to_string(),
            error_reference: Some("req-1".to_string()),
        })
    }

    #[test]
    fn test_404_maps_to_not_found() {
        let error = ClientError::from_http(response_error(404), "Web/Lists/GetByTitle('Nope')");

        assert!(matches!(
            error,
            ClientError::NotFound { ref path, .. } if path == "Web/Lists/GetByTitle('Nope')"
        ));
        assert_eq!(error.request_id(), Some("req-1"));
        assert!(error.to_string().contains("GetByTitle('Nope')"));
    }

    #[test]
    fn test_other_status_maps_to_http() {
        let error = ClientError::from_http(response_error(500), "Web");

        assert!(matches!(error, ClientError::Http(_)));
        assert_eq!(error.request_id(), Some("req-1"));
    }

    #[test]
    fn test_unsupported_item_payload_message() {
        let error = ClientError::UnsupportedItemPayload { kind: "array" };
        assert!(error.to_string().contains("array"));
    }

    #[test]
    fn test_unresolved_path_message() {
        let error = ClientError::UnresolvedPath {
            entity: "SP.List".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot resolve a resource path for SP.List");
        assert!(error.request_id().is_none());
    }
}
