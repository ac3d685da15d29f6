//! HTTP-specific error types for the SharePoint API SDK.
//!
//! This module contains error types for HTTP operations, including response
//! errors and request validation failures.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the service
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use sharepoint_api::clients::{HttpClient, HttpRequest, HttpMethod, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("Service error {}: {}", e.code, e.message);
//!     }
//!     Err(HttpError::InvalidRequest(e)) => {
//!         println!("Invalid request: {}", e);
//!     }
//!     Err(HttpError::Network(e)) => {
//!         println!("Network error: {}", e);
//!     }
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// The message is taken from the SharePoint error envelope when one is
/// present, otherwise it is the raw response body.
///
/// # Example
///
/// ```rust
/// use sharepoint_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "List 'Tasks' does not exist.".to_string(),
///     error_reference: Some("6a1f2c9f-0000-1000-0000-000000000000".to_string()),
/// };
///
/// assert_eq!(error.to_string(), "List 'Tasks' does not exist.");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The error message reported by the service.
    pub message: String,
    /// Correlation id for error reporting (from the `request-id` or `SPRequestGuid` header).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent if it fails validation
/// checks, such as:
/// - Missing body for PUT/PATCH requests
/// - Body provided without `body_type`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_displays_message() {
        let error = HttpResponseError {
            code: 404,
            message: "File Not Found.".to_string(),
            error_reference: None,
        };
        assert_eq!(error.to_string(), "File Not Found.");
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "patch".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot use patch without specifying data."
        );
    }

    #[test]
    fn test_invalid_request_error_missing_body_type() {
        let error = InvalidHttpRequestError::MissingBodyType;
        assert_eq!(
            error.to_string(),
            "Cannot set a body without also setting body_type."
        );
    }

    #[test]
    fn test_http_error_wraps_response_error() {
        let error: HttpError = HttpResponseError {
            code: 500,
            message: "boom".to_string(),
            error_reference: None,
        }
        .into();
        assert!(matches!(error, HttpError::Response(ref e) if e.code == 500));
        assert_eq!(error.to_string(), "boom");
    }
}
