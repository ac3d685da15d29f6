//! HTTP response types for the SharePoint API SDK.
//!
//! This module provides the [`HttpResponse`] type for accessing response
//! data returned by the SharePoint REST service.

use std::collections::HashMap;

/// An HTTP response from the SharePoint REST service.
///
/// Header names are stored lowercased; a header may carry several values.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the correlation id of the request, if present.
    ///
    /// SharePoint Online sends `request-id`; on-premises farms send
    /// `SPRequestGuid`. Either is useful when reporting an error.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("request-id")
            .or_else(|| self.header("sprequestguid"))
    }

    /// Extracts the message of an OData error envelope, if the body is one.
    ///
    /// Handles both the verbose shape (`{"error": {"message": {"value": ..}}}`)
    /// and the minimal shape (`{"odata.error": {"message": {"value": ..}}}`),
    /// as well as a plain string message.
    #[must_use]
    pub fn odata_error_message(&self) -> Option<&str> {
        let error = self
            .body
            .get("error")
            .or_else(|| self.body.get("odata.error"))?;
        let message = error.get("message")?;
        message
            .get("value")
            .and_then(serde_json::Value::as_str)
            .or_else(|| message.as_str())
    }
}
