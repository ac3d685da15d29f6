//! HTTP client for SharePoint REST communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests against a site's `_api` service root.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::ClientConfig;

/// Service root appended to the site URL.
pub const API_BASE_PATH: &str = "/_api";

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the SharePoint REST service.
///
/// The client handles:
/// - Base URI construction from the configured site URL
/// - Default headers including User-Agent, OData Accept and bearer token
/// - SharePoint error envelope parsing
///
/// Requests are sent once; there is no automatic retry.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use sharepoint_api::{ClientConfig, SiteUrl};
/// use sharepoint_api::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let config = ClientConfig::builder()
///     .site_url(SiteUrl::new("https://contoso.sharepoint.com/sites/dev")?)
///     .build()?;
///
/// let client = HttpClient::new("/_api", &config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "Web/Lists")
///     .build()?;
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (the site URL, e.g. `https://contoso.sharepoint.com/sites/dev`).
    base_uri: String,
    /// Base path (e.g. `/_api`).
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the configured site.
    ///
    /// # Arguments
    ///
    /// * `base_path` - The service root appended to the site URL (normally [`API_BASE_PATH`])
    /// * `config` - Configuration providing the site URL, token and user agent prefix
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(base_path: impl Into<String>, config: &ClientConfig) -> Result<Self, HttpError> {
        let base_path = base_path.into();
        let base_uri = config.site_url().as_ref().to_string();

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}SharePoint API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert(
            "Accept".to_string(),
            "application/json;odata=verbose".to_string(),
        );

        if let Some(token) = config.access_token() {
            default_headers.insert(
                "Authorization".to_string(),
                format!("Bearer {}", token.as_ref()),
            );
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri,
            base_path,
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Builds the absolute URL for a service-relative path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_uri, self.base_path, path)
    }

    /// Sends an HTTP request to the SharePoint REST service.
    ///
    /// This method handles:
    /// - Request validation
    /// - URL construction
    /// - Header merging
    /// - Response parsing
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!("{} {}", request.http_method, url);

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.unwrap_or_default();

        let body = if body_text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text)
                .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
        };

        let response = HttpResponse::new(code, res_headers, body);

        if response.is_ok() {
            return Ok(response);
        }

        let message = Self::serialize_error(&response);
        tracing::warn!(
            "Request to {} failed with status {}: {}",
            request.path,
            code,
            message
        );

        Err(HttpError::Response(HttpResponseError {
            code,
            message,
            error_reference: response.request_id().map(String::from),
        }))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Produces the error message for a non-2xx response.
    fn serialize_error(response: &HttpResponse) -> String {
        if let Some(message) = response.odata_error_message() {
            return message.to_string();
        }
        if let Some(raw) = response.body.get("raw_body").and_then(|v| v.as_str()) {
            return raw.to_string();
        }
        format!("Request failed with status {}", response.code)
    }
}
