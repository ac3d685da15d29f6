//! HTTP client types for SharePoint REST communication.
//!
//! This module provides the transport layer underneath
//! [`ClientContext`](crate::ClientContext). It handles request validation,
//! header defaults and SharePoint error parsing.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, PUT, DELETE)
//! - [`DataType`]: Content types for request bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use sharepoint_api::{ClientConfig, SiteUrl};
//! use sharepoint_api::clients::{HttpClient, HttpRequest, HttpMethod, API_BASE_PATH};
//!
//! let config = ClientConfig::builder()
//!     .site_url(SiteUrl::new("https://contoso.sharepoint.com")?)
//!     .build()?;
//! let client = HttpClient::new(API_BASE_PATH, &config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "Web/Lists").build()?;
//! let response = client.request(request).await?;
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, API_BASE_PATH, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
