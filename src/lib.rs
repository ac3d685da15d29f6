//! # SharePoint API Rust SDK
//!
//! A Rust SDK for the SharePoint REST API, providing type-safe configuration,
//! lazily addressed resource proxies and a deferred query runtime.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the site URL and bearer token
//! - A [`ClientContext`] that queues queries and executes them in order
//! - Resource proxies for lists, items, folders, fields, views and more
//!   via [`sharepoint`]
//! - Site provisioning through [`sharepoint::SiteManager`]
//!
//! ## Quick Start
//!
//! ```rust
//! use sharepoint_api::{ClientConfig, ClientContext, SiteUrl, AccessToken};
//!
//! let config = ClientConfig::builder()
//!     .site_url(SiteUrl::new("https://contoso.sharepoint.com/sites/dev").unwrap())
//!     .access_token(AccessToken::new("eyJ0eXAi...").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let ctx = ClientContext::new(config).unwrap();
//! let list = ctx.web().lists().get_by_title("Tasks");
//!
//! // Navigation never touches the network
//! assert_eq!(ctx.pending_count(), 0);
//! # let _ = list;
//! ```
//!
//! ## Queries
//!
//! Operations enqueue queries; nothing is sent until
//! [`ClientContext::execute_query`] is awaited:
//!
//! ```rust,ignore
//! use sharepoint_api::sharepoint::ItemCreation;
//! use serde_json::json;
//!
//! let list = ctx.web().lists().get_by_title("Tasks");
//! let items = list.get_items(None);
//! let created = list.add_item(ItemCreation::try_from(json!({"Title": "Write docs"}))?);
//! ctx.execute_query().await?;
//!
//! println!("{} items, new item {:?}", items.len(), created.id());
//! ```
//!
//! ## Updating and Deleting
//!
//! ```rust,ignore
//! let item = list.get_item_by_id(7);
//! item.set_field_value("Title", "Done").update();
//! list.get_item_by_id(8).delete_object();
//! ctx.execute_query().await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Every proxy holds an explicit context handle
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Lazy addressing**: Resource paths render to URLs only at execution time

pub mod clients;
pub mod config;
pub mod error;
pub mod runtime;
pub mod sharepoint;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, ClientConfig, ClientConfigBuilder, SiteUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError,
};

// Re-export runtime types
pub use runtime::{
    ClientContext, ClientError, ClientObject, ClientQuery, ClientResult, Entity, EntityCollection,
    PropertyState, ResourcePath,
};

// Re-export the most used resource types
pub use sharepoint::{
    CamlQuery, ItemCreation, List, ListCollection, ListItem, ListItemCollection,
    ListItemCreationInformation, Web,
};
