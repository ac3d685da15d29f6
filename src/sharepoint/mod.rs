//! SharePoint resource proxies.
//!
//! Each type here wraps a [`ClientObject`](crate::runtime::ClientObject)
//! through the [`Entity`](crate::runtime::Entity) trait. Navigation is
//! free; operations enqueue queries on the owning
//! [`ClientContext`](crate::ClientContext).
//!
//! # Example
//!
//! ```rust,ignore
//! use sharepoint_api::sharepoint::{CamlQuery, ListItemCreationInformation};
//!
//! let list = ctx.web().lists().get_by_title("Documents");
//! let folder = list.add_item(
//!     ListItemCreationInformation::new()
//!         .leaf_name("Archive")
//!         .underlying_object_type(1),
//! );
//! let recent = list.get_items(Some(CamlQuery::new(
//!     "<View><RowLimit>10</RowLimit></View>",
//! )));
//! ctx.execute_query().await?;
//! ```

mod caml;
mod changes;
mod content_types;
mod fields;
mod files;
mod folders;
mod forms;
mod list_items;
pub mod lists;
mod portal;
mod views;
mod webs;

pub use caml::CamlQuery;
pub use changes::{Change, ChangeCollection, ChangeQuery};
pub use content_types::{ContentType, ContentTypeCollection};
pub use fields::{Field, FieldCollection, RelatedField, RelatedFieldCollection};
pub use files::{CheckedOutFile, CheckedOutFileCollection};
pub use folders::Folder;
pub use forms::{Form, FormCollection};
pub use list_items::{ItemCreation, ListItem, ListItemCollection, ListItemCreationInformation};
pub use lists::{List, ListCollection};
pub use portal::{
    SiteCreationRequest, SiteCreationResponse, SiteManager, SITE_STATUS_ERROR,
    SITE_STATUS_NOT_FOUND, SITE_STATUS_PROVISIONING, SITE_STATUS_READY,
};
pub use views::{View, ViewCollection};
pub use webs::Web;
