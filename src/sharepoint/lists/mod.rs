//! SharePoint lists.
//!
//! [`List`] is the proxy for a single list; [`ListCollection`] addresses
//! the lists of a site by title or id.

mod list;
mod list_collection;

pub use list::List;
pub use list_collection::ListCollection;
