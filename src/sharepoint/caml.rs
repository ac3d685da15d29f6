//! CAML queries for list item retrieval.

use serde::Serialize;

use crate::runtime::ClientValue;

/// A CAML query passed to `GetItems`.
///
/// # Example
///
/// ```rust
/// use sharepoint_api::sharepoint::CamlQuery;
///
/// let query = CamlQuery::all_items();
/// assert_eq!(query.view_xml, r#"<View Scope="RecursiveAll"><Query></Query></View>"#);
///
/// let query = CamlQuery::new("<View><RowLimit>10</RowLimit></View>")
///     .folder_server_relative_url("/sites/dev/Lists/Tasks/Archive");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CamlQuery {
    /// The `<View>` element describing the query.
    pub view_xml: String,
    /// Restricts the query to a folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_server_relative_url: Option<String>,
    /// Whether to return dates in UTC.
    #[serde(rename = "DatesInUtc", skip_serializing_if = "Option::is_none")]
    pub dates_in_utc: Option<bool>,
}

impl CamlQuery {
    /// Creates a query from raw view XML.
    #[must_use]
    pub fn new(view_xml: impl Into<String>) -> Self {
        Self {
            view_xml: view_xml.into(),
            ..Self::default()
        }
    }

    /// Returns a query matching every item in every folder.
    #[must_use]
    pub fn all_items() -> Self {
        Self::new(r#"<View Scope="RecursiveAll"><Query></Query></View>"#)
    }

    /// Restricts the query to a folder.
    #[must_use]
    pub fn folder_server_relative_url(mut self, url: impl Into<String>) -> Self {
        self.folder_server_relative_url = Some(url.into());
        self
    }
}

impl ClientValue for CamlQuery {
    fn entity_type_name(&self) -> &'static str {
        "SP.CamlQuery"
    }
}
