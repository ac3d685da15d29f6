//! Sites (webs).

use crate::runtime::{ClientContext, ClientObject, Entity, PropertyState, ResourcePath};
use crate::sharepoint::ListCollection;

/// A SharePoint site.
#[derive(Clone, Debug)]
pub struct Web {
    object: ClientObject,
}

impl Entity for Web {
    const NAME: &'static str = "SP.Web";
    const NAVIGATION_PROPERTIES: &'static [&'static str] = &["Lists"];

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl Web {
    /// The lists of the site.
    #[must_use]
    pub fn lists(&self) -> ListCollection {
        self.navigation_property("Lists", "Lists")
    }

    /// The site title.
    #[must_use]
    pub fn title(&self) -> PropertyState<String> {
        self.object.get_property("Title")
    }

    /// The absolute URL of the site.
    #[must_use]
    pub fn url(&self) -> PropertyState<String> {
        self.object.get_property("Url")
    }

    /// The server-relative URL of the site.
    #[must_use]
    pub fn server_relative_url(&self) -> PropertyState<String> {
        self.object.get_property("ServerRelativeUrl")
    }
}

impl ClientContext {
    /// Returns the site this context is bound to. No query is enqueued.
    #[must_use]
    pub fn web(&self) -> Web {
        Web::new(self, Some(ResourcePath::new("Web")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_web_lists_path() {
        let ctx = crate::sharepoint::test_support::context();
        let lists = ctx.web().lists();
        assert_eq!(
            lists.resource_path().map(|p| p.to_url()),
            Some("Web/Lists".to_string())
        );
        assert_eq!(ctx.pending_count(), 0);
    }

    #[test]
    fn test_web_properties_after_load() {
        let ctx = crate::sharepoint::test_support::context();
        let web = ctx.web();
        assert_eq!(web.title(), PropertyState::Unfetched);

        web.object().apply_json(&json!({
            "__metadata": {"type": "SP.Web"},
            "Title": "Dev",
            "Url": "https://contoso.sharepoint.com/sites/dev",
            "ServerRelativeUrl": "/sites/dev",
            "Lists": {"__deferred": {"uri": "https://contoso.sharepoint.com/sites/dev/_api/Web/Lists"}}
        }));

        assert_eq!(web.title(), PropertyState::Fetched("Dev".to_string()));
        assert_eq!(web.server_relative_url(), PropertyState::Fetched("/sites/dev".to_string()));
        assert!(!web.is_property_available("Lists"));
    }
}
