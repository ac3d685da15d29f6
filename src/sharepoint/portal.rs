//! Modern site provisioning through `SPSiteManager`.
//!
//! # Example
//!
//! ```rust,ignore
//! use sharepoint_api::sharepoint::SiteCreationRequest;
//!
//! let request = SiteCreationRequest::new("Marketing", "https://contoso.sharepoint.com/sites/marketing")
//!     .owner("admin@contoso.onmicrosoft.com");
//! let response = ctx.site_manager().create(request);
//! ctx.execute_query().await?;
//!
//! if response.value().is_some_and(|r| r.is_ready()) {
//!     println!("site ready");
//! }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::HttpMethod;
use crate::runtime::{
    ClientContext, ClientObject, ClientQuery, ClientResult, ClientValue, Entity, Payload,
    ResourcePath, ReturnType, ServiceOperationQuery,
};

/// `SiteStatus` of a site that does not exist.
pub const SITE_STATUS_NOT_FOUND: i32 = 0;
/// `SiteStatus` of a site still being provisioned.
pub const SITE_STATUS_PROVISIONING: i32 = 1;
/// `SiteStatus` of a site ready for use.
pub const SITE_STATUS_READY: i32 = 2;
/// `SiteStatus` of a site whose provisioning failed.
pub const SITE_STATUS_ERROR: i32 = 3;

/// Parameters of a new communication site.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SiteCreationRequest {
    /// The site title.
    pub title: String,
    /// The absolute URL of the new site.
    pub url: String,
    /// The site locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lcid: Option<u32>,
    /// The site description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The site classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    /// The site template (e.g., `SITEPAGEPUBLISHING#0`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_template: Option<String>,
    /// The site design to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_design_id: Option<String>,
    /// The owner's login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Whether content can be shared by email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_by_email_enabled: Option<bool>,
}

impl SiteCreationRequest {
    /// Creates a request for a communication site.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            web_template: Some("SITEPAGEPUBLISHING#0".to_string()),
            ..Self::default()
        }
    }

    /// Sets the owner.
    #[must_use]
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the locale.
    #[must_use]
    pub const fn lcid(mut self, lcid: u32) -> Self {
        self.lcid = Some(lcid);
        self
    }
}

impl ClientValue for SiteCreationRequest {
    fn entity_type_name(&self) -> &'static str {
        "Microsoft.SharePoint.Portal.SPSiteCreationRequest"
    }
}

/// Result of `Create` and `Status`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SiteCreationResponse {
    /// The site id.
    #[serde(default)]
    pub site_id: Option<String>,
    /// One of the `SITE_STATUS_*` values.
    #[serde(default)]
    pub site_status: i32,
    /// The absolute URL of the site.
    #[serde(default)]
    pub site_url: Option<String>,
}

impl SiteCreationResponse {
    /// Returns `true` once the site is provisioned.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.site_status == SITE_STATUS_READY
    }
}

/// Creates, deletes and reports on modern sites.
#[derive(Clone, Debug)]
pub struct SiteManager {
    object: ClientObject,
}

impl Entity for SiteManager {
    const NAME: &'static str = "Microsoft.SharePoint.Portal.SPSiteManager";

    fn from_object(object: ClientObject) -> Self {
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl SiteManager {
    fn enqueue(&self, query: ServiceOperationQuery) {
        self.object
            .context()
            .add_query(ClientQuery::ServiceOperation(query));
    }

    /// Creates a modern site.
    #[must_use]
    pub fn create(&self, request: SiteCreationRequest) -> ClientResult<SiteCreationResponse> {
        let response = ClientResult::new();
        self.enqueue(
            ServiceOperationQuery::new(&self.object, "Create")
                .payload(Payload::Json(request.to_json()))
                .payload_key("request")
                .returns(ReturnType::Value(Arc::new(response.clone()))),
        );
        response
    }

    /// Deletes a site.
    pub fn delete(&self, site_id: &str) -> &Self {
        self.enqueue(
            ServiceOperationQuery::new(&self.object, "Delete")
                .payload(Payload::Json(json!({ "siteId": site_id }))),
        );
        self
    }

    /// Reports the provisioning status of a site.
    ///
    /// Sent as `GET SPSiteManager/Status?url='<site_url>'`.
    #[must_use]
    pub fn get_status(&self, site_url: &str) -> ClientResult<SiteCreationResponse> {
        let response = ClientResult::new();
        self.enqueue(
            ServiceOperationQuery::new(&self.object, "Status")
                .payload(Payload::Json(json!({ "url": site_url })))
                .returns(ReturnType::Value(Arc::new(response.clone()))),
        );

        let url_param = format!("'{site_url}'");
        self.object.context().before_execute(move |request| {
            request.http_method = HttpMethod::Get;
            request.body = None;
            request.body_type = None;
            request
                .query
                .get_or_insert_with(Default::default)
                .insert("url".to_string(), url_param);
        });
        response
    }
}

impl ClientContext {
    /// Returns the site manager. No query is enqueued.
    #[must_use]
    pub fn site_manager(&self) -> SiteManager {
        SiteManager::new(self, Some(ResourcePath::new("SPSiteManager")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ValueSink;

    #[test]
    fn test_create_payload_is_wrapped_under_request() {
        let ctx = crate::sharepoint::test_support::context();
        let request = SiteCreationRequest::new("Marketing", "https://contoso.sharepoint.com/sites/marketing")
            .owner("admin@contoso.onmicrosoft.com");
        let _response = ctx.site_manager().create(request);

        let queries = ctx.pending_queries();
        let query = queries[0].as_service_operation().unwrap();
        assert_eq!(query.method_name(), "Create");
        assert_eq!(
            query.body(),
            Some(json!({"request": {
                "__metadata": {"type": "Microsoft.SharePoint.Portal.SPSiteCreationRequest"},
                "Title": "Marketing",
                "Url": "https://contoso.sharepoint.com/sites/marketing",
                "WebTemplate": "SITEPAGEPUBLISHING#0",
                "Owner": "admin@contoso.onmicrosoft.com"
            }}))
        );
    }

    #[test]
    fn test_delete_payload() {
        let ctx = crate::sharepoint::test_support::context();
        ctx.site_manager().delete("1f2e");

        let queries = ctx.pending_queries();
        let request = queries[0].to_request().unwrap();
        assert_eq!(request.path, "SPSiteManager/Delete");
        assert_eq!(request.body, Some(json!({"siteId": "1f2e"})));
    }

    #[test]
    fn test_response_deserializes_from_verbose_shape() {
        let response: ClientResult<SiteCreationResponse> = ClientResult::new();
        response
            .set_json(json!({
                "__metadata": {"type": "Microsoft.SharePoint.Portal.SPSiteCreationResponse"},
                "SiteId": "1f2e",
                "SiteStatus": 2,
                "SiteUrl": "https://contoso.sharepoint.com/sites/marketing"
            }))
            .unwrap();

        let value = response.value().unwrap();
        assert!(value.is_ready());
        assert_eq!(value.site_id.as_deref(), Some("1f2e"));
    }
}
