//! Integration tests for the SharePoint API SDK.
//!
//! These tests verify end-to-end functionality of the configuration system
//! and context construction.

use sharepoint_api::{AccessToken, ClientConfig, ClientContext, ConfigError, Entity, SiteUrl};

#[test]
fn test_full_workflow_create_newtypes_build_config_access_fields() {
    // Create validated newtypes
    let site_url = SiteUrl::new("https://contoso.sharepoint.com/sites/dev/").unwrap();
    let token = AccessToken::new("test-token").unwrap();

    // Build configuration
    let config = ClientConfig::builder()
        .site_url(site_url)
        .access_token(token)
        .user_agent_prefix("TestApp/1.0")
        .build()
        .unwrap();

    // Access fields and verify
    assert_eq!(
        config.site_url().as_ref(),
        "https://contoso.sharepoint.com/sites/dev"
    );
    assert_eq!(config.site_url().origin(), "https://contoso.sharepoint.com");
    assert_eq!(config.site_url().server_relative_path(), "/sites/dev");
    assert_eq!(config.access_token().unwrap().as_ref(), "test-token");
    assert_eq!(config.user_agent_prefix(), Some("TestApp/1.0"));

    // Build a context from it
    let ctx = ClientContext::new(config).unwrap();
    assert_eq!(ctx.base_url(), "https://contoso.sharepoint.com");
    assert_eq!(ctx.pending_count(), 0);
}

#[test]
fn test_multi_tenant_scenario_multiple_independent_contexts() {
    let config_a = ClientConfig::builder()
        .site_url(SiteUrl::new("https://contoso.sharepoint.com/sites/a").unwrap())
        .build()
        .unwrap();
    let config_b = ClientConfig::builder()
        .site_url(SiteUrl::new("https://fabrikam.sharepoint.com").unwrap())
        .build()
        .unwrap();

    let ctx_a = ClientContext::new(config_a).unwrap();
    let ctx_b = ClientContext::new(config_b).unwrap();

    ctx_a.web().load(&[]);

    // Queues are independent
    assert_eq!(ctx_a.pending_count(), 1);
    assert_eq!(ctx_b.pending_count(), 0);
    assert_eq!(ctx_b.site_url().server_relative_path(), "/");
}

#[test]
fn test_error_handling_invalid_inputs_produce_correct_errors() {
    // Empty access token
    let result = AccessToken::new("");
    assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));

    // Relative site URL
    let result = SiteUrl::new("/sites/dev");
    assert!(matches!(result, Err(ConfigError::InvalidSiteUrl { .. })));

    // Unsupported scheme
    let result = SiteUrl::new("ftp://contoso.sharepoint.com");
    assert!(matches!(result, Err(ConfigError::InvalidSiteUrl { .. })));

    // Missing required fields in builder
    let result = ClientConfig::builder()
        .access_token(AccessToken::new("token").unwrap())
        .build();
    assert!(matches!(
        result,
        Err(ConfigError::MissingRequiredField { field: "site_url" })
    ));
}

#[test]
fn test_context_can_be_cloned_and_shared() {
    let config = ClientConfig::builder()
        .site_url(SiteUrl::new("https://contoso.sharepoint.com").unwrap())
        .build()
        .unwrap();
    let ctx = ClientContext::new(config).unwrap();

    // Clones share the queue
    let ctx_clone = ctx.clone();

    // Verify Send + Sync by moving to thread
    let handle = std::thread::spawn(move || {
        let _items = ctx_clone.web().lists().get_by_title("Tasks").get_items(None);
    });
    handle.join().unwrap();

    assert_eq!(ctx.pending_count(), 1);
}
