//! Integration tests for the HTTP client functionality.
//!
//! These tests verify the client configuration, request building,
//! response parsing, and error handling behavior.

use serde_json::json;
use sharepoint_api::clients::{DataType, HttpClient, HttpMethod, HttpRequest, API_BASE_PATH};
use sharepoint_api::{AccessToken, ClientConfig, HttpError, SiteUrl};
use std::collections::HashMap;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for the given site URL.
fn create_test_config(site_url: &str, access_token: Option<&str>) -> ClientConfig {
    let mut builder = ClientConfig::builder().site_url(SiteUrl::new(site_url).unwrap());
    if let Some(token) = access_token {
        builder = builder.access_token(AccessToken::new(token).unwrap());
    }
    builder.build().unwrap()
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn test_client_configuration_from_site_url() {
    let config = create_test_config("https://contoso.sharepoint.com/sites/dev/", Some("token-1"));
    let client = HttpClient::new(API_BASE_PATH, &config).unwrap();

    assert_eq!(client.base_uri(), "https://contoso.sharepoint.com/sites/dev");
    assert_eq!(client.base_path(), "/_api");
    assert_eq!(
        client.url_for("Web/Lists"),
        "https://contoso.sharepoint.com/sites/dev/_api/Web/Lists"
    );
    assert_eq!(
        client.default_headers().get("Authorization"),
        Some(&"Bearer token-1".to_string())
    );
}

#[tokio::test]
async fn test_multiple_clients_are_independent() {
    let dev = HttpClient::new(
        API_BASE_PATH,
        &create_test_config("https://contoso.sharepoint.com/sites/dev", Some("token-dev")),
    )
    .unwrap();
    let hr = HttpClient::new(
        API_BASE_PATH,
        &create_test_config("https://fabrikam.sharepoint.com/sites/hr", Some("token-hr")),
    )
    .unwrap();

    assert_eq!(dev.base_uri(), "https://contoso.sharepoint.com/sites/dev");
    assert_eq!(hr.base_uri(), "https://fabrikam.sharepoint.com/sites/hr");
    assert_eq!(
        hr.default_headers().get("Authorization"),
        Some(&"Bearer token-hr".to_string())
    );
}

#[tokio::test]
async fn test_client_default_headers() {
    let config = ClientConfig::builder()
        .site_url(SiteUrl::new("https://contoso.sharepoint.com").unwrap())
        .user_agent_prefix("MyApp/1.0")
        .build()
        .unwrap();
    let client = HttpClient::new(API_BASE_PATH, &config).unwrap();

    let headers = client.default_headers();

    let user_agent = headers.get("User-Agent").unwrap();
    assert!(user_agent.starts_with("MyApp/1.0 | "));
    assert!(user_agent.contains("SharePoint API Library"));
    assert!(user_agent.contains("Rust"));

    assert_eq!(
        headers.get("Accept"),
        Some(&"application/json;odata=verbose".to_string())
    );

    // No token configured
    assert!(!headers.contains_key("Authorization"));
}

// ============================================================================
// Request Building
// ============================================================================

#[tokio::test]
async fn test_request_with_all_options() {
    let request = HttpRequest::builder(HttpMethod::Post, "Web/Lists/GetByTitle('Tasks')/items")
        .body(json!({"__metadata": {"type": "SP.Data.TasksListItem"}, "Title": "New"}))
        .body_type(DataType::Json)
        .query_param("$select", "Id")
        .header("IF-MATCH", "*")
        .build()
        .unwrap();

    assert_eq!(request.http_method, HttpMethod::Post);
    assert_eq!(request.path, "Web/Lists/GetByTitle('Tasks')/items");
    assert_eq!(request.body_type, Some(DataType::Json));
    assert!(request.query.as_ref().unwrap().contains_key("$select"));
    assert_eq!(request.header("IF-MATCH"), Some("*"));
}

#[tokio::test]
async fn test_invalid_request_produces_correct_error() {
    let result = HttpRequest::builder(HttpMethod::Patch, "Web").build();
    assert!(matches!(
        result,
        Err(sharepoint_api::InvalidHttpRequestError::MissingBody { .. })
    ));

    let request = HttpRequest {
        http_method: HttpMethod::Post,
        path: "Web".to_string(),
        body: Some(json!({"key": "value"})),
        body_type: None,
        query: None,
        extra_headers: Some(HashMap::new()),
    };
    assert!(matches!(
        request.verify(),
        Err(sharepoint_api::InvalidHttpRequestError::MissingBodyType)
    ));
}

#[tokio::test]
async fn test_http_method_display() {
    assert_eq!(HttpMethod::Get.to_string(), "get");
    assert_eq!(HttpMethod::Post.to_string(), "post");
    assert_eq!(HttpMethod::Patch.to_string(), "patch");
    assert_eq!(HttpMethod::Delete.to_string(), "delete");
}

// ============================================================================
// Round Trips
// ============================================================================

#[tokio::test]
async fn test_request_sends_headers_and_parses_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sites/dev/_api/Web"))
        .and(header("Authorization", "Bearer secret"))
        .and(header("Accept", "application/json;odata=verbose"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"d": {"Title": "Dev"}})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{}/sites/dev", server.uri()), Some("secret"));
    let client = HttpClient::new(API_BASE_PATH, &config).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "Web").build().unwrap();

    let response = client.request(request).await.unwrap();
    assert!(response.is_ok());
    assert_eq!(response.body, json!({"d": {"Title": "Dev"}}));
}

#[tokio::test]
async fn test_patch_request_sends_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/_api/Web/Lists/GetByTitle('Tasks')"))
        .and(header("Content-Type", "application/json;odata=verbose"))
        .and(body_json(json!({"Description": "Updated"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), None);
    let client = HttpClient::new(API_BASE_PATH, &config).unwrap();
    let request = HttpRequest::builder(HttpMethod::Patch, "Web/Lists/GetByTitle('Tasks')")
        .body(json!({"Description": "Updated"}))
        .body_type(DataType::Json)
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();
    assert_eq!(response.code, 204);
}

#[tokio::test]
async fn test_error_response_carries_odata_message_and_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_api/Web/Lists/GetByTitle('Missing')"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("request-id", "req-42")
                .set_body_json(json!({
                    "error": {
                        "code": "-1, System.ArgumentException",
                        "message": {"lang": "en-US", "value": "List 'Missing' does not exist."}
                    }
                })),
        )
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), None);
    let client = HttpClient::new(API_BASE_PATH, &config).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "Web/Lists/GetByTitle('Missing')")
        .build()
        .unwrap();

    match client.request(request).await {
        Err(HttpError::Response(error)) => {
            assert_eq!(error.code, 404);
            assert_eq!(error.message, "List 'Missing' does not exist.");
            assert_eq!(error.error_reference.as_deref(), Some("req-42"));
        }
        other => panic!("expected a response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_kept_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_api/Web"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal failure"))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), None);
    let client = HttpClient::new(API_BASE_PATH, &config).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "Web").build().unwrap();

    match client.request(request).await {
        Err(HttpError::Response(error)) => {
            assert_eq!(error.code, 500);
            assert_eq!(error.message, "Internal failure");
        }
        other => panic!("expected a response error, got {other:?}"),
    }
}
