//! Status-code handling of the HTTP client.
//!
//! Every request declares the status it expects; anything else becomes a
//! typed error carrying the API's message.

use pivnet::{
    check_authentication, ClientConfig, Delete, Eula, Get, List, PivnetClient, PivnetError,
    Product, Release, ReleaseRef,
};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PivnetClient {
    PivnetClient::new(ClientConfig::new("test-token").with_host(server.uri())).unwrap()
}

#[tokio::test]
async fn test_sends_token_authorization_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/authentication"))
        .and(header("authorization", "Token test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert_ok!(check_authentication(&client).await);
}

#[tokio::test]
async fn test_sends_user_agent_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/authentication"))
        .and(header("user-agent", "my-tool/1.0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PivnetClient::new(
        ClientConfig::new("test-token")
            .with_host(mock_server.uri())
            .with_user_agent("my-tool/1.0"),
    )
    .unwrap();
    assert_ok!(check_authentication(&client).await);
}

#[tokio::test]
async fn test_unexpected_status_is_api_error_with_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/products"))
        .respond_with(ResponseTemplate::new(418).set_body_json(serde_json::json!({
            "message": "foo message",
            "errors": ["first", "second"]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = assert_err!(Product::list(&client, &()).await);

    assert_eq!(err.status_code(), Some(418));
    match &err {
        PivnetError::ApiError {
            message, errors, ..
        } => {
            assert_eq!(message, "foo message");
            assert_eq!(errors, &vec!["first".to_string(), "second".to_string()]);
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
    assert!(err.to_string().contains("foo message"));
}

#[tokio::test]
async fn test_success_status_other_than_expected_is_an_error() {
    let mock_server = MockServer::start().await;

    // Deleting a release expects 204; a 200 is still a failure.
    Mock::given(method("DELETE"))
        .and(path("/api/v2/products/my-product/releases/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = assert_err!(Release::delete(&client, ReleaseRef::new("my-product", 5)).await);
    assert_eq!(err.status_code(), Some(200));
}

#[tokio::test]
async fn test_unauthorized_maps_to_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/authentication"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"message": "invalid token"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = check_authentication(&client).await;

    match result {
        Err(PivnetError::Unauthorized { message }) => assert_eq!(message, "invalid token"),
        other => panic!("Expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_maps_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/products/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"message": "product not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = Product::get(&client, "missing".to_string()).await;

    assert!(matches!(result, Err(PivnetError::NotFound { ref message }) if message == "product not found"));
}

#[tokio::test]
async fn test_legal_restriction_maps_to_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/products/restricted/releases/9"))
        .respond_with(
            ResponseTemplate::new(451)
                .set_body_json(serde_json::json!({"message": "export controlled"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = Release::get(&client, ReleaseRef::new("restricted", 9)).await;

    assert!(matches!(
        result,
        Err(PivnetError::UnavailableForLegalReasons { .. })
    ));
}

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/eulas"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = Eula::list(&client, &()).await;

    assert!(matches!(
        result,
        Err(PivnetError::RateLimited {
            retry_after_secs: Some(30)
        })
    ));
}

#[tokio::test]
async fn test_non_json_error_body_is_kept_as_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = assert_err!(Product::list(&client, &()).await);

    match err {
        PivnetError::ApiError {
            message,
            status_code,
            errors,
        } => {
            assert_eq!(message, "upstream exploded");
            assert_eq!(status_code, 500);
            assert!(errors.is_empty());
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/products/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = Product::get(&client, "broken".to_string()).await;

    assert!(matches!(result, Err(PivnetError::HttpError(_))));
}
