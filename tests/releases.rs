//! Release operations against a mocked Pivnet API.

use pivnet::{
    release_types, ClientConfig, Create, CreateReleaseConfig, Delete, Get, List, PivnetClient,
    PivnetError, Release, ReleaseRef, Update,
};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PivnetClient {
    PivnetClient::new(ClientConfig::new("test-token").with_host(server.uri())).unwrap()
}

async fn mount_release_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2/products/my-product/releases"))
        .and(header("authorization", "Token test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "releases": [
                {"id": 1234, "version": "1.0.0"},
                {"id": 2345, "version": "1.1.0", "release_type": "Minor Release"}
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_releases() {
    let mock_server = MockServer::start().await;
    mount_release_listing(&mock_server).await;

    let client = client_for(&mock_server);
    let releases = Release::list(&client, &"my-product".to_string())
        .await
        .unwrap();

    assert_eq!(releases.len(), 2);
    assert_eq!(releases[0].id, 1234);
    assert_eq!(releases[1].release_type.as_deref(), Some("Minor Release"));
}

#[tokio::test]
async fn test_get_release() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/products/my-product/releases/2345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2345,
            "version": "1.1.0",
            "eula": {"id": 1, "slug": "pivotal_software_eula", "name": "Pivotal Software EULA"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let release = Release::get(&client, ReleaseRef::new("my-product", 2345))
        .await
        .unwrap();

    assert_eq!(release.version, "1.1.0");
    assert_eq!(release.eula.unwrap().slug, "pivotal_software_eula");
}

#[tokio::test]
async fn test_find_by_version() {
    let mock_server = MockServer::start().await;
    mount_release_listing(&mock_server).await;

    let client = client_for(&mock_server);
    let release = Release::find_by_version(&client, "my-product", "1.1.0")
        .await
        .unwrap();

    assert_eq!(release.id, 2345);
    assert_eq!(release.release_ref("my-product"), ReleaseRef::new("my-product", 2345));
}

#[tokio::test]
async fn test_find_by_version_missing() {
    let mock_server = MockServer::start().await;
    mount_release_listing(&mock_server).await;

    let client = client_for(&mock_server);
    let result = Release::find_by_version(&client, "my-product", "9.9.9").await;

    match result {
        Err(PivnetError::ReleaseNotFound {
            product_slug,
            version,
        }) => {
            assert_eq!(product_slug, "my-product");
            assert_eq!(version, "9.9.9");
        }
        other => panic!("Expected ReleaseNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_find_by_version_requires_exact_match() {
    let mock_server = MockServer::start().await;
    mount_release_listing(&mock_server).await;

    let client = client_for(&mock_server);
    let result = Release::find_by_version(&client, "my-product", "1.1").await;

    assert!(matches!(result, Err(PivnetError::ReleaseNotFound { .. })));
}

#[tokio::test]
async fn test_create_release_sends_expected_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/products/my-product/releases"))
        .and(body_json(json!({
            "release": {
                "version": "2.0.0",
                "release_type": "Major Release",
                "eula": {"slug": "pivotal_software_eula"},
                "oss_compliant": "confirm",
                "release_date": "2016-06-01"
            },
            "copy_metadata": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "release": {"id": 3456, "version": "2.0.0", "release_type": "Major Release"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let config = CreateReleaseConfig {
        release_date: Some("2016-06-01".to_string()),
        ..CreateReleaseConfig::new(
            "my-product",
            "2.0.0",
            "Major Release",
            "pivotal_software_eula",
        )
    };
    let release = Release::create(&client, config).await.unwrap();

    assert_eq!(release.id, 3456);
    assert_eq!(release.version, "2.0.0");
}

#[tokio::test]
async fn test_create_release_surfaces_validation_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/products/my-product/releases"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation failed",
            "errors": ["Version has already been taken"]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = Release::create(
        &client,
        CreateReleaseConfig::new("my-product", "1.0.0", "Major Release", "some-eula"),
    )
    .await;

    match result {
        Err(PivnetError::ApiError {
            status_code,
            errors,
            ..
        }) => {
            assert_eq!(status_code, 422);
            assert_eq!(errors, vec!["Version has already been taken".to_string()]);
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_release_patches_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v2/products/my-product/releases/1234"))
        .and(body_json(json!({
            "release": {"id": 1234, "version": "1.0.0", "description": "Patched"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "release": {"id": 1234, "version": "1.0.0", "description": "Patched"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let release = Release {
        id: 1234,
        version: "1.0.0".to_string(),
        description: Some("Patched".to_string()),
        ..Default::default()
    };
    let updated = Release::update(&client, "my-product".to_string(), release)
        .await
        .unwrap();

    assert_eq!(updated.description.as_deref(), Some("Patched"));
}

#[tokio::test]
async fn test_delete_release_expects_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/products/my-product/releases/1234"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert_ok!(Release::delete(&client, ReleaseRef::new("my-product", 1234)).await);
}

#[tokio::test]
async fn test_release_types() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/releases/release_types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "release_types": ["Major Release", "Minor Release"]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let types = release_types(&client).await.unwrap();

    assert_eq!(types, vec!["Major Release", "Minor Release"]);
}

#[tokio::test]
async fn test_product_slug_is_url_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/products/odd%20slug/releases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"releases": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let releases = Release::list(&client, &"odd slug".to_string())
        .await
        .unwrap();
    assert!(releases.is_empty());
}
