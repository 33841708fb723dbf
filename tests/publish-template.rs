use std::path::PathBuf;

use sparkpost_publisher::service::config::Configuration;
use sparkpost_publisher::service::publisher::Publisher;
use sparkpost_publisher::Error;
use sparkpost_publisher_engine::store::http;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn configuration(endpoint: String) -> Configuration {
    Configuration {
        sparkpost: http::Config::new("secret-key").with_endpoint(endpoint),
    }
}

async fn template() -> sparkpost_publisher_prelude::TemplateDefinition {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("template")
        .join("user-login.json");
    Publisher::load(&path).await.unwrap()
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(serde_json::json!({
        "errors": [{ "message": "resource not found", "code": "1600" }],
    }))
}

#[tokio::test]
async fn should_create_draft() {
    let _ = sparkpost_publisher::init_logs("debug", false);

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/templates/user-login"))
        .respond_with(not_found())
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/templates"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let publisher = Publisher::from_config(&configuration(mock_server.uri())).unwrap();
    publisher.publish(&template().await, false).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[1].body_json().unwrap();
    assert_eq!(body["id"], "user-login");
    assert_eq!(body["content"]["subject"], "Hello {{name}}!");
}

#[tokio::test]
async fn should_publish_existing_draft() {
    let _ = sparkpost_publisher::init_logs("debug", false);

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/templates/user-login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/templates/user-login"))
        .and(wiremock::matchers::query_param("update_published", "true"))
        .respond_with(not_found())
        .expect(1)
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/templates/user-login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let publisher = Publisher::from_config(&configuration(mock_server.uri())).unwrap();
    publisher.publish(&template().await, true).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].url.query(), Some("update_published=true"));
    assert_eq!(requests[2].url.query(), None);
    for request in &requests[1..] {
        let body: serde_json::Value = request.body_json().unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["published"], serde_json::Value::Bool(true));
    }
}

#[tokio::test]
async fn should_surface_store_errors() {
    let _ = sparkpost_publisher::init_logs("debug", false);

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errors": [{ "message": "Unauthorized." }],
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let publisher = Publisher::from_config(&configuration(mock_server.uri())).unwrap();
    let err = publisher.publish(&template().await, true).await.unwrap_err();
    match err {
        Error::Store(ref inner) => {
            assert_eq!(inner.status().map(|s| s.as_u16()), Some(401));
        }
        _ => panic!("unexpected error {err:?}"),
    }
    assert_eq!(
        err.to_string(),
        "SparkPost responded with status 401 Unauthorized: Unauthorized."
    );
}
