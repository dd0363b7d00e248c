use console_async::{Client, ConsoleConfig, ConsoleError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client_fast_retry(server: &MockServer) -> Client<ConsoleConfig> {
    Client::with_config(ConsoleConfig::new().with_api_base(server.uri())).with_backoff(
        backon::ExponentialBuilder::default()
            .with_min_delay(std::time::Duration::from_millis(10))
            .with_max_delay(std::time::Duration::from_millis(50))
            .with_max_times(3),
    )
}

#[tokio::test]
async fn retry_429_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/7/modules"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "status": "error",
            "message": "Too many requests"
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products/7/modules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Auth", "is_configured": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let modules = test_client_fast_retry(&server)
        .modules()
        .available(7, 3)
        .await
        .unwrap();
    assert_eq!(modules.len(), 1);
}

#[tokio::test]
async fn retry_500_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tenants"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/tenants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let tenants = test_client_fast_retry(&server)
        .tenants()
        .list()
        .await
        .unwrap();
    assert!(tenants.is_empty());
}

#[tokio::test]
async fn no_retry_on_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tenants/9/branches"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "Tenant with id 9 not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client_fast_retry(&server)
        .branches()
        .list_for_tenant(9)
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Api(_)));
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn gives_up_after_max_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(4)
        .mount(&server)
        .await;

    let err = test_client_fast_retry(&server)
        .products()
        .list()
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(503));
}

#[tokio::test]
async fn unconfigure_is_sent_once_even_on_5xx() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/branches/3/products/7/modules/2"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client_fast_retry(&server)
        .modules()
        .unconfigure(3, 7, 2)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(503));
}
