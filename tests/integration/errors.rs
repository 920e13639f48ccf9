//! Classification of rejected requests.

use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use abax_sdk::{ErrorKind, ListVehiclesInput};

use crate::common::{client, mock_api};

#[tokio::test]
async fn unauthorized_fails_after_one_attempt_with_vendor_message() {
    let server = mock_api().await;

    Mock::given(method("GET"))
        .and(path("/v1/vehicles"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({ "message": "Invalid token" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .list_vehicles(ListVehiclesInput::default())
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.vendor_message(), Some("Invalid token"));
    assert_eq!(err.to_string(), "Request was unauthorized: Invalid token");
}

#[tokio::test]
async fn bad_request_without_body_uses_generic_message() {
    let server = mock_api().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .list_vehicles(ListVehiclesInput::default())
        .await
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::BadRequest { message: None }));
    assert_eq!(err.to_string(), "Bad request");
}

#[tokio::test]
async fn other_statuses_fail_immediately_with_status() {
    for status in [403u16, 404, 500, 503] {
        let server = mock_api().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(serde_json::json!({ "error": "nope" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server)
            .list_vehicles(ListVehiclesInput::default())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(status), "status {status}");
        assert_eq!(
            err.to_string(),
            format!("Not able to perform request (HTTP {status}): nope")
        );
    }
}

#[tokio::test]
async fn bearer_token_in_vendor_message_is_redacted() {
    let server = mock_api().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Rejected Bearer secret-token-value"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_vehicles(ListVehiclesInput::default())
        .await
        .unwrap_err();

    assert!(!err.to_string().contains("secret-token-value"));
}

#[tokio::test]
async fn malformed_success_body_is_validation_error() {
    let server = mock_api().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "page": 1, "items": "nope" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .list_vehicles(ListVehiclesInput::default())
        .await
        .unwrap_err();

    assert!(err.is_validation());
}
