//! Rate-limit retry behaviour.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use abax_sdk::{Credential, ErrorKind, ListVehiclesInput};

use crate::common::{client, client_with, mock_api, vehicle_page};

fn rate_limited() -> ResponseTemplate {
    // A reset instant in the past means "retry immediately".
    let reset = (Utc::now() - TimeDelta::seconds(1)).to_rfc3339();
    ResponseTemplate::new(429).insert_header("X-Rate-Limit-Reset", reset.as_str())
}

#[tokio::test]
async fn rate_limited_on_every_attempt_times_out_after_four() {
    let server = mock_api().await;

    Mock::given(method("GET"))
        .and(path("/v1/vehicles"))
        .respond_with(rate_limited())
        .expect(4)
        .mount(&server)
        .await;

    let err = client(&server)
        .list_vehicles(ListVehiclesInput::default())
        .await
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::Timeout { attempts: 4 }));
    assert!(err.is_timeout());
    assert_eq!(err.to_string(), "Request timed out after 4 attempts");
}

#[tokio::test]
async fn succeeds_on_fourth_attempt() {
    let server = mock_api().await;

    Mock::given(method("GET"))
        .and(path("/v1/vehicles"))
        .respond_with(rate_limited())
        .up_to_n_times(3)
        .expect(3)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/vehicles"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(vehicle_page(1, 1500, &["fourth".to_string()])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .list_vehicles(ListVehiclesInput::default())
        .await
        .expect("fourth attempt should succeed");

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "fourth");
}

#[tokio::test]
async fn missing_reset_header_still_retries() {
    let server = mock_api().await;

    Mock::given(method("GET"))
        .and(path("/v1/vehicles"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vehicle_page(1, 1500, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .list_vehicles(ListVehiclesInput::default())
        .await
        .unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn every_attempt_reuses_the_same_token() {
    let server = mock_api().await;

    Mock::given(method("GET"))
        .respond_with(rate_limited())
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vehicle_page(1, 1500, &[])))
        .mount(&server)
        .await;

    let issued = Arc::new(AtomicU32::new(0));
    let counter = issued.clone();
    let credential = Credential::from_fn(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        async move { Ok::<_, abax_sdk::Error>(format!("token-{n}")) }
    });

    client_with(&server, credential)
        .list_vehicles(ListVehiclesInput::default())
        .await
        .unwrap();

    assert_eq!(issued.load(Ordering::SeqCst), 1);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    for request in requests {
        assert_eq!(
            request.headers.get("authorization").unwrap(),
            "Bearer token-0"
        );
    }
}
