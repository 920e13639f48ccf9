//! The identity server and the API client working together.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use abax_sdk::auth::ErrorKind as AuthErrorKind;
use abax_sdk::{AbaxAuth, AbaxCredentials, AuthConfig, Credential, ErrorKind, ListVehiclesInput, Scope};

use crate::common::{client_with, mock_api, vehicle_page};

fn auth(identity: &MockServer) -> Arc<AbaxAuth> {
    let config = AuthConfig::new("client-id", "client-secret")
        .with_scopes([Scope::OpenApi, Scope::OpenApiVehicles])
        .with_identity_url(identity.uri());
    Arc::new(AbaxAuth::new(config).expect("auth should build"))
}

fn token(access: &str, refresh: Option<&str>) -> ResponseTemplate {
    let mut body = serde_json::json!({
        "access_token": access,
        "expires_in": 3600,
        "token_type": "Bearer"
    });
    if let Some(refresh) = refresh {
        body["refresh_token"] = refresh.into();
    }
    ResponseTemplate::new(200).set_body_json(body)
}

async fn vehicles_api(expected_bearer: &str) -> MockServer {
    let api = mock_api().await;
    Mock::given(method("GET"))
        .and(path("/v1/vehicles"))
        .and(header("authorization", format!("Bearer {expected_bearer}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(vehicle_page(1, 1500, &[])))
        .expect(1)
        .mount(&api)
        .await;
    api
}

#[tokio::test]
async fn client_credentials_token_reaches_the_api() {
    let identity = mock_api().await;
    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("scope=open_api+open_api.vehicles"))
        .respond_with(token("app-access", None))
        .expect(1)
        .mount(&identity)
        .await;

    let auth = auth(&identity);
    auth.credentials_from_client_credentials().await.unwrap();

    let api = vehicles_api("app-access").await;
    client_with(&api, Credential::shared(auth))
        .list_vehicles(ListVehiclesInput::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn expired_credentials_are_refreshed_before_the_call() {
    let identity = mock_api().await;
    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=stored-refresh"))
        .respond_with(token("fresh-access", Some("next-refresh")))
        .expect(1)
        .mount(&identity)
        .await;

    let auth = auth(&identity);
    auth.set_credentials(
        AbaxCredentials::new("stale-access", Utc::now() - TimeDelta::minutes(1))
            .with_refresh_token("stored-refresh"),
    )
    .await;

    let api = vehicles_api("fresh-access").await;
    client_with(&api, Credential::shared(auth.clone()))
        .list_vehicles(ListVehiclesInput::default())
        .await
        .unwrap();

    let stored = auth.credentials().await.unwrap();
    assert_eq!(stored.refresh_token.as_deref(), Some("next-refresh"));
}

#[tokio::test]
async fn failed_refresh_surfaces_as_credential_error_without_api_call() {
    let identity = mock_api().await;
    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "refresh token already used"
        })))
        .mount(&identity)
        .await;

    let auth = auth(&identity);
    auth.set_credentials(
        AbaxCredentials::new("stale", Utc::now() - TimeDelta::minutes(1))
            .with_refresh_token("used"),
    )
    .await;

    let api = mock_api().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&api)
        .await;

    let err = client_with(&api, Credential::shared(auth.clone()))
        .list_vehicles(ListVehiclesInput::default())
        .await
        .unwrap_err();

    match err.kind {
        ErrorKind::Credential(message) => assert!(message.contains("invalid_grant")),
        other => panic!("unexpected error: {other:?}"),
    }

    let err = auth.refresh_credentials().await.unwrap_err();
    assert!(matches!(err.kind, AuthErrorKind::OAuth { .. }));
}

#[test]
fn authorization_url_carries_state_and_scopes() {
    let config = AuthConfig::new("client-id", "client-secret")
        .with_redirect_uri("https://app.example.com/callback")
        .with_scopes([Scope::OpenId, Scope::OfflineAccess]);
    let auth = AbaxAuth::new(config).unwrap();

    let url = auth.authorization_url(Some("xyz")).unwrap();
    assert_eq!(
        url,
        "https://identity.abax.cloud/connect/authorize?client_id=client-id&response_type=code\
         &redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback&scope=openid+offline_access&state=xyz"
    );
}
