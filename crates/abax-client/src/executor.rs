//! The request executor: one logical call in, one result out.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::credential::Credential;
use crate::descriptor::CallDescriptor;
use crate::error::{Error, ErrorKind, Result};
use crate::outcome::Outcome;
use crate::request::RequestBuilder;
use crate::response::HttpResponse;
use crate::retry::RetryState;
use crate::transport::{ReqwestTransport, Transport};

/// Runs logical calls against the ABAX API.
///
/// Each call resolves the credential once, then sends the request until it
/// succeeds, is rejected, or runs out of rate-limit retries. The executor
/// holds no per-call state and can be shared between concurrent callers.
pub struct RequestExecutor<T: Transport = ReqwestTransport> {
    transport: Arc<T>,
    config: Arc<ClientConfig>,
    credential: Credential,
}

impl<T: Transport> Clone for RequestExecutor<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: Arc::clone(&self.config),
            credential: self.credential.clone(),
        }
    }
}

impl<T: Transport> std::fmt::Debug for RequestExecutor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.config.base_url())
            .field("credential", &self.credential)
            .finish_non_exhaustive()
    }
}

impl RequestExecutor<ReqwestTransport> {
    /// Create an executor backed by reqwest.
    pub fn new(config: ClientConfig, credential: impl Into<Credential>) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(transport, config, credential))
    }
}

impl<T: Transport> RequestExecutor<T> {
    /// Create an executor over any transport.
    pub fn with_transport(transport: T, config: ClientConfig, credential: impl Into<Credential>) -> Self {
        Self {
            transport: Arc::new(transport),
            config: Arc::new(config),
            credential: credential.into(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute one logical call described by `descriptor`.
    #[instrument(skip_all, fields(method = %descriptor.method(), path = descriptor.path_label()))]
    pub async fn call<I, O>(&self, descriptor: &CallDescriptor<I, O>, input: &I) -> Result<O>
    where
        I: Sync,
    {
        let request = descriptor.build_request(self.base_url(), input);
        let response = self.execute(request).await?;
        descriptor.parse(&response)
    }

    /// Authenticate a pre-built request and run it through the retry loop.
    ///
    /// The credential is resolved here, once, and reused for every attempt.
    #[instrument(skip_all, fields(method = %request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<HttpResponse> {
        let token = self.credential.resolve().await?;
        let request = request
            .bearer_auth(token)
            .header("User-Agent", self.config.user_agent.as_str());

        self.send_with_retry(&request).await
    }

    async fn send_with_retry(&self, request: &RequestBuilder) -> Result<HttpResponse> {
        let mut retry = RetryState::new(&self.config.retry);

        loop {
            if self.config.enable_tracing {
                debug!(attempt = retry.attempt(), "Sending request");
            }

            let response = self.transport.send(request).await?;

            if self.config.enable_tracing {
                debug!(status = response.status(), body_len = response.body().len(), "Response received");
            }

            match Outcome::classify(response) {
                Outcome::Success(response) => return Ok(response),
                Outcome::RateLimited { reset_at } => {
                    match retry.next_wait(reset_at, Utc::now()) {
                        Some(wait) => {
                            warn!(
                                attempt = retry.attempt(),
                                wait_ms = wait.as_millis() as u64,
                                reset_at = ?reset_at,
                                "Rate limited, waiting for reset"
                            );
                            tokio::time::sleep(wait).await;
                        }
                        None => {
                            let attempts = retry.attempt() + 1;
                            warn!(attempts, "Rate limited on every attempt, giving up");
                            return Err(Error::new(ErrorKind::Timeout { attempts }));
                        }
                    }
                }
                Outcome::Rejected(rejection) => {
                    if self.config.enable_tracing {
                        info!(status = rejection.status, "Request rejected");
                    }
                    return Err(rejection.into_error());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryParams;
    use crate::retry::RetryConfig;
    use chrono::TimeDelta;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Replays canned responses and records every request it sees.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: Mutex<VecDeque<HttpResponse>>,
        requests: Mutex<Vec<RequestBuilder>>,
    }

    impl ScriptedTransport {
        fn new(responses: impl IntoIterator<Item = HttpResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                requests: Mutex::default(),
            }
        }

        fn sent(&self) -> Vec<RequestBuilder> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for ScriptedTransport {
        async fn send(&self, request: &RequestBuilder) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(request.clone());
            let next = self.responses.lock().unwrap().pop_front();
            next.ok_or_else(|| Error::new(ErrorKind::Connection("script exhausted".into())))
        }
    }

    fn rate_limited() -> HttpResponse {
        let reset = (Utc::now() + TimeDelta::seconds(30)).to_rfc3339();
        HttpResponse::empty(429).with_header("X-Rate-Limit-Reset", reset)
    }

    fn vehicles_page() -> HttpResponse {
        HttpResponse::json_body(
            200,
            &serde_json::json!({ "page": 1, "page_size": 150, "items": [] }),
        )
    }

    fn descriptor() -> CallDescriptor<u32, serde_json::Value> {
        CallDescriptor::<u32, _>::get("v1/vehicles")
            .query(|page| QueryParams::new().push("page", page))
            .parse_json()
    }

    fn executor(transport: ScriptedTransport, credential: Credential) -> RequestExecutor<Arc<ScriptedTransport>> {
        let config = ClientConfig::builder()
            .with_base_url("https://api.abax.cloud")
            .with_user_agent("abax-test/1.0")
            .build();
        RequestExecutor::with_transport(Arc::new(transport), config, credential)
    }

    #[tokio::test(start_paused = true)]
    async fn test_four_rate_limits_time_out() {
        let transport = ScriptedTransport::new((0..5).map(|_| rate_limited()));
        let executor = executor(transport, Credential::api_key("token"));

        let err = executor.call(&descriptor(), &1).await.unwrap_err();

        assert!(err.is_timeout());
        assert!(err.to_string().contains("Request timed out"));
        assert!(matches!(err.kind, ErrorKind::Timeout { attempts: 4 }));
        assert_eq!(executor.transport().sent().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_rate_limits_then_success() {
        let transport = ScriptedTransport::new([rate_limited(), rate_limited(), rate_limited(), vehicles_page()]);
        let executor = executor(transport, Credential::api_key("token"));

        let body = executor.call(&descriptor(), &1).await.unwrap();

        assert_eq!(body["page_size"], 150);
        assert_eq!(executor.transport().sent().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_waits_until_reset() {
        let start = tokio::time::Instant::now();
        let transport = ScriptedTransport::new([rate_limited(), vehicles_page()]);
        let executor = executor(transport, Credential::api_key("token"));

        executor.call(&descriptor(), &1).await.unwrap();

        let waited = start.elapsed();
        assert!(waited >= std::time::Duration::from_secs(29), "waited {waited:?}");
        assert!(waited <= std::time::Duration::from_secs(31), "waited {waited:?}");
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let transport = ScriptedTransport::new([HttpResponse::json_body(
            401,
            &serde_json::json!({ "message": "Invalid token" }),
        )]);
        let executor = executor(transport, Credential::api_key("token"));

        let err = executor.call(&descriptor(), &1).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("Invalid token"));
        assert_eq!(executor.transport().sent().len(), 1);
    }

    #[tokio::test]
    async fn test_other_rejections_fail_after_one_attempt() {
        let transport = ScriptedTransport::new([HttpResponse::empty(404), vehicles_page()]);
        let executor = executor(transport, Credential::api_key("token"));

        let err = executor.call(&descriptor(), &1).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(executor.transport().sent().len(), 1);
    }

    #[tokio::test]
    async fn test_request_carries_auth_user_agent_and_query() {
        let transport = ScriptedTransport::new([vehicles_page()]);
        let executor = executor(transport, Credential::api_key("secret-token"));

        executor.call(&descriptor(), &7).await.unwrap();

        let sent = executor.transport().sent();
        assert_eq!(sent[0].url(), "https://api.abax.cloud/v1/vehicles");
        assert_eq!(sent[0].bearer_token(), Some("secret-token"));
        assert_eq!(sent[0].headers().get("User-Agent").map(String::as_str), Some("abax-test/1.0"));
        assert_eq!(sent[0].query_values("page"), vec!["7"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_resolved_once_per_logical_call() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let credential = Credential::from_fn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok("rotating".to_string()) }
        });

        let transport = ScriptedTransport::new([rate_limited(), rate_limited(), vehicles_page(), vehicles_page()]);
        let executor = executor(transport, credential);

        executor.call(&descriptor(), &1).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        executor.call(&descriptor(), &2).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(executor.transport().sent().len(), 4);
    }

    #[tokio::test]
    async fn test_no_retry_config_fails_on_first_rate_limit() {
        let transport = ScriptedTransport::new([rate_limited(), vehicles_page()]);
        let config = ClientConfig::builder()
            .with_base_url("https://api.abax.cloud")
            .with_retry(RetryConfig::no_retry())
            .build();
        let executor = RequestExecutor::with_transport(Arc::new(transport), config, "token");

        let err = executor.call(&descriptor(), &1).await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Timeout { attempts: 1 }));
        assert_eq!(executor.transport().sent().len(), 1);
    }

    #[tokio::test]
    async fn test_validation_error_is_not_retried() {
        let transport = ScriptedTransport::new([HttpResponse::new(
            200,
            Default::default(),
            "not json",
        )]);
        let executor = executor(transport, Credential::api_key("token"));

        let err = executor.call(&descriptor(), &1).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(executor.transport().sent().len(), 1);
    }
}
