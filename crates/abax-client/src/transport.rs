//! Pluggable HTTP transport.
//!
//! The executor never talks to the network directly. It hands a
//! [`RequestBuilder`] to a [`Transport`] and gets back a buffered
//! [`HttpResponse`]. Production code uses [`ReqwestTransport`]; tests inject
//! their own implementation through the same constructor.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBody, RequestBuilder};
use crate::response::HttpResponse;

/// Sends one HTTP request and buffers the response.
///
/// Implementations report any received response (including 4xx/5xx) as
/// `Ok`; `Err` is reserved for failures to complete the exchange at all.
pub trait Transport: Send + Sync {
    fn send(&self, request: &RequestBuilder) -> impl Future<Output = Result<HttpResponse>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(&self, request: &RequestBuilder) -> impl Future<Output = Result<HttpResponse>> + Send {
        (**self).send(request)
    }
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport using the timeouts and compression settings of `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestBuilder) -> Result<HttpResponse> {
        let url = request.full_url()?;
        let mut req = self.inner.request(request.method.to_reqwest(), url);

        if let Some(ref token) = request.bearer_token {
            req = req.bearer_auth(token);
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = match body {
                RequestBody::Json(value) => req.body(serde_json::to_vec(value)?),
                RequestBody::Form(pairs) => {
                    let encoded = url::form_urlencoded::Serializer::new(String::new())
                        .extend_pairs(pairs)
                        .finish();
                    req.body(encoded)
                }
            };
        }

        let response = req.send().await?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(HttpResponse::new(status, headers, body))
    }
}
