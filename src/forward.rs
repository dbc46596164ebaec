//! Outbound HTTP forwarding.

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Status and body returned by a destination.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardResponse {
    pub status: u16,
    pub body: String,
}

impl ForwardResponse {
    /// Destinations signal acceptance with exactly 200.
    pub fn is_accepted(&self) -> bool {
        self.status == 200
    }
}

/// Error types for a single forward attempt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForwardError {
    /// Connection, TLS or timeout failure
    #[error("Transport error: {0}")]
    Transport(String),
    /// The destination answered with something other than 200
    #[error("Rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

pub type ForwardFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ForwardResponse, ForwardError>> + Send + 'a>>;

/// HTTP client abstraction so the relay can be tested without a network.
///
/// One call is one POST of a JSON body. Implementations must honour `timeout`
/// and must not retry.
pub trait Forwarder: Send + Sync {
    fn post<'a>(&'a self, url: &'a str, body: &'a Value, timeout: Duration) -> ForwardFuture<'a>;
}

/// Send a JSON document and map anything but 200 to [`ForwardError::Rejected`].
pub async fn forward_json(
    forwarder: &dyn Forwarder,
    url: &str,
    body: &Value,
    timeout: Duration,
) -> Result<ForwardResponse, ForwardError> {
    let response = forwarder.post(url, body, timeout).await?;
    if response.is_accepted() {
        Ok(response)
    } else {
        Err(ForwardError::Rejected {
            status: response.status,
            body: response.body,
        })
    }
}

/// Real forwarder backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpForwarder {
    client: reqwest::Client,
}

impl HttpForwarder {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ruuvi-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Forwarder for HttpForwarder {
    fn post<'a>(&'a self, url: &'a str, body: &'a Value, timeout: Duration) -> ForwardFuture<'a> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .json(body)
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| ForwardError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| ForwardError::Transport(e.to_string()))?;

            Ok(ForwardResponse { status, body })
        })
    }
}
