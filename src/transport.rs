//! The transport collaborator boundary.
//!
//! The core depends only on the [`Transport`] trait: one dispatch call
//! per operation, returning the raw status and body or an opaque failure
//! reason. [`HttpTransport`] is the default reqwest-backed
//! implementation; tests and embedders can substitute their own.

use async_trait::async_trait;

use crate::connection::ConnectionOptions;
use crate::error::TransportError;
use crate::request::Request;

/// The undecoded outcome of a completed exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, verbatim.
    pub body: String,
}

/// A collaborator able to perform one HTTP exchange.
///
/// Implementations own retry, timeout, and cancellation policy; the
/// core never retries or suppresses a failed dispatch.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the exchange described by `request`.
    ///
    /// ## Errors
    ///
    /// Returns a [`TransportError`] when the exchange could not complete
    /// at all (connectivity, DNS, TLS, timeout). A completed exchange
    /// with a non-success status is NOT a transport error; it comes back
    /// as a [`RawResponse`] for the classifier to reject.
    async fn dispatch(&self, request: &Request) -> Result<RawResponse, TransportError>;
}

/// Default transport over a pooled `reqwest::Client`.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds the underlying HTTP client from the connection options.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(options: &ConnectionOptions) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .pool_max_idle_per_host(options.pool_max_idle_per_host)
            .build()
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn dispatch(&self, request: &Request) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.to_reqwest(), request.url.clone())
            .headers(request.headers.clone());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}
