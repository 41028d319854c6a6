//! Connection values threaded through every operation call.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::BindError;
use crate::transport::{HttpTransport, Transport};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default idle connections kept per host by the pooled transport.
const DEFAULT_POOL_MAX_IDLE: usize = 10;

/// Transport options carried by a [`Connection`].
///
/// These configure the default [`HttpTransport`]; a custom transport is
/// free to ignore them.
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// Per-request timeout enforced by the transport.
    pub timeout: Duration,
    /// Idle connections kept per host.
    pub pool_max_idle_per_host: usize,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE,
        }
    }
}

/// Builder for configuring a [`Connection`].
pub struct ConnectionBuilder {
    base_url: Url,
    client_id: String,
    credential: String,
    options: ConnectionOptions,
    transport: Option<Arc<dyn Transport>>,
}

impl ConnectionBuilder {
    fn new(base_url: Url) -> Self {
        Self {
            base_url,
            client_id: String::new(),
            credential: String::new(),
            options: ConnectionOptions::default(),
            transport: None,
        }
    }

    /// Sets the client identifier used by client-scoped resource paths.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Sets the access credential consumed by the auth header styles.
    pub fn credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = credential.into();
        self
    }

    /// Sets the request timeout.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let conn = Connection::builder(base_url)
    ///     .timeout(Duration::from_secs(60))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Sets the idle connections kept per host.
    pub fn pool_max_idle_per_host(mut self, count: usize) -> Self {
        self.options.pool_max_idle_per_host = count;
        self
    }

    /// Substitutes a custom transport collaborator.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the [`Connection`], constructing the default HTTP
    /// transport when none was injected.
    ///
    /// ## Errors
    ///
    /// Returns an error if the default transport cannot be constructed.
    pub fn build(self) -> Result<Connection, BindError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.options)?),
        };
        Ok(Connection {
            base_url: self.base_url,
            client_id: self.client_id,
            credential: self.credential,
            options: self.options,
            transport,
        })
    }
}

/// Immutable connection value shared by all operations.
///
/// Created once by the caller and never mutated by the core; cloning is
/// cheap (the transport is shared) and concurrent reuse needs no
/// coordination.
///
/// ## Examples
///
/// ```rust,ignore
/// use apibind::Connection;
/// use url::Url;
///
/// let base_url = Url::parse("https://api.example.com")?;
/// let conn = Connection::builder(base_url)
///     .client_id("client-1")
///     .credential("sk-xxx")
///     .build()?;
/// ```
#[derive(Clone)]
pub struct Connection {
    base_url: Url,
    client_id: String,
    credential: String,
    options: ConnectionOptions,
    transport: Arc<dyn Transport>,
}

impl Connection {
    /// Creates a new builder for configuring a connection.
    pub fn builder(base_url: Url) -> ConnectionBuilder {
        ConnectionBuilder::new(base_url)
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The client identifier, empty when unset.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The access credential.
    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// The transport options.
    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// The transport collaborator.
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

impl fmt::Debug for Connection {
    // The credential stays out of debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url.as_str())
            .field("client_id", &self.client_id)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let base_url = Url::parse("https://example.com").unwrap();
        let conn = Connection::builder(base_url).build().unwrap();
        assert_eq!(conn.base_url().as_str(), "https://example.com/");
        assert_eq!(conn.client_id(), "");
        assert_eq!(conn.options().timeout, Duration::from_secs(30));
        assert_eq!(conn.options().pool_max_idle_per_host, 10);
    }

    #[test]
    fn test_custom_timeout() {
        let base_url = Url::parse("https://example.com").unwrap();
        let conn = Connection::builder(base_url)
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap();
        assert_eq!(conn.options().timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_debug_hides_credential() {
        let base_url = Url::parse("https://example.com").unwrap();
        let conn = Connection::builder(base_url)
            .credential("sk-secret")
            .build()
            .unwrap();
        let rendered = format!("{conn:?}");
        assert!(!rendered.contains("sk-secret"));
    }
}
