//! Transport-level failure reporting.

use thiserror::Error;

/// The underlying transport could not complete the exchange.
///
/// Connectivity, DNS, TLS, and timeout failures all land here. The
/// reason string is opaque to the core: it is whatever the transport
/// collaborator reported, preserved for diagnostics only.
#[derive(Debug, Error)]
#[error("transport failure: {reason}")]
pub struct TransportError {
    reason: String,
}

impl TransportError {
    /// Wraps a collaborator-supplied failure reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The opaque failure reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
