//! Top-level error type and the fault-raising helper.

use thiserror::Error;

use super::{ConfigError, TransportError, ValidationError};

/// Top-level error type for all generated operations.
///
/// Every failure an operation can produce normalizes into one of these
/// variants, so callers can handle outcomes uniformly while still
/// matching on the origin when they need to.
///
/// ## Examples
///
/// ```rust,ignore
/// use apibind::BindError;
///
/// fn handle_error(err: BindError) {
///     match err {
///         BindError::Transport(e) => eprintln!("network failure: {e}"),
///         BindError::Remote { status, body } => eprintln!("remote {status}: {body}"),
///         BindError::Validation(e) => eprintln!("invalid payload: {e}"),
///         BindError::Config(e) => eprintln!("configuration error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum BindError {
    /// The transport collaborator could not complete the exchange.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The exchange completed but the status was not the success code.
    /// Carries the raw response body so callers can inspect
    /// service-specific error payloads.
    #[error("remote returned status {status}")]
    Remote {
        /// HTTP status code of the response.
        status: u16,
        /// The response body, verbatim and undecoded.
        body: String,
    },

    /// Draft validation or response decode failures.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Descriptor or connection configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Unwraps an operation outcome, signalling a fault on the error variant.
///
/// The fault is raised with [`std::panic::panic_any`] carrying the
/// normalized [`BindError`] value itself, so a catching caller can
/// downcast the payload back to the error. This is the only fault-raising
/// site in the crate; result-form operations never panic.
pub fn raise<T>(outcome: Result<T, BindError>) -> T {
    match outcome {
        Ok(value) => value,
        Err(err) => std::panic::panic_any(err),
    }
}
