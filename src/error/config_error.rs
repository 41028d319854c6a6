//! Descriptor and connection configuration errors.

use thiserror::Error;

use crate::descriptor::OperationKind;

/// Configuration errors, reported at expansion time where possible.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The descriptor declared no operations.
    #[error("descriptor declares no operations")]
    EmptyOperations,

    /// The descriptor's resource path segment is empty.
    #[error("descriptor path segment is empty")]
    EmptyPath,

    /// The resource path must be a single segment; nested paths are
    /// built by the request builder, never declared.
    #[error("descriptor path {path:?} is not a single segment")]
    InvalidPath {
        /// The offending path value.
        path: String,
    },

    /// The invoked operation kind is not in the descriptor's set.
    #[error("operation {kind} is not included in this binding")]
    NotIncluded {
        /// The kind that was invoked.
        kind: OperationKind,
    },

    /// The operation issues no request and cannot be dispatched.
    #[error("operation {kind} does not dispatch a request")]
    NotDispatchable {
        /// The kind that was dispatched.
        kind: OperationKind,
    },

    /// The connection's base URL cannot carry path segments.
    #[error("base URL cannot be extended with path segments")]
    InvalidBaseUrl,

    /// A client-scoped resource was invoked without a client identifier.
    #[error("client-scoped resource requires a client identifier")]
    MissingClientId,

    /// The access credential cannot be carried in an HTTP header.
    #[error("credential produces an invalid header value")]
    InvalidHeader,
}
