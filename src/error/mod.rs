//! Layered error types for generated bindings.
//!
//! The hierarchy mirrors the failure origins:
//! - [`BindError`] - Top-level error returned by every operation
//! - [`TransportError`] - The transport collaborator could not complete the exchange
//! - [`ValidationError`] - Draft validation and response decode failures
//! - [`ConfigError`] - Descriptor and connection configuration errors
//!
//! [`raise`] is the single place faults are signalled; the raising-form
//! wrappers funnel every failure through it.

mod bind_error;
mod config_error;
mod transport_error;
mod validation_error;

pub use bind_error::{raise, BindError};
pub use config_error::ConfigError;
pub use transport_error::TransportError;
pub use validation_error::ValidationError;
