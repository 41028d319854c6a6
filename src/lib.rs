//! Declarative resource bindings for remote REST APIs.
//!
//! One [`Descriptor`] per resource — its path segment, the operations it
//! supports, its auth header style, and whether it lives under the
//! client scope — expands into a uniform family of client operations:
//! list, first, search, find, delete, create, update, send, and
//! validate-only build. Every operation comes in a result-returning form
//! on [`Binding`] and a fault-raising form behind [`Binding::raising`].
//!
//! Public API layers:
//! - [`Descriptor`]/[`OperationKind`]: the declarative input.
//! - [`Binding`]: one-time expansion and the operation family.
//! - [`Connection`]: server URL, client id, credential, transport options.
//! - [`Transport`]: the pluggable HTTP collaborator boundary.
//! - [`BindError`]: unified error type returned by every operation.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use apibind::{AuthStyle, Binding, Connection, Descriptor, OperationKind, UrlShape};
//! use url::Url;
//!
//! #[derive(serde::Deserialize)]
//! struct Message {
//!     id: Option<String>,
//!     subject: Option<String>,
//! }
//!
//! let conn = Connection::builder(Url::parse("https://api.example.com")?)
//!     .client_id("client-1")
//!     .credential("sk-xxx")
//!     .build()?;
//!
//! let messages: Binding<Message> = Binding::expand(
//!     Descriptor::new("messages")
//!         .auth(AuthStyle::Bearer)
//!         .shape(UrlShape::ClientScoped)
//!         .operations([OperationKind::List, OperationKind::Find, OperationKind::Send]),
//! )?;
//!
//! let inbox = messages.list(&conn, &[]).await?;
//! let one = messages.raising().find(&conn, "m-1").await;
//! ```

mod binding;
pub mod catalog;
mod connection;
mod descriptor;
mod error;
mod method;
mod request;
pub mod transform;
mod transport;

pub use binding::{Binding, Raising};
pub use catalog::OperationTemplate;
pub use connection::{Connection, ConnectionBuilder, ConnectionOptions};
pub use descriptor::{AuthStyle, Descriptor, OperationKind, UrlShape};
pub use error::{raise, BindError, ConfigError, TransportError, ValidationError};
pub use method::HttpMethod;
pub use request::{Args, Request};
pub use transport::{HttpTransport, RawResponse, Transport};
