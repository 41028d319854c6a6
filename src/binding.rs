//! The binding generator.
//!
//! [`Binding::expand`] consumes a [`Descriptor`] once, validates it, and
//! materializes a fixed kind-to-template registry. Every operation is a
//! stateless request/response round trip through the same pipeline:
//! request builder, transport dispatch, response classification, typed
//! transformation. [`Binding::raising`] exposes the same family of
//! operations in fault-raising form.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{instrument, Span};

use crate::catalog::{self, OperationTemplate};
use crate::connection::Connection;
use crate::descriptor::{Descriptor, OperationKind};
use crate::error::{raise, BindError, ConfigError, ValidationError};
use crate::request::{self, Args};
use crate::transform;

/// A family of client operations expanded from one descriptor.
///
/// `T` is the resource's typed result. Expansion happens once; the
/// binding holds no mutable state afterwards and may be shared freely
/// across tasks.
///
/// ## Examples
///
/// ```rust,ignore
/// use apibind::{Binding, Descriptor, OperationKind, UrlShape};
///
/// #[derive(serde::Deserialize)]
/// struct Message { id: Option<String>, subject: Option<String> }
///
/// let binding: Binding<Message> = Binding::expand(
///     Descriptor::new("messages")
///         .shape(UrlShape::ClientScoped)
///         .operations([OperationKind::List, OperationKind::Find]),
/// )?;
///
/// let messages = binding.list(&conn, &[]).await?;
/// let one = binding.find(&conn, "m-1").await?;
/// ```
pub struct Binding<T> {
    descriptor: Descriptor,
    registry: BTreeMap<OperationKind, OperationTemplate>,
    _result: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> Binding<T> {
    /// Expands a descriptor into its operation family.
    ///
    /// Validation is front-loaded here so misconfiguration fails at
    /// expansion, not on the first call: the path must be one non-empty
    /// segment and the operation set must be non-empty. The catalog is
    /// total over [`OperationKind`], so an unknown kind cannot occur.
    ///
    /// ## Errors
    ///
    /// Returns a [`ConfigError`] describing the descriptor defect.
    pub fn expand(descriptor: Descriptor) -> Result<Self, ConfigError> {
        if descriptor.path().is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        if descriptor.path().contains('/') {
            return Err(ConfigError::InvalidPath {
                path: descriptor.path().to_string(),
            });
        }
        if descriptor.operation_set().is_empty() {
            return Err(ConfigError::EmptyOperations);
        }
        let registry = descriptor
            .operation_set()
            .iter()
            .map(|&kind| (kind, catalog::template(kind)))
            .collect();
        Ok(Self {
            descriptor,
            registry,
            _result: PhantomData,
        })
    }

    /// The descriptor this binding was expanded from.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// The fault-raising view of this binding's operations.
    pub fn raising(&self) -> Raising<'_, T> {
        Raising { inner: self }
    }

    fn template(&self, kind: OperationKind) -> Result<&OperationTemplate, ConfigError> {
        self.registry
            .get(&kind)
            .ok_or(ConfigError::NotIncluded { kind })
    }

    /// Shared dispatch pipeline: build, send, classify.
    #[instrument(
        name = "bind_request",
        skip_all,
        fields(
            resource = %self.descriptor.path(),
            operation = %kind,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    async fn dispatch(
        &self,
        conn: &Connection,
        kind: OperationKind,
        args: Args<'_>,
    ) -> Result<Value, BindError> {
        let template = self.template(kind)?;
        let request = request::build(&self.descriptor, conn, template, args)?;

        Span::current().record("http.method", request.method.to_string().as_str());
        Span::current().record("http.url", request.url.as_str());

        let response = conn.transport().dispatch(&request).await?;
        Span::current().record("http.status_code", response.status);

        transform::classify(response)
    }

    /// Lists the resource collection with caller-supplied query
    /// parameters.
    pub async fn list(
        &self,
        conn: &Connection,
        params: &[(String, String)],
    ) -> Result<Vec<T>, BindError> {
        let body = self
            .dispatch(
                conn,
                OperationKind::List,
                Args {
                    params,
                    ..Args::default()
                },
            )
            .await?;
        transform::list(body)
    }

    /// Fetches the first matching record: `list` with a forced
    /// `page_size=1`, returning the head of the result or `None` when
    /// the collection is empty.
    pub async fn first(
        &self,
        conn: &Connection,
        params: &[(String, String)],
    ) -> Result<Option<T>, BindError> {
        let body = self
            .dispatch(
                conn,
                OperationKind::First,
                Args {
                    params,
                    ..Args::default()
                },
            )
            .await?;
        transform::head(body)
    }

    /// Searches the collection. The request carries exactly `{q: text}`;
    /// no other parameters are sent.
    pub async fn search(&self, conn: &Connection, text: &str) -> Result<Vec<T>, BindError> {
        let body = self
            .dispatch(
                conn,
                OperationKind::Search,
                Args {
                    text: Some(text),
                    ..Args::default()
                },
            )
            .await?;
        transform::list(body)
    }

    /// Fetches a single record by id.
    pub async fn find(&self, conn: &Connection, id: &str) -> Result<T, BindError> {
        let body = self
            .dispatch(
                conn,
                OperationKind::Find,
                Args {
                    id: Some(id),
                    ..Args::default()
                },
            )
            .await?;
        transform::single(body)
    }

    /// Deletes a record by id, passing the decoded response body through
    /// untyped.
    pub async fn delete(&self, conn: &Connection, id: &str) -> Result<Value, BindError> {
        self.dispatch(
            conn,
            OperationKind::Delete,
            Args {
                id: Some(id),
                ..Args::default()
            },
        )
        .await
    }

    /// Posts a message to the fixed send endpoint.
    pub async fn send<B: Serialize>(&self, conn: &Connection, message: &B) -> Result<T, BindError> {
        let body = self
            .dispatch(
                conn,
                OperationKind::Send,
                Args {
                    body: Some(encode(message)?),
                    ..Args::default()
                },
            )
            .await?;
        transform::single(body)
    }

    /// Creates a record in the collection.
    pub async fn create<B: Serialize>(&self, conn: &Connection, record: &B) -> Result<T, BindError> {
        let body = self
            .dispatch(
                conn,
                OperationKind::Create,
                Args {
                    body: Some(encode(record)?),
                    ..Args::default()
                },
            )
            .await?;
        transform::single(body)
    }

    /// Updates a record by id with a changeset body.
    pub async fn update<B: Serialize>(
        &self,
        conn: &Connection,
        id: &str,
        changes: &B,
    ) -> Result<T, BindError> {
        let body = self
            .dispatch(
                conn,
                OperationKind::Update,
                Args {
                    id: Some(id),
                    body: Some(encode(changes)?),
                    ..Args::default()
                },
            )
            .await?;
        transform::single(body)
    }

    /// Validates a draft payload without issuing any request.
    ///
    /// `D` is the resource's draft type; declaring it with
    /// `#[serde(deny_unknown_fields)]` is what rejects unrecognized
    /// fields. Failures come back as [`ValidationError::Draft`].
    pub fn build<D: DeserializeOwned>(&self, payload: Value) -> Result<D, BindError> {
        self.template(OperationKind::Build)?;
        serde_json::from_value(payload).map_err(|e| ValidationError::draft(e).into())
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Value, BindError> {
    serde_json::to_value(body).map_err(|e| ValidationError::from(e).into())
}

/// Fault-raising view over a [`Binding`].
///
/// Each method delegates to the result-form operation and unwraps
/// through [`raise`]; on failure the fault carries the normalized
/// [`BindError`] value. No logic lives here.
#[derive(Debug)]
pub struct Raising<'a, T> {
    inner: &'a Binding<T>,
}

impl<T: DeserializeOwned> Raising<'_, T> {
    /// Raising form of [`Binding::list`].
    pub async fn list(&self, conn: &Connection, params: &[(String, String)]) -> Vec<T> {
        raise(self.inner.list(conn, params).await)
    }

    /// Raising form of [`Binding::first`].
    pub async fn first(&self, conn: &Connection, params: &[(String, String)]) -> Option<T> {
        raise(self.inner.first(conn, params).await)
    }

    /// Raising form of [`Binding::search`].
    pub async fn search(&self, conn: &Connection, text: &str) -> Vec<T> {
        raise(self.inner.search(conn, text).await)
    }

    /// Raising form of [`Binding::find`].
    pub async fn find(&self, conn: &Connection, id: &str) -> T {
        raise(self.inner.find(conn, id).await)
    }

    /// Raising form of [`Binding::delete`].
    pub async fn delete(&self, conn: &Connection, id: &str) -> Value {
        raise(self.inner.delete(conn, id).await)
    }

    /// Raising form of [`Binding::send`].
    pub async fn send<B: Serialize>(&self, conn: &Connection, message: &B) -> T {
        raise(self.inner.send(conn, message).await)
    }

    /// Raising form of [`Binding::create`].
    pub async fn create<B: Serialize>(&self, conn: &Connection, record: &B) -> T {
        raise(self.inner.create(conn, record).await)
    }

    /// Raising form of [`Binding::update`].
    pub async fn update<B: Serialize>(&self, conn: &Connection, id: &str, changes: &B) -> T {
        raise(self.inner.update(conn, id, changes).await)
    }

    /// Raising form of [`Binding::build`].
    pub fn build<D: DeserializeOwned>(&self, payload: Value) -> D {
        raise(self.inner.build(payload))
    }
}
