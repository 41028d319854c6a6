//! Declarative resource descriptors.
//!
//! A [`Descriptor`] is the whole input to the binding generator: one
//! resource path segment, the set of [`OperationKind`]s the resource
//! supports, how its auth header is built, and whether its URL is
//! nested under the client scope.

use std::collections::BTreeSet;

use strum::{Display, EnumIter, EnumString};

/// The canonical operations the generator understands.
///
/// Each kind maps to exactly one template in the catalog. `Create` and
/// `Update` share save semantics but differ in verb and URL; `Build`
/// performs structural validation with no network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum OperationKind {
    /// GET the resource collection.
    List,
    /// `List` constrained to one page entry, returning its head.
    First,
    /// GET the collection's `/search` route with a `q` parameter.
    Search,
    /// GET a single record by id.
    Find,
    /// DELETE a single record by id.
    Delete,
    /// POST to the fixed send endpoint.
    Send,
    /// Validate a draft payload locally; no request is issued.
    Build,
    /// POST a new record to the collection.
    Create,
    /// PUT a changeset to a record by id.
    Update,
}

/// How the `Authorization` header is constructed from the connection's
/// access credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum AuthStyle {
    /// `Authorization: Bearer {credential}`.
    Bearer,
    /// HTTP Basic with the credential as username and an empty password.
    Basic,
}

/// Whether a resource's URL is rooted under the client scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlShape {
    /// `{server}/a/{client_id}/{resource}[...]`.
    ClientScoped,
    /// `{server}/{resource}[...]`.
    Plain,
}

/// Declarative configuration for one resource binding.
///
/// Supplied once per resource and consumed by
/// [`Binding::expand`](crate::Binding::expand); never mutated afterwards.
///
/// ## Examples
///
/// ```rust
/// use apibind::{AuthStyle, Descriptor, OperationKind, UrlShape};
///
/// let descriptor = Descriptor::new("messages")
///     .auth(AuthStyle::Bearer)
///     .shape(UrlShape::ClientScoped)
///     .operations([OperationKind::List, OperationKind::Find, OperationKind::Send]);
///
/// assert!(descriptor.includes(OperationKind::Find));
/// assert!(!descriptor.includes(OperationKind::Delete));
/// ```
#[derive(Debug, Clone)]
pub struct Descriptor {
    path: String,
    auth: AuthStyle,
    shape: UrlShape,
    operations: BTreeSet<OperationKind>,
}

impl Descriptor {
    /// Starts a descriptor for the given resource path segment.
    ///
    /// Defaults: bearer auth, plain URL shape, empty operation set.
    /// Validation happens at expansion time, not here.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            auth: AuthStyle::Bearer,
            shape: UrlShape::Plain,
            operations: BTreeSet::new(),
        }
    }

    /// Sets the header-construction style.
    pub fn auth(mut self, auth: AuthStyle) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the URL shape.
    pub fn shape(mut self, shape: UrlShape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the included operation kinds. Duplicates collapse.
    pub fn operations(mut self, kinds: impl IntoIterator<Item = OperationKind>) -> Self {
        self.operations = kinds.into_iter().collect();
        self
    }

    /// The resource path segment.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The header-construction style.
    pub fn auth_style(&self) -> AuthStyle {
        self.auth
    }

    /// The URL shape.
    pub fn url_shape(&self) -> UrlShape {
        self.shape
    }

    /// The included operation kinds.
    pub fn operation_set(&self) -> &BTreeSet<OperationKind> {
        &self.operations
    }

    /// Returns `true` if the descriptor includes `kind`.
    pub fn includes(&self, kind: OperationKind) -> bool {
        self.operations.contains(&kind)
    }
}
