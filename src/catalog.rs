//! The operation template catalog.
//!
//! One [`OperationTemplate`] per [`OperationKind`], fully specifying the
//! request shape (verb, route, injected parameters) and how the response
//! is interpreted. [`template`] is total over the kind enum, so an
//! "unknown operation" is unrepresentable; what varies per resource is
//! only which templates the descriptor selects.

use crate::descriptor::OperationKind;
use crate::method::HttpMethod;

/// Fixed path segment used by the send template in place of the
/// resource segment.
pub const SEND_SEGMENT: &str = "send";

/// Query parameter name forced to `1` by the first template.
pub const PAGE_SIZE_PARAM: &str = "page_size";

/// Query parameter name carrying the search text.
pub const QUERY_TEXT_PARAM: &str = "q";

/// How an operation's URL extends the shaped resource root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The resource collection path, unsuffixed.
    Collection,
    /// The collection path with a `/search` suffix.
    Search,
    /// The collection path with a `/{id}` suffix.
    Item,
    /// The fixed send endpoint instead of the resource path.
    FixedSend,
    /// No URL at all; the operation never dispatches.
    NoRoute,
}

/// Parameters the template injects on top of caller arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inject {
    /// Caller parameters pass through unchanged.
    Nothing,
    /// Force `page_size=1`, overriding any caller value.
    PageSizeOne,
    /// The query is exactly `{q: text}`; ambient parameters are dropped.
    QueryText,
}

/// How a classified success body maps to the operation's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// A list of typed results.
    List,
    /// The head of the returned list, absent when empty.
    Head,
    /// A single typed result.
    Single,
    /// The decoded body, passed through untyped.
    PassThrough,
    /// A locally validated draft value; no response exists.
    Draft,
}

/// The full request/response shape for one operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationTemplate {
    /// The kind this template realizes.
    pub kind: OperationKind,
    /// HTTP verb, or `None` for operations that never dispatch.
    pub method: Option<HttpMethod>,
    /// URL shape relative to the shaped resource root.
    pub route: Route,
    /// Template-injected parameters.
    pub inject: Inject,
    /// Success-body interpretation.
    pub output: Output,
}

/// Looks up the template for a kind. Total; every kind has exactly one.
pub fn template(kind: OperationKind) -> OperationTemplate {
    let (method, route, inject, output) = match kind {
        OperationKind::List => (
            Some(HttpMethod::Get),
            Route::Collection,
            Inject::Nothing,
            Output::List,
        ),
        OperationKind::First => (
            Some(HttpMethod::Get),
            Route::Collection,
            Inject::PageSizeOne,
            Output::Head,
        ),
        OperationKind::Search => (
            Some(HttpMethod::Get),
            Route::Search,
            Inject::QueryText,
            Output::List,
        ),
        OperationKind::Find => (
            Some(HttpMethod::Get),
            Route::Item,
            Inject::Nothing,
            Output::Single,
        ),
        OperationKind::Delete => (
            Some(HttpMethod::Delete),
            Route::Item,
            Inject::Nothing,
            Output::PassThrough,
        ),
        OperationKind::Send => (
            Some(HttpMethod::Post),
            Route::FixedSend,
            Inject::Nothing,
            Output::Single,
        ),
        OperationKind::Create => (
            Some(HttpMethod::Post),
            Route::Collection,
            Inject::Nothing,
            Output::Single,
        ),
        OperationKind::Update => (
            Some(HttpMethod::Put),
            Route::Item,
            Inject::Nothing,
            Output::Single,
        ),
        OperationKind::Build => (None, Route::NoRoute, Inject::Nothing, Output::Draft),
    };
    OperationTemplate {
        kind,
        method,
        route,
        inject,
        output,
    }
}
