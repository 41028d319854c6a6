//! HTTP verbs emitted by the operation template catalog.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods used by generated resource operations.
///
/// Only the verbs the template catalog can emit are represented; the
/// catalog never produces PATCH, HEAD, or the diagnostic methods.
///
/// ## Examples
///
/// ```rust
/// use apibind::HttpMethod;
///
/// let method = HttpMethod::Get;
/// assert!(!method.has_body());
///
/// let parsed: HttpMethod = "PUT".parse().unwrap();
/// assert_eq!(parsed, HttpMethod::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET - Retrieve a resource or collection.
    Get,
    /// HTTP POST - Create a resource or trigger a send.
    Post,
    /// HTTP PUT - Replace a resource.
    Put,
    /// HTTP DELETE - Remove a resource.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if this verb carries a JSON request body.
    ///
    /// Body-bearing verbs also get a `Content-Type: application/json`
    /// header from the request builder.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        method.to_reqwest()
    }
}
