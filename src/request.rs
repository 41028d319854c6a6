//! Pure request assembly.
//!
//! Everything about an outgoing request — final URL, auth headers, query
//! parameters, body — is decided here from the descriptor, the
//! connection, and the operation's template. No dispatch happens in this
//! module, so every shape is unit-testable without a transport.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::catalog::{Inject, OperationTemplate, Route, PAGE_SIZE_PARAM, QUERY_TEXT_PARAM, SEND_SEGMENT};
use crate::connection::Connection;
use crate::descriptor::{AuthStyle, Descriptor, UrlShape};
use crate::error::{BindError, ConfigError};
use crate::method::HttpMethod;

/// One outgoing request, built per invocation and never reused.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Final URL, shaped from the base URL, descriptor, and route.
    pub url: Url,
    /// Auth and content-type headers.
    pub headers: HeaderMap,
    /// Query parameters, caller-supplied plus template injections.
    pub query: Vec<(String, String)>,
    /// JSON body for body-bearing verbs.
    pub body: Option<Value>,
}

/// Call arguments for one invocation. Unused fields stay at their
/// defaults; which ones matter is decided by the operation's template.
#[derive(Debug, Default)]
pub struct Args<'a> {
    /// Record id for item routes (`/{id}`).
    pub id: Option<&'a str>,
    /// Caller-supplied query parameters.
    pub params: &'a [(String, String)],
    /// Search text for the query-text injection.
    pub text: Option<&'a str>,
    /// JSON body for body-bearing operations.
    pub body: Option<Value>,
}

/// Assembles the request for one operation invocation.
///
/// ## Errors
///
/// Fails when the template has no verb (a non-dispatching operation),
/// when a client-scoped resource is invoked without a client id, or when
/// the credential cannot be carried in a header.
pub fn build(
    descriptor: &Descriptor,
    conn: &Connection,
    template: &OperationTemplate,
    args: Args<'_>,
) -> Result<Request, BindError> {
    let Some(method) = template.method else {
        return Err(ConfigError::NotDispatchable {
            kind: template.kind,
        }
        .into());
    };

    let url = shape_url(descriptor, conn, template, args.id)?;
    let headers = auth_headers(descriptor.auth_style(), conn.credential(), method)?;

    let query = match template.inject {
        Inject::Nothing => args.params.to_vec(),
        Inject::PageSizeOne => {
            let mut query: Vec<(String, String)> = args
                .params
                .iter()
                .filter(|(name, _)| name.as_str() != PAGE_SIZE_PARAM)
                .cloned()
                .collect();
            query.push((PAGE_SIZE_PARAM.to_string(), "1".to_string()));
            query
        }
        Inject::QueryText => vec![(
            QUERY_TEXT_PARAM.to_string(),
            args.text.unwrap_or_default().to_string(),
        )],
    };

    Ok(Request {
        method,
        url,
        headers,
        query,
        body: args.body,
    })
}

/// Roots the operation path at the server, honoring the URL shape flag:
/// client-scoped resources live under `/a/{client_id}/`.
fn shape_url(
    descriptor: &Descriptor,
    conn: &Connection,
    template: &OperationTemplate,
    id: Option<&str>,
) -> Result<Url, BindError> {
    let client_scoped = descriptor.url_shape() == UrlShape::ClientScoped;
    if client_scoped && conn.client_id().is_empty() {
        return Err(ConfigError::MissingClientId.into());
    }

    let segment = match template.route {
        Route::FixedSend => SEND_SEGMENT,
        _ => descriptor.path(),
    };

    let mut url = conn.base_url().clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| ConfigError::InvalidBaseUrl)?;
        segments.pop_if_empty();
        if client_scoped {
            segments.push("a").push(conn.client_id());
        }
        segments.push(segment);
        match template.route {
            Route::Search => {
                segments.push("search");
            }
            Route::Item => {
                segments.push(id.unwrap_or_default());
            }
            Route::Collection | Route::FixedSend | Route::NoRoute => {}
        }
    }
    Ok(url)
}

/// Builds the auth header for the descriptor's style, plus a JSON
/// content type for body-bearing verbs.
fn auth_headers(
    style: AuthStyle,
    credential: &str,
    method: HttpMethod,
) -> Result<HeaderMap, BindError> {
    let value = match style {
        AuthStyle::Bearer => format!("Bearer {credential}"),
        AuthStyle::Basic => {
            // Credential as username, empty password.
            let encoded = BASE64.encode(format!("{credential}:"));
            format!("Basic {encoded}")
        }
    };
    let value = HeaderValue::try_from(value).map_err(|_| ConfigError::InvalidHeader)?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    if method.has_body() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::template;
    use crate::descriptor::OperationKind;

    fn connection() -> Connection {
        Connection::builder(Url::parse("https://api.test").unwrap())
            .client_id("client-1")
            .credential("key")
            .build()
            .unwrap()
    }

    fn descriptor(shape: UrlShape) -> Descriptor {
        Descriptor::new("messages")
            .shape(shape)
            .operations([OperationKind::List])
    }

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_collection_url() {
        let request = build(
            &descriptor(UrlShape::Plain),
            &connection(),
            &template(OperationKind::List),
            Args::default(),
        )
        .unwrap();
        assert_eq!(request.url.as_str(), "https://api.test/messages");
        assert_eq!(request.method, HttpMethod::Get);
    }

    #[test]
    fn test_client_scoped_collection_url() {
        let request = build(
            &descriptor(UrlShape::ClientScoped),
            &connection(),
            &template(OperationKind::List),
            Args::default(),
        )
        .unwrap();
        assert_eq!(request.url.as_str(), "https://api.test/a/client-1/messages");
    }

    #[test]
    fn test_item_route_appends_id() {
        for kind in [OperationKind::Find, OperationKind::Delete, OperationKind::Update] {
            let request = build(
                &descriptor(UrlShape::Plain),
                &connection(),
                &template(kind),
                Args {
                    id: Some("m-42"),
                    ..Args::default()
                },
            )
            .unwrap();
            assert_eq!(request.url.as_str(), "https://api.test/messages/m-42");
        }
    }

    #[test]
    fn test_search_route_suffix() {
        let request = build(
            &descriptor(UrlShape::Plain),
            &connection(),
            &template(OperationKind::Search),
            Args {
                text: Some("hello"),
                ..Args::default()
            },
        )
        .unwrap();
        assert_eq!(request.url.as_str(), "https://api.test/messages/search");
    }

    #[test]
    fn test_send_uses_fixed_segment() {
        let request = build(
            &descriptor(UrlShape::ClientScoped),
            &connection(),
            &template(OperationKind::Send),
            Args::default(),
        )
        .unwrap();
        assert_eq!(request.url.as_str(), "https://api.test/a/client-1/send");
    }

    #[test]
    fn test_bearer_header() {
        let request = build(
            &descriptor(UrlShape::Plain),
            &connection(),
            &template(OperationKind::List),
            Args::default(),
        )
        .unwrap();
        assert_eq!(
            request.headers.get(AUTHORIZATION).unwrap(),
            "Bearer key"
        );
    }

    #[test]
    fn test_basic_header_empty_password() {
        let descriptor = descriptor(UrlShape::Plain).auth(AuthStyle::Basic);
        let request = build(
            &descriptor,
            &connection(),
            &template(OperationKind::List),
            Args::default(),
        )
        .unwrap();
        // base64("key:")
        assert_eq!(
            request.headers.get(AUTHORIZATION).unwrap(),
            "Basic a2V5Og=="
        );
    }

    #[test]
    fn test_content_type_only_for_body_verbs() {
        let get = build(
            &descriptor(UrlShape::Plain),
            &connection(),
            &template(OperationKind::List),
            Args::default(),
        )
        .unwrap();
        assert!(get.headers.get(CONTENT_TYPE).is_none());

        let post = build(
            &descriptor(UrlShape::Plain),
            &connection(),
            &template(OperationKind::Create),
            Args {
                body: Some(serde_json::json!({})),
                ..Args::default()
            },
        )
        .unwrap();
        assert_eq!(post.headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_page_size_injection_overrides_caller() {
        let caller = params(&[("page_size", "50"), ("state", "active")]);
        let request = build(
            &descriptor(UrlShape::Plain),
            &connection(),
            &template(OperationKind::First),
            Args {
                params: &caller,
                ..Args::default()
            },
        )
        .unwrap();
        assert_eq!(
            request.query,
            params(&[("state", "active"), ("page_size", "1")])
        );
    }

    #[test]
    fn test_query_text_drops_ambient_params() {
        let caller = params(&[("page_size", "50")]);
        let request = build(
            &descriptor(UrlShape::Plain),
            &connection(),
            &template(OperationKind::Search),
            Args {
                params: &caller,
                text: Some("needle"),
                ..Args::default()
            },
        )
        .unwrap();
        assert_eq!(request.query, params(&[("q", "needle")]));
    }

    #[test]
    fn test_client_scoped_requires_client_id() {
        let conn = Connection::builder(Url::parse("https://api.test").unwrap())
            .credential("key")
            .build()
            .unwrap();
        let err = build(
            &descriptor(UrlShape::ClientScoped),
            &conn,
            &template(OperationKind::List),
            Args::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BindError::Config(ConfigError::MissingClientId)
        ));
    }

    #[test]
    fn test_build_template_is_not_dispatchable() {
        let err = build(
            &descriptor(UrlShape::Plain),
            &connection(),
            &template(OperationKind::Build),
            Args::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BindError::Config(ConfigError::NotDispatchable {
                kind: OperationKind::Build
            })
        ));
    }
}
