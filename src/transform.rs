//! Response classification and typed transformation.
//!
//! [`classify`] turns a raw transport outcome into a decoded JSON value
//! or a normalized error. The typed mapping ([`single`], [`list`],
//! [`head`]) is deliberately schema-tolerant: keys the result type does
//! not declare are dropped, keys the response omits stay absent, so
//! additive changes in the remote API never break decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{BindError, ValidationError};
use crate::transport::RawResponse;

/// The single success status every dispatching template expects.
const SUCCESS_STATUS: u16 = 200;

/// Classifies a completed exchange.
///
/// Status 200 decodes the body as JSON (an empty body decodes to JSON
/// null); any other status is a [`BindError::Remote`] carrying the body
/// verbatim so callers can inspect service-specific error payloads.
pub fn classify(response: RawResponse) -> Result<Value, BindError> {
    if response.status != SUCCESS_STATUS {
        return Err(BindError::Remote {
            status: response.status,
            body: response.body,
        });
    }
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    let value = serde_json::from_str(&response.body).map_err(ValidationError::from)?;
    Ok(value)
}

/// Maps a decoded value into one typed result.
pub fn single<T: DeserializeOwned>(value: Value) -> Result<T, BindError> {
    serde_json::from_value(value).map_err(|e| ValidationError::from(e).into())
}

/// Maps a decoded value into a list of typed results, preserving order.
///
/// Accepts a bare JSON array, or an object wrapping the collection as
/// its only array member (the common envelope shape); each element is
/// transformed independently.
pub fn list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, BindError> {
    match value {
        Value::Array(items) => items.into_iter().map(single).collect(),
        Value::Object(map) => {
            let mut arrays = map.into_iter().filter(|(_, member)| member.is_array());
            match (arrays.next(), arrays.next()) {
                (Some((_, inner)), None) => list(inner),
                _ => Err(expected_array("an object without a single collection member")),
            }
        }
        other => Err(expected_array(&format!("{other}"))),
    }
}

/// Maps a decoded value into the head of its list, absent when empty.
pub fn head<T: DeserializeOwned>(value: Value) -> Result<Option<T>, BindError> {
    let mut items = list::<T>(value)?;
    if items.is_empty() {
        Ok(None)
    } else {
        Ok(Some(items.remove(0)))
    }
}

fn expected_array(found: &str) -> BindError {
    use serde::de::Error as _;
    ValidationError::from(serde_json::Error::custom(format!(
        "expected a JSON array, found {found}"
    )))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Record {
        id: Option<String>,
        name: Option<String>,
    }

    fn ok(body: &str) -> RawResponse {
        RawResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_classify_success_decodes_body() {
        let value = classify(ok(r#"{"id":"1"}"#)).unwrap();
        assert_eq!(value, json!({"id": "1"}));
    }

    #[test]
    fn test_classify_empty_body_is_null() {
        assert_eq!(classify(ok("")).unwrap(), Value::Null);
        assert_eq!(classify(ok("  \n")).unwrap(), Value::Null);
    }

    #[test]
    fn test_classify_non_success_carries_body_verbatim() {
        let err = classify(RawResponse {
            status: 404,
            body: r#"{"error":"not found"}"#.to_string(),
        })
        .unwrap_err();
        match err {
            BindError::Remote { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, r#"{"error":"not found"}"#);
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_malformed_success_body() {
        let err = classify(ok("not json")).unwrap_err();
        assert!(matches!(
            err,
            BindError::Validation(ValidationError::Decode(_))
        ));
    }

    #[test]
    fn test_single_tolerates_extra_and_missing_keys() {
        let record: Record = single(json!({"id": "1", "extra": "x"})).unwrap();
        assert_eq!(record.id.as_deref(), Some("1"));
        assert_eq!(record.name, None);
    }

    #[test]
    fn test_list_preserves_order() {
        let records: Vec<Record> =
            list(json!([{"id": "1"}, {"id": "2"}, {"id": "3"}])).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_deref().unwrap()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_list_unwraps_single_array_envelope() {
        let records: Vec<Record> =
            list(json!({"total": 2, "messages": [{"id": "1"}, {"id": "2"}]})).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_list_rejects_ambiguous_envelope() {
        let err = list::<Record>(json!({"a": [1], "b": [2]})).unwrap_err();
        assert!(matches!(err, BindError::Validation(_)));
    }

    #[test]
    fn test_list_rejects_scalar() {
        let err = list::<Record>(json!(42)).unwrap_err();
        assert!(matches!(err, BindError::Validation(_)));
    }

    #[test]
    fn test_head_takes_first_element() {
        let record: Option<Record> = head(json!([{"id": "1"}, {"id": "2"}])).unwrap();
        assert_eq!(record.unwrap().id.as_deref(), Some("1"));
    }

    #[test]
    fn test_head_empty_is_absent_not_error() {
        let record: Option<Record> = head(json!([])).unwrap();
        assert!(record.is_none());
    }
}
