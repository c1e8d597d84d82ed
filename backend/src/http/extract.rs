//! Request body extraction.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use super::error::AppError;
use crate::services::{FieldIssue, ValidationErrors};

/// A request body parsed as a JSON object.
///
/// The raw body is read first so every failure maps onto the API's own error
/// bodies instead of axum's plain-text rejections:
///
/// - an empty body is an empty object
/// - invalid JSON is [`AppError::MalformedBody`]
/// - JSON that is not an object is a validation error
/// - bodies over the router's size limit keep their 413 status
#[derive(Debug, Clone, Default)]
pub struct JsonObject(pub Map<String, Value>);

impl JsonObject {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(AppError::Validation(ValidationErrors::new(vec![
                FieldIssue::NotAnObject,
            ]))),
            Err(e) => Err(AppError::MalformedBody(e.to_string())),
        }
    }
}

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(AppError::BodyRejected)?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_empty_object() {
        assert!(JsonObject::from_bytes(b"").unwrap().0.is_empty());
        assert!(JsonObject::from_bytes(b" \n").unwrap().0.is_empty());
    }

    #[test]
    fn test_object_body() {
        let JsonObject(map) = JsonObject::from_bytes(br#"{"age": 3}"#).unwrap();
        assert_eq!(map.get("age"), Some(&Value::from(3)));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            JsonObject::from_bytes(b"{\"name\":"),
            Err(AppError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_non_object_body() {
        match JsonObject::from_bytes(b"[1, 2]") {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.messages(), vec!["request body should be a JSON object"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
