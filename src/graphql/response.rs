//! graphql::response
//!
//! Reduction of an HTTP reply into data or a categorized error.
//!
//! # Outcomes
//!
//! | Reply                                  | Result                          |
//! |----------------------------------------|---------------------------------|
//! | 401, any body                          | [`GraphQLError::Unauthenticated`] |
//! | other non-2xx                          | [`GraphQLError::Http`] with raw body |
//! | 2xx, non-empty `errors`                | [`GraphQLError::Protocol`]      |
//! | 2xx, body is not a response envelope   | [`GraphQLError::Decode`]        |
//! | 2xx, no errors                         | `data` (if any)                 |
//!
//! `errors` is always inspected before `data`, and a destination is only
//! assigned after the whole payload deserialized successfully, so a failed
//! call never leaves a template partially filled.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::errors::{GraphQLError, ResponseError};

/// Wire shape of a response body.
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub data: Option<Value>,
    /// Raw entries; see [`ResponseError::from_value`]
    #[serde(default)]
    pub errors: Option<Vec<Value>>,
}

/// Reduce a status code and body to the response's `data`.
///
/// Returns `Ok(None)` for a successful reply whose `data` is absent or null.
///
/// # Errors
///
/// See the module table.
pub fn process_response(status: u16, body: &[u8]) -> Result<Option<Value>, GraphQLError> {
    if status == 401 {
        return Err(GraphQLError::Unauthenticated);
    }
    if !(200..300).contains(&status) {
        return Err(GraphQLError::Http {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    let envelope: ResponseEnvelope = serde_json::from_slice(body)
        .map_err(|e| GraphQLError::Decode(format!("invalid response body: {}", e)))?;

    if let Some(errors) = envelope.errors {
        if !errors.is_empty() {
            tracing::warn!(count = errors.len(), "response carried errors");
            let errors = errors.into_iter().map(ResponseError::from_value).collect();
            return Err(GraphQLError::Protocol(errors));
        }
    }

    Ok(envelope.data.filter(|data| !data.is_null()))
}

/// Deserialize `data` (or `data.<root>`) into `destination`.
///
/// Does nothing when there is no destination.
///
/// # Errors
///
/// Returns [`GraphQLError::Decode`] if data is missing, the root key is
/// absent, or the payload does not match `T`. The destination is untouched in
/// every error case.
pub fn apply_data<T: DeserializeOwned>(
    data: Option<Value>,
    root: Option<&str>,
    destination: Option<&mut T>,
) -> Result<(), GraphQLError> {
    let Some(destination) = destination else {
        return Ok(());
    };

    let data = data.ok_or_else(|| GraphQLError::Decode("response contained no data".into()))?;
    let payload = match root {
        Some(key) => take_root(data, key)?,
        None => data,
    };

    let value: T = serde_json::from_value(payload)
        .map_err(|e| GraphQLError::Decode(format!("unexpected data shape: {}", e)))?;
    *destination = value;
    Ok(())
}

/// Extract the value under `key` from an object-valued `data`.
pub(crate) fn take_root(data: Value, key: &str) -> Result<Value, GraphQLError> {
    match data {
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| GraphQLError::Decode(format!("response data has no '{}' field", key))),
        _ => Err(GraphQLError::Decode("response data is not an object".into())),
    }
}
