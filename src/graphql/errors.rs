//! graphql::errors
//!
//! Error types for document construction and execution.
//!
//! # Design
//!
//! Failures fall into four tiers, and callers must be able to tell them
//! apart:
//!
//! - **construction** ([`BuildError`]): the template or parameters cannot be
//!   expressed as a document. Always a programmer error.
//! - **transport** ([`GraphQLError::Network`], [`GraphQLError::Timeout`],
//!   [`GraphQLError::Http`]): the request never produced a usable response.
//! - **authentication** ([`GraphQLError::Unauthenticated`]): HTTP 401, so the
//!   caller can prompt for a new login.
//! - **protocol** ([`GraphQLError::Protocol`]): the server answered, but the
//!   response carries a non-empty `errors` array.
//!
//! Nothing here is retried. Error messages never contain bearer tokens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::auth::AuthError;

/// Errors raised while synthesizing a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A template field has a type with no selection equivalent.
    #[error("field '{field}' has unsupported kind '{kind}'")]
    UnsupportedField {
        /// Wire name of the offending field
        field: String,
        /// Kind reported by the type description
        kind: &'static str,
    },

    /// An object or list field whose type declares no fields.
    #[error("field '{field}' selects an object type with no fields")]
    EmptySelection {
        /// Wire name of the offending field
        field: String,
    },

    /// Nesting went deeper than the builder allows (usually a recursive type).
    #[error("field '{field}' nests deeper than {max} levels")]
    DepthExceeded {
        /// Wire name of the field where the limit was hit
        field: String,
        /// The nesting limit
        max: usize,
    },

    /// The result template is not an object type.
    #[error("result template must be an object type")]
    TemplateNotObject,

    /// A mutation or parameter name is not a valid GraphQL name.
    #[error("'{0}' is not a valid GraphQL name")]
    InvalidName(String),

    /// A parameter was declared with an empty type name.
    #[error("parameter '{0}' has an empty type name")]
    EmptyType(String),

    /// A structured parameter value could not be serialized.
    #[error("cannot serialize value for parameter of type '{graphql_type}': {message}")]
    InvalidValue {
        /// Declared input type
        graphql_type: String,
        /// Serializer message
        message: String,
    },
}

/// Source location attached to a response error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// One entry of a response's `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseError {
    /// Human-readable message
    pub message: String,
    /// Path to the failing field, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    /// Document locations, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
    /// Server-specific extensions, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

/// Errors from executing a document.
#[derive(Debug, Error)]
pub enum GraphQLError {
    /// The document could not be built.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Network or connection failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// HTTP 401: the access token was missing, invalid or expired.
    #[error("not authenticated: the API rejected the access token")]
    Unauthenticated,

    /// Any other non-success HTTP status, with the raw response body.
    #[error("request failed with HTTP {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The response carried a non-empty `errors` array.
    #[error("request returned errors: {}", join_messages(.0))]
    Protocol(Vec<ResponseError>),

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The token provider could not supply a bearer token.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ResponseError {
    /// Build an error from one raw entry of an `errors` array.
    ///
    /// Never fails: members with an unexpected shape are dropped, and an
    /// entry without a string `message` uses its JSON rendering instead.
    pub fn from_value(entry: Value) -> Self {
        let Value::Object(mut map) = entry else {
            let message = match entry {
                Value::String(message) => message,
                other => other.to_string(),
            };
            return Self {
                message,
                path: None,
                locations: None,
                extensions: None,
            };
        };

        let path = match map.get("path") {
            Some(Value::Array(path)) => Some(path.clone()),
            _ => None,
        };
        let locations = map
            .get("locations")
            .and_then(|v| serde_json::from_value::<Vec<Location>>(v.clone()).ok());
        let extensions = match map.get("extensions") {
            Some(Value::Object(extensions)) => Some(extensions.clone()),
            _ => None,
        };
        let message = match map.remove("message") {
            Some(Value::String(message)) => message,
            Some(other) => {
                map.insert("message".to_string(), other);
                Value::Object(map).to_string()
            }
            None => Value::Object(map).to_string(),
        };

        Self {
            message,
            path,
            locations,
            extensions,
        }
    }
}

impl GraphQLError {
    /// Check if this error happened below the GraphQL protocol.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GraphQLError::Network(_) | GraphQLError::Timeout | GraphQLError::Http { .. }
        )
    }

    /// Check if this error is reported inside a successful response.
    pub fn is_protocol(&self) -> bool {
        matches!(self, GraphQLError::Protocol(_))
    }

    /// Check if this error can be resolved by logging in again.
    pub fn needs_reauth(&self) -> bool {
        match self {
            GraphQLError::Unauthenticated => true,
            GraphQLError::Auth(err) => err.needs_reauth(),
            _ => false,
        }
    }

    /// Messages of a protocol error, empty for every other kind.
    pub fn messages(&self) -> Vec<&str> {
        match self {
            GraphQLError::Protocol(errors) => errors.iter().map(|e| e.message.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<reqwest::Error> for GraphQLError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GraphQLError::Timeout
        } else {
            GraphQLError::Network(err.to_string())
        }
    }
}

fn join_messages(errors: &[ResponseError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
