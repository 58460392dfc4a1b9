//! graphql - typed document synthesis and execution
//!
//! Callers describe the shape of the data they want with ordinary Rust
//! types. The builder turns that description into a query or mutation
//! document at run time, the client sends it, and the reply is deserialized
//! back into the same type.
//!
//! # Components
//!
//! - [`GraphQLType`] / [`graphql_object!`] - Declared shape of a template type
//! - [`classify`] - Scalar, object or list shape of one field
//! - [`render_fields`] - Selection-set text, one rule per shape
//! - [`Parameter`] / [`Parameters`] - Typed document variables
//! - [`DocumentBuilder`] - Query and mutation documents
//! - [`Client`] - HTTP transport and response processing
//!
//! # Error Model
//!
//! Failures split into two tiers. Transport failures (network, timeout,
//! non-success HTTP status) mean the server never produced a GraphQL answer.
//! Protocol failures arrive in the `errors` array of a successful reply. See
//! [`GraphQLError`].
//!
//! # Example
//!
//! ```ignore
//! use nexaa::graphql::{Client, ClientConfig, Parameter, Parameters};
//!
//! nexaa::graphql_object! {
//!     #[derive(Debug, Default)]
//!     pub struct Namespace {
//!         pub id: String,
//!         pub name: String,
//!     }
//! }
//!
//! nexaa::graphql_object! {
//!     #[derive(Debug, Default)]
//!     pub struct NamespaceQuery {
//!         #[graphql("namespace(id: $id)")]
//!         pub namespace: Namespace,
//!     }
//! }
//!
//! let client = Client::new(ClientConfig::new("https://example.test/graphql"), None)?;
//! let params = Parameters::new().with("id", Parameter::id("n1"));
//! let result: NamespaceQuery = client.query(&params).await?;
//! ```
//!
//! [`graphql_object!`]: crate::graphql_object

mod classify;
mod client;
mod document;
mod errors;
mod parameter;
mod response;
mod strategy;
mod types;

pub use classify::{classify, Shape};
pub use client::{Client, ClientConfig, USER_AGENT};
pub use document::{Document, DocumentBuilder, Operation};
pub use errors::{BuildError, GraphQLError, Location, ResponseError};
pub use parameter::{Parameter, Parameters};
pub use response::{apply_data, process_response, ResponseEnvelope};
pub use strategy::{render, render_fields, MAX_DEPTH};
pub use types::{aliased_selection, camel_case, FieldDescriptor, GraphQLType, TypeDescriptor};
