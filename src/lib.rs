//! nexaa - typed GraphQL client core for the Nexaa cloud platform
//!
//! Describes the data a command wants back with plain Rust types, compiles
//! that description into a GraphQL document at run time, sends it, and
//! deserializes the reply into the same type.
//!
//! # Architecture
//!
//! - [`graphql`] - Document synthesis, transport and response processing
//! - [`api`] - Typed namespace and volume operations built on [`graphql`]
//! - [`auth`] - Bearer token supply for requests
//! - [`config`] - Environment selection and client settings
//!
//! # Error Model
//!
//! Building a document fails fast with a [`graphql::BuildError`]. Executing
//! one distinguishes transport failures from `errors` reported inside a
//! successful response; see [`graphql::GraphQLError`].

extern crate self as nexaa;

pub mod api;
pub mod auth;
pub mod config;
pub mod graphql;

/// Items used by exported macros. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use serde;
}
