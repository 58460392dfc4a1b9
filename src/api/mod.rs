//! api - platform resource operations
//!
//! Thin, typed wrappers over [`Client`] for the resources the CLI manages.
//! Each operation declares its result template with
//! [`graphql_object!`](crate::graphql_object) and lets the document builder
//! derive the selection set.
//!
//! # Components
//!
//! - [`namespace`] - List, look up, create and delete namespaces
//! - [`volume`] - List, look up, create, grow and delete volumes
//!
//! # Example
//!
//! ```ignore
//! use nexaa::config::Config;
//! use nexaa::graphql::Client;
//!
//! let client = Client::from_config(&Config::load()?, None)?;
//! for ns in client.namespaces_list().await? {
//!     println!("{}", ns.name);
//! }
//! ```
//!
//! [`Client`]: crate::graphql::Client

pub mod namespace;
pub mod volume;

pub use namespace::{Namespace, NamespaceCreateInput};
pub use volume::{Volume, VolumeCreateInput, VolumeModifyInput};

use serde_json::Value;

use crate::graphql::GraphQLError;

/// Interpret the root value of a boolean mutation.
fn expect_bool(value: Value, operation: &str) -> Result<bool, GraphQLError> {
    value.as_bool().ok_or_else(|| {
        GraphQLError::Decode(format!("{} returned {} instead of a boolean", operation, value))
    })
}
