//! config::environment
//!
//! Deployment environments and their fixed endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// A platform deployment the client can talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Prod,
    Dev,
}

/// Endpoints of one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentSettings {
    /// GraphQL endpoint
    pub graphql_url: &'static str,
    /// OAuth server
    pub auth_url: &'static str,
    /// OAuth client id
    pub client_id: &'static str,
    /// OAuth realm
    pub realm: &'static str,
}

impl Environment {
    /// All known environments.
    pub const ALL: [Environment; 2] = [Environment::Prod, Environment::Dev];

    pub fn name(self) -> &'static str {
        match self {
            Environment::Prod => "prod",
            Environment::Dev => "dev",
        }
    }

    pub fn settings(self) -> EnvironmentSettings {
        match self {
            Environment::Prod => EnvironmentSettings {
                graphql_url: "https://graphql.tilaa.com/graphql/platform",
                auth_url: "https://auth.tilaa.com",
                client_id: "cloud-tilaa",
                realm: "tilaa",
            },
            Environment::Dev => EnvironmentSettings {
                graphql_url: "https://staging-graphql.tilaa.com/graphql/platform",
                auth_url: "https://staging-auth.tilaa.com",
                client_id: "cloud-tilaa",
                realm: "tilaa",
            },
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "prod" => Ok(Environment::Prod),
            "dev" => Ok(Environment::Dev),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}
