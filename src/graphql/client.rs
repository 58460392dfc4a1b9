//! graphql::client
//!
//! HTTP transport for synthesized documents.
//!
//! # Design
//!
//! The client holds no per-call state. Each [`Client::execute`] call POSTs a
//! single document, asks the token provider for a fresh bearer token first,
//! and reduces the reply through [`process_response`]. Nothing is retried.
//!
//! Dropping an `execute` future cancels the request; the configured timeout
//! is enforced by the underlying HTTP client.
//!
//! # Example
//!
//! ```ignore
//! use nexaa::graphql::{Client, ClientConfig, Parameter, Parameters};
//!
//! let client = Client::new(ClientConfig::new("https://example.test/graphql"), None)?;
//! let params = Parameters::new().with("name", Parameter::string("ns1"));
//! let deleted = client.mutate("namespaceDelete", &params).await?;
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::document::{Document, DocumentBuilder};
use super::errors::GraphQLError;
use super::parameter::Parameters;
use super::response::{apply_data, process_response, take_root};
use super::types::GraphQLType;
use crate::auth::TokenProvider;
use crate::config::{Config, DEFAULT_TIMEOUT_SECS};

/// User-Agent header value sent with every request.
pub const USER_AGENT: &str = "nexaa-cli";

/// Transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&Config> for ClientConfig {
    fn from(config: &Config) -> Self {
        ClientConfig::new(config.endpoint()).timeout(config.timeout())
    }
}

#[derive(Serialize)]
struct RequestBody<'a> {
    query: &'a str,
    variables: &'a Map<String, Value>,
}

/// GraphQL client: a document builder plus an HTTP connection pool.
///
/// Cheap to clone; clones share the connection pool and token provider.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    token_provider: Option<Arc<dyn TokenProvider>>,
    builder: DocumentBuilder,
}

// Custom Debug so the token provider is never formatted
impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("has_token_provider", &self.token_provider.is_some())
            .finish()
    }
}

impl Client {
    /// Create a client for `config.endpoint`.
    ///
    /// Without a token provider requests are sent unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns [`GraphQLError::Network`] if the HTTP client cannot be
    /// initialized (e.g. no TLS backend).
    pub fn new(
        config: ClientConfig,
        token_provider: Option<Arc<dyn TokenProvider>>,
    ) -> Result<Self, GraphQLError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            token_provider,
            builder: DocumentBuilder::new(),
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(
        config: &Config,
        token_provider: Option<Arc<dyn TokenProvider>>,
    ) -> Result<Self, GraphQLError> {
        Self::new(ClientConfig::from(config), token_provider)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The builder used by the convenience methods.
    pub fn builder(&self) -> &DocumentBuilder {
        &self.builder
    }

    /// Send `document` and deserialize its result into the template it was
    /// built from.
    ///
    /// # Errors
    ///
    /// Any transport, authentication, protocol or decode failure. The
    /// template is left untouched whenever an error is returned.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        document: Document<'_, T>,
    ) -> Result<(), GraphQLError> {
        let Document {
            text,
            variables,
            root,
            destination,
            ..
        } = document;

        let data = self.send(&text, &variables).await?;
        apply_data(data, root.as_deref(), destination)
    }

    /// Build and execute a query shaped like `T`, returning the result.
    pub async fn query<T>(&self, params: &Parameters) -> Result<T, GraphQLError>
    where
        T: GraphQLType + DeserializeOwned + Default,
    {
        let mut result = T::default();
        let document = self.builder.build_query(&mut result, params)?;
        self.execute(document).await?;
        Ok(result)
    }

    /// Build and execute mutation `name`, selecting its result as `T`.
    pub async fn mutate_with_query<T>(
        &self,
        name: &str,
        params: &Parameters,
    ) -> Result<T, GraphQLError>
    where
        T: GraphQLType + DeserializeOwned + Default,
    {
        let mut result = T::default();
        let document = self
            .builder
            .build_mutation_with_query(name, params, &mut result)?;
        self.execute(document).await?;
        Ok(result)
    }

    /// Build and execute an argument-only mutation, returning the raw value
    /// of its root field (e.g. the boolean of a delete).
    pub async fn mutate(&self, name: &str, params: &Parameters) -> Result<Value, GraphQLError> {
        let document = self.builder.build_mutation(name, params)?;
        let data = self
            .send(document.text(), document.variables())
            .await?
            .ok_or_else(|| GraphQLError::Decode("response contained no data".into()))?;
        take_root(data, name)
    }

    async fn send(
        &self,
        text: &str,
        variables: &Map<String, Value>,
    ) -> Result<Option<Value>, GraphQLError> {
        tracing::debug!(endpoint = %self.endpoint, document = text, "sending document");

        let mut request = self.http.post(&self.endpoint).json(&RequestBody {
            query: text,
            variables,
        });
        if let Some(provider) = &self.token_provider {
            let token = provider.bearer_token().await?;
            request = request.bearer_auth(token);
        }

        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        tracing::debug!(
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "received response"
        );

        process_response(status, &body)
    }
}
