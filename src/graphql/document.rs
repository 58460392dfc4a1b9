//! graphql::document
//!
//! Query and mutation document synthesis.
//!
//! # Format
//!
//! A query renders its variable declarations followed by one top-level
//! selection per template field:
//!
//! ```text
//! query ($id: ID!) {
//!     namespace(id: $id) {
//!         id
//!         name
//!     }
//! }
//! ```
//!
//! A mutation invokes a single root field with every parameter bound to the
//! variable of the same name, and appends a selection set only when the
//! caller wants a typed object back:
//!
//! ```text
//! mutation ($name: String!) {
//!     createNamespace (name: $name) {
//!         id
//!         name
//!     }
//! }
//! ```
//!
//! Output is a pure function of the template *type* and the parameter set,
//! so two builds with the same inputs are byte-identical.

use serde_json::{Map, Value};

use super::errors::BuildError;
use super::parameter::{is_valid_name, Parameters};
use super::strategy::render_fields;
use super::types::{FieldDescriptor, GraphQLType, TypeDescriptor};

/// Kind of operation a document performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Query,
    Mutation,
}

impl Operation {
    /// The GraphQL keyword that opens the document.
    pub fn keyword(self) -> &'static str {
        match self {
            Operation::Query => "query",
            Operation::Mutation => "mutation",
        }
    }
}

/// A synthesized document, bound to the template that receives its result.
///
/// Documents are built per call and consumed by a single execution.
#[derive(Debug)]
pub struct Document<'a, T> {
    pub(crate) text: String,
    pub(crate) variables: Map<String, Value>,
    pub(crate) operation: Operation,
    pub(crate) root: Option<String>,
    pub(crate) destination: Option<&'a mut T>,
}

impl<'a, T> Document<'a, T> {
    /// The rendered document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Variable values keyed by parameter name.
    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Response key under `data` that holds a mutation's result.
    ///
    /// `None` for queries, whose template mirrors `data` itself.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Whether execution will write a result into a template.
    pub fn has_destination(&self) -> bool {
        self.destination.is_some()
    }
}

/// Builds documents from result templates and parameters.
///
/// Holds no state; it exists so the client owns an explicit builder value
/// instead of reaching for globals.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentBuilder;

impl DocumentBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a query whose selection set mirrors `template`'s type.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] if the template is not an object with at least
    /// one field, if any field has an unsupported shape, or if a parameter is
    /// malformed.
    pub fn build_query<'a, T: GraphQLType>(
        &self,
        template: &'a mut T,
        params: &Parameters,
    ) -> Result<Document<'a, T>, BuildError> {
        params.validate()?;
        let fields = template_fields::<T>()?;
        if fields.is_empty() {
            return Err(BuildError::EmptySelection {
                field: Operation::Query.keyword().to_string(),
            });
        }

        let selection = render_fields(&fields, 1)?;
        let text = format!(
            "{}{} {{\n{selection}\n}}\n",
            Operation::Query.keyword(),
            declaration_clause(params)
        );
        tracing::debug!(operation = "query", "built document");

        Ok(Document {
            text,
            variables: params.variables(),
            operation: Operation::Query,
            root: None,
            destination: Some(template),
        })
    }

    /// Build a mutation that requests no data back (e.g. a boolean delete).
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidName`] for an invalid mutation name and any
    /// parameter validation error.
    pub fn build_mutation(
        &self,
        name: &str,
        params: &Parameters,
    ) -> Result<Document<'static, ()>, BuildError> {
        params.validate()?;
        let invocation = invocation(name, params)?;
        let text = mutation_text(params, &invocation);
        tracing::debug!(operation = "mutation", root = name, "built document");

        Ok(Document {
            text,
            variables: params.variables(),
            operation: Operation::Mutation,
            root: Some(name.to_string()),
            destination: None,
        })
    }

    /// Build a mutation whose root field result is selected from `template`.
    ///
    /// A template without fields renders no selection set and receives
    /// nothing, matching mutations that return a scalar.
    ///
    /// # Errors
    ///
    /// As for [`build_mutation`](Self::build_mutation) and
    /// [`build_query`](Self::build_query).
    pub fn build_mutation_with_query<'a, T: GraphQLType>(
        &self,
        name: &str,
        params: &Parameters,
        template: &'a mut T,
    ) -> Result<Document<'a, T>, BuildError> {
        params.validate()?;
        let fields = template_fields::<T>()?;
        let mut invocation = invocation(name, params)?;

        let destination = if fields.is_empty() {
            None
        } else {
            let selection = render_fields(&fields, 2)?;
            invocation.push_str(&format!(" {{\n{selection}\n    }}"));
            Some(template)
        };

        let text = mutation_text(params, &invocation);
        tracing::debug!(operation = "mutation", root = name, "built document");

        Ok(Document {
            text,
            variables: params.variables(),
            operation: Operation::Mutation,
            root: Some(name.to_string()),
            destination,
        })
    }
}

fn template_fields<T: GraphQLType>() -> Result<Vec<FieldDescriptor>, BuildError> {
    match T::describe() {
        TypeDescriptor::Object(fields) => Ok(fields),
        _ => Err(BuildError::TemplateNotObject),
    }
}

fn declaration_clause(params: &Parameters) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!(" ({})", params.declarations())
    }
}

fn invocation(name: &str, params: &Parameters) -> Result<String, BuildError> {
    if !is_valid_name(name) {
        return Err(BuildError::InvalidName(name.to_string()));
    }
    if params.is_empty() {
        Ok(format!("    {name}"))
    } else {
        Ok(format!("    {name} ({})", params.arguments()))
    }
}

fn mutation_text(params: &Parameters, invocation: &str) -> String {
    format!(
        "{}{} {{\n{invocation}\n}}\n",
        Operation::Mutation.keyword(),
        declaration_clause(params)
    )
}
