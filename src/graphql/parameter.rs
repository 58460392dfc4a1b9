//! graphql::parameter
//!
//! Typed document variables.
//!
//! A [`Parameter`] pairs a wire type name with a raw value. [`Parameters`]
//! keeps them ordered by name, so the variable-declaration clause and the
//! argument list come out identical no matter in which order the caller
//! inserted them.
//!
//! # Example
//!
//! ```
//! use nexaa::graphql::{Parameter, Parameters};
//!
//! let params = Parameters::new()
//!     .with("namespace", Parameter::string("production"))
//!     .with("size", Parameter::int(10).optional());
//!
//! assert_eq!(params.declarations(), "$namespace: String!, $size: Int");
//! assert_eq!(params.arguments(), "namespace: $namespace, size: $size");
//! ```

use std::collections::btree_map::{self, BTreeMap};
use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::BuildError;

/// One document variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    graphql_type: String,
    value: Value,
    required: bool,
}

impl Parameter {
    /// Create a required parameter of the named wire type.
    ///
    /// A trailing `!` on `graphql_type` is dropped: nullability is controlled
    /// only by [`optional`](Self::optional).
    pub fn new(graphql_type: impl Into<String>, value: impl Into<Value>) -> Self {
        let graphql_type = graphql_type.into();
        Self {
            graphql_type: graphql_type.trim_end_matches('!').to_string(),
            value: value.into(),
            required: true,
        }
    }

    /// An `ID` parameter.
    pub fn id(value: impl Into<Value>) -> Self {
        Self::new("ID", value)
    }

    /// An `Int` parameter.
    pub fn int(value: impl Into<Value>) -> Self {
        Self::new("Int", value)
    }

    /// A `Float` parameter.
    pub fn float(value: impl Into<Value>) -> Self {
        Self::new("Float", value)
    }

    /// A `String` parameter.
    pub fn string(value: impl Into<Value>) -> Self {
        Self::new("String", value)
    }

    /// A `Boolean` parameter.
    pub fn boolean(value: bool) -> Self {
        Self::new("Boolean", value)
    }

    /// A parameter of a named input-object type, from an already-built value.
    pub fn complex(input_type: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(input_type, value)
    }

    /// A parameter of a named input-object type, serialized from `value`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidValue`] if `value` cannot be represented
    /// as JSON (e.g. a map with non-string keys).
    pub fn input<T: Serialize + ?Sized>(
        input_type: impl Into<String>,
        value: &T,
    ) -> Result<Self, BuildError> {
        let input_type = input_type.into();
        let value = serde_json::to_value(value).map_err(|e| BuildError::InvalidValue {
            graphql_type: input_type.clone(),
            message: e.to_string(),
        })?;
        Ok(Self::new(input_type, value))
    }

    /// Mark the parameter nullable in the variable declaration.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// The wire type name, without nullability marker.
    pub fn graphql_type(&self) -> &str {
        &self.graphql_type
    }

    /// The raw value sent in `variables`.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether the declaration carries the non-null marker.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The type as declared in the variable clause, e.g. `ID!` or `Int`.
    pub fn declared_type(&self) -> String {
        if self.required {
            format!("{}!", self.graphql_type)
        } else {
            self.graphql_type.clone()
        }
    }
}

/// Parameters of one document, keyed by variable name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters(BTreeMap<String, Parameter>);

impl Parameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, parameter: Parameter) -> Self {
        self.insert(name, parameter);
        self
    }

    /// Add a parameter, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, parameter: Parameter) -> Option<Parameter> {
        self.0.insert(name.into(), parameter)
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate parameters in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Parameter> {
        self.0.iter()
    }

    /// Render `$name: Type!, ...` in name order.
    pub fn declarations(&self) -> String {
        self.0
            .iter()
            .map(|(name, param)| format!("${name}: {}", param.declared_type()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render `name: $name, ...` in name order. Every parameter is bound.
    pub fn arguments(&self) -> String {
        self.0
            .keys()
            .map(|name| format!("{name}: ${name}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The raw values, keyed by variable name.
    pub fn variables(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(name, param)| (name.clone(), param.value.clone()))
            .collect()
    }

    /// Check every name and type before they are rendered into a document.
    ///
    /// # Errors
    ///
    /// - [`BuildError::InvalidName`] for names outside `[_A-Za-z][_0-9A-Za-z]*`
    /// - [`BuildError::EmptyType`] for parameters with an empty type name
    pub fn validate(&self) -> Result<(), BuildError> {
        for (name, param) in &self.0 {
            if !is_valid_name(name) {
                return Err(BuildError::InvalidName(name.clone()));
            }
            if param.graphql_type.trim().is_empty() {
                return Err(BuildError::EmptyType(name.clone()));
            }
        }
        Ok(())
    }
}

impl<K: Into<String>> FromIterator<(K, Parameter)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, Parameter)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<HashMap<String, Parameter>> for Parameters {
    fn from(map: HashMap<String, Parameter>) -> Self {
        map.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a Parameter);
    type IntoIter = btree_map::Iter<'a, String, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Check a GraphQL name: `[_A-Za-z][_0-9A-Za-z]*`.
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}
