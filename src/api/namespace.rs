//! api::namespace
//!
//! Namespace operations.

use serde::Serialize;

use super::expect_bool;
use crate::graphql::{Client, GraphQLError, Parameter, Parameters};

crate::graphql_object! {
    /// A namespace as returned by the platform.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct Namespace {
        pub name: String,
        pub description: Option<String>,
    }
}

crate::graphql_object! {
    #[derive(Debug, Default)]
    struct NamespaceList {
        namespaces: Vec<Namespace>,
    }
}

crate::graphql_object! {
    #[derive(Debug, Default)]
    struct NamespaceByName {
        #[graphql("namespace(name: $name)")]
        namespace: Namespace,
    }
}

/// Input of `namespaceCreate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceCreateInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Client {
    /// All namespaces visible to the caller.
    pub async fn namespaces_list(&self) -> Result<Vec<Namespace>, GraphQLError> {
        let result: NamespaceList = self.query(&Parameters::new()).await?;
        Ok(result.namespaces)
    }

    /// The namespace called `name`.
    pub async fn namespace_by_name(&self, name: &str) -> Result<Namespace, GraphQLError> {
        let params = Parameters::new().with("name", Parameter::string(name));
        let result: NamespaceByName = self.query(&params).await?;
        Ok(result.namespace)
    }

    pub async fn namespace_create(
        &self,
        input: &NamespaceCreateInput,
    ) -> Result<Namespace, GraphQLError> {
        let params = Parameters::new().with(
            "namespace",
            Parameter::input("NamespaceCreateInput", input)?,
        );
        self.mutate_with_query("namespaceCreate", &params).await
    }

    /// Delete the namespace called `name`; returns the platform's verdict.
    pub async fn namespace_delete(&self, name: &str) -> Result<bool, GraphQLError> {
        let params = Parameters::new().with("name", Parameter::string(name));
        let value = self.mutate("namespaceDelete", &params).await?;
        expect_bool(value, "namespaceDelete")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::DocumentBuilder;

    #[test]
    fn list_document() {
        let mut template = NamespaceList::default();
        let doc = DocumentBuilder::new()
            .build_query(&mut template, &Parameters::new())
            .unwrap();
        assert_eq!(
            doc.text(),
            "query {\n    namespaces {\n        name\n        description\n    }\n}\n"
        );
    }

    #[test]
    fn by_name_document_binds_name() {
        let mut template = NamespaceByName::default();
        let params = Parameters::new().with("name", Parameter::string("ns1"));
        let doc = DocumentBuilder::new()
            .build_query(&mut template, &params)
            .unwrap();
        assert_eq!(
            doc.text(),
            "query ($name: String!) {\n    namespace(name: $name) {\n        name\n        description\n    }\n}\n"
        );
        assert_eq!(doc.variables()["name"], "ns1");
    }

    #[test]
    fn create_document_selects_namespace() {
        let mut template = Namespace::default();
        let input = NamespaceCreateInput {
            name: "ns1".into(),
            description: None,
        };
        let params = Parameters::new().with(
            "namespace",
            Parameter::input("NamespaceCreateInput", &input).unwrap(),
        );
        let doc = DocumentBuilder::new()
            .build_mutation_with_query("namespaceCreate", &params, &mut template)
            .unwrap();
        assert_eq!(
            doc.text(),
            "mutation ($namespace: NamespaceCreateInput!) {\n    namespaceCreate (namespace: $namespace) {\n        name\n        description\n    }\n}\n"
        );
        assert_eq!(doc.variables()["namespace"], serde_json::json!({ "name": "ns1" }));
    }
}
