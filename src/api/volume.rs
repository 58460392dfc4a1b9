//! api::volume
//!
//! Volume operations. Volumes live inside a namespace, so every call names
//! one.

use serde::Serialize;

use super::expect_bool;
use crate::graphql::{Client, GraphQLError, Parameter, Parameters};

crate::graphql_object! {
    /// A persistent volume.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct Volume {
        pub name: String,
        // GB
        pub size: i64,
        // GB, absent until first measured
        pub usage: Option<i64>,
        pub state: String,
        pub locked: bool,
    }
}

crate::graphql_object! {
    #[derive(Debug, Default)]
    struct NamespaceVolumes {
        volumes: Vec<Volume>,
    }
}

crate::graphql_object! {
    #[derive(Debug, Default)]
    struct VolumeList {
        #[graphql("namespace(name: $namespace)")]
        namespace: NamespaceVolumes,
    }
}

/// Input of `volumeCreate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeCreateInput {
    pub name: String,
    pub namespace: String,
    pub size: i64,
}

/// Input of `volumeIncrease`: the new, larger size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeModifyInput {
    pub name: String,
    pub namespace: String,
    pub size: i64,
}

impl Client {
    /// All volumes in `namespace`.
    pub async fn list_volumes(&self, namespace: &str) -> Result<Vec<Volume>, GraphQLError> {
        let params = Parameters::new().with("namespace", Parameter::string(namespace));
        let result: VolumeList = self.query(&params).await?;
        Ok(result.namespace.volumes)
    }

    /// The volume called `name` in `namespace`, if it exists.
    pub async fn volume_by_name(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Volume>, GraphQLError> {
        let volumes = self.list_volumes(namespace).await?;
        Ok(volumes.into_iter().find(|volume| volume.name == name))
    }

    pub async fn volume_create(&self, input: &VolumeCreateInput) -> Result<Volume, GraphQLError> {
        let params =
            Parameters::new().with("volume", Parameter::input("VolumeCreateInput", input)?);
        self.mutate_with_query("volumeCreate", &params).await
    }

    pub async fn volume_increase(&self, input: &VolumeModifyInput) -> Result<Volume, GraphQLError> {
        let params =
            Parameters::new().with("volume", Parameter::input("VolumeModifyInput", input)?);
        self.mutate_with_query("volumeIncrease", &params).await
    }

    /// Delete volume `name` from `namespace`.
    pub async fn volume_delete(&self, namespace: &str, name: &str) -> Result<bool, GraphQLError> {
        let params = Parameters::new()
            .with("namespace", Parameter::string(namespace))
            .with("volumeName", Parameter::string(name));
        let value = self.mutate("volumeDelete", &params).await?;
        expect_bool(value, "volumeDelete")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::DocumentBuilder;

    #[test]
    fn list_document_nests_volumes_under_namespace() {
        let mut template = VolumeList::default();
        let params = Parameters::new().with("namespace", Parameter::string("ns1"));
        let doc = DocumentBuilder::new()
            .build_query(&mut template, &params)
            .unwrap();
        assert_eq!(
            doc.text(),
            "query ($namespace: String!) {\n    namespace(name: $namespace) {\n        volumes {\n            name\n            size\n            usage\n            state\n            locked\n        }\n    }\n}\n"
        );
    }

    #[test]
    fn delete_document_binds_both_arguments() {
        let params = Parameters::new()
            .with("volumeName", Parameter::string("data"))
            .with("namespace", Parameter::string("ns1"));
        let doc = DocumentBuilder::new()
            .build_mutation("volumeDelete", &params)
            .unwrap();
        assert_eq!(
            doc.text(),
            "mutation ($namespace: String!, $volumeName: String!) {\n    volumeDelete (namespace: $namespace, volumeName: $volumeName)\n}\n"
        );
    }

    #[test]
    fn modify_input_serializes_camel_case() {
        let input = VolumeModifyInput {
            name: "data".into(),
            namespace: "ns1".into(),
            size: 20,
        };
        let param = Parameter::input("VolumeModifyInput", &input).unwrap();
        assert_eq!(
            param.value(),
            &serde_json::json!({ "name": "data", "namespace": "ns1", "size": 20 })
        );
        assert_eq!(param.declared_type(), "VolumeModifyInput!");
    }
}
