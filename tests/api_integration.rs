//! Integration tests for namespace and volume operations.

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nexaa::api::{Namespace, NamespaceCreateInput, VolumeCreateInput, VolumeModifyInput};
use nexaa::graphql::{Client, ClientConfig, GraphQLError};

async fn server_returning(data: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> Client {
    Client::new(ClientConfig::new(format!("{}/graphql", server.uri())), None).unwrap()
}

async fn sent_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    serde_json::from_slice(&requests[0].body).unwrap()
}

// =============================================================================
// Namespaces
// =============================================================================

mod namespaces {
    use super::*;

    #[tokio::test]
    async fn list_returns_all() {
        let server = server_returning(json!({
            "namespaces": [
                { "name": "ns1", "description": "first" },
                { "name": "ns2", "description": null }
            ]
        }))
        .await;

        let namespaces = client_for(&server).namespaces_list().await.unwrap();
        assert_eq!(
            namespaces,
            vec![
                Namespace {
                    name: "ns1".into(),
                    description: Some("first".into()),
                },
                Namespace {
                    name: "ns2".into(),
                    description: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn by_name_sends_name_variable() {
        let server = server_returning(json!({ "namespace": { "name": "ns1", "description": null } })).await;

        let namespace = client_for(&server).namespace_by_name("ns1").await.unwrap();
        assert_eq!(namespace.name, "ns1");

        let body = sent_body(&server).await;
        assert_eq!(body["variables"], json!({ "name": "ns1" }));
        assert!(body["query"]
            .as_str()
            .unwrap()
            .contains("namespace(name: $name)"));
    }

    #[tokio::test]
    async fn create_sends_input_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "variables": { "namespace": { "name": "ns3", "description": "new" } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "namespaceCreate": { "name": "ns3", "description": "new" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .namespace_create(&NamespaceCreateInput {
                name: "ns3".into(),
                description: Some("new".into()),
            })
            .await
            .unwrap();
        assert_eq!(created.description.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn delete_returns_verdict() {
        let server = server_returning(json!({ "namespaceDelete": true })).await;
        assert!(client_for(&server).namespace_delete("ns1").await.unwrap());
    }

    #[tokio::test]
    async fn delete_with_non_boolean_is_decode_error() {
        let server = server_returning(json!({ "namespaceDelete": "done" })).await;
        let err = client_for(&server).namespace_delete("ns1").await.unwrap_err();
        assert!(matches!(err, GraphQLError::Decode(_)));
    }
}

// =============================================================================
// Volumes
// =============================================================================

mod volumes {
    use super::*;

    fn volume_list() -> Value {
        json!({
            "namespace": {
                "volumes": [
                    { "name": "data", "size": 10, "usage": 2, "state": "created", "locked": false },
                    { "name": "logs", "size": 5, "usage": null, "state": "creating", "locked": true }
                ]
            }
        })
    }

    #[tokio::test]
    async fn list_reads_nested_volumes() {
        let server = server_returning(volume_list()).await;

        let volumes = client_for(&server).list_volumes("ns1").await.unwrap();
        assert_eq!(volumes.len(), 2);
        assert_eq!(volumes[0].usage, Some(2));
        assert!(volumes[1].locked);

        let body = sent_body(&server).await;
        assert_eq!(body["variables"], json!({ "namespace": "ns1" }));
    }

    #[tokio::test]
    async fn by_name_finds_match() {
        let server = server_returning(volume_list()).await;
        let volume = client_for(&server)
            .volume_by_name("ns1", "logs")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(volume.size, 5);
    }

    #[tokio::test]
    async fn by_name_missing_is_none() {
        let server = server_returning(volume_list()).await;
        let volume = client_for(&server)
            .volume_by_name("ns1", "absent")
            .await
            .unwrap();
        assert!(volume.is_none());
    }

    #[tokio::test]
    async fn create_reads_result_under_root() {
        let server = server_returning(json!({
            "volumeCreate": { "name": "data", "size": 10, "usage": null, "state": "creating", "locked": true }
        }))
        .await;

        let volume = client_for(&server)
            .volume_create(&VolumeCreateInput {
                name: "data".into(),
                namespace: "ns1".into(),
                size: 10,
            })
            .await
            .unwrap();
        assert_eq!(volume.state, "creating");

        let body = sent_body(&server).await;
        assert!(body["query"]
            .as_str()
            .unwrap()
            .starts_with("mutation ($volume: VolumeCreateInput!) {"));
    }

    #[tokio::test]
    async fn increase_propagates_protocol_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "size must grow" }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .volume_increase(&VolumeModifyInput {
                name: "data".into(),
                namespace: "ns1".into(),
                size: 5,
            })
            .await
            .unwrap_err();
        assert!(err.is_protocol());
        assert!(err.to_string().contains("size must grow"));
    }

    #[tokio::test]
    async fn delete_binds_namespace_and_volume_name() {
        let server = server_returning(json!({ "volumeDelete": true })).await;
        assert!(client_for(&server)
            .volume_delete("ns1", "data")
            .await
            .unwrap());

        let body = sent_body(&server).await;
        assert_eq!(
            body["variables"],
            json!({ "namespace": "ns1", "volumeName": "data" })
        );
    }
}
