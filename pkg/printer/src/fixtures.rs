use chrono::{DateTime, SecondsFormat, Utc};
use k8s_openapi::api::apps::v1::{ReplicaSet, ReplicaSetSpec, ReplicaSetStatus};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ManagedFieldsEntry, ObjectMeta};
use pkg_constants::labels::{POD_TEMPLATE_HASH_LABEL, REVISION_ANNOTATION};
use pkg_history::Revision;
use pkg_history::replicaset::ReplicaSetRevision;
use std::collections::BTreeMap;

fn map(pairs: &[(&str, &str)]) -> Option<BTreeMap<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

fn make_container(name: &str, image: &str) -> Container {
    Container {
        name: name.to_string(),
        image: Some(image.to_string()),
        ..Default::default()
    }
}

/// A ReplicaSet revision of the `web` Deployment with 2 of 3 replicas ready.
pub fn make_replica_set(name: &str, number: i64, containers: &[(&str, &str)]) -> ReplicaSet {
    ReplicaSet {
        metadata: ObjectMeta {
            namespace: Some("test".to_string()),
            name: Some(name.to_string()),
            labels: map(&[("app", "web"), (POD_TEMPLATE_HASH_LABEL, "5d8f7")]),
            annotations: map(&[(REVISION_ANNOTATION, &number.to_string())]),
            managed_fields: Some(vec![ManagedFieldsEntry {
                manager: Some("kube-controller-manager".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        },
        spec: Some(ReplicaSetSpec {
            template: Some(PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: map(&[("app", "web"), (POD_TEMPLATE_HASH_LABEL, "5d8f7")]),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: containers
                        .iter()
                        .map(|(name, image)| make_container(name, image))
                        .collect(),
                    ..Default::default()
                }),
            }),
            ..Default::default()
        }),
        status: Some(ReplicaSetStatus {
            replicas: 3,
            ready_replicas: Some(2),
            ..Default::default()
        }),
    }
}

pub fn created_at(mut rs: ReplicaSet, created: DateTime<Utc>) -> ReplicaSet {
    let timestamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    rs.metadata.creation_timestamp = Some(serde_json::from_value(timestamp.into()).unwrap());
    rs
}

pub fn revision_of(rs: &ReplicaSet) -> Revision {
    Revision::ReplicaSet(ReplicaSetRevision::new(rs).unwrap())
}
