use k8s_openapi::api::apps::v1::ReplicaSet;
use k8s_openapi::api::core::v1::Pod;
use pkg_constants::labels::POD_TEMPLATE_HASH_LABEL;
use pkg_types::codec::{DecodeError, revision_annotation};
use pkg_types::pod::pod_from_template;

use crate::revision::Replicas;

/// A ReplicaSet as a revision of its Deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicaSetRevision {
    number: i64,
    replica_set: ReplicaSet,
}

impl ReplicaSetRevision {
    /// Copy `replica_set` into a revision, reading its revision annotation.
    pub fn new(replica_set: &ReplicaSet) -> Result<Self, DecodeError> {
        Ok(Self {
            number: revision_annotation(&replica_set.metadata)?,
            replica_set: replica_set.clone(),
        })
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn replica_set(&self) -> &ReplicaSet {
        &self.replica_set
    }

    /// The ReplicaSet's template without the controller-added hash label.
    pub fn pod_template(&self) -> Pod {
        let mut pod = self
            .replica_set
            .spec
            .as_ref()
            .and_then(|spec| spec.template.as_ref())
            .map(pod_from_template)
            .unwrap_or_default();
        if let Some(labels) = pod.metadata.labels.as_mut() {
            labels.remove(POD_TEMPLATE_HASH_LABEL);
        }
        pod
    }

    /// Straight from the ReplicaSet's status.
    pub fn replicas(&self) -> Replicas {
        self.replica_set
            .status
            .as_ref()
            .map(|status| Replicas {
                current: status.replicas,
                ready: status.ready_replicas.unwrap_or(0),
            })
            .unwrap_or_default()
    }
}
