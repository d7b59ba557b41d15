use k8s_openapi::api::apps::v1::{ControllerRevision, StatefulSet};
use k8s_openapi::api::core::v1::Pod;
use pkg_cluster::ClusterReader;
use pkg_constants::labels::CONTROLLER_REVISION_HASH_LABEL;
use pkg_types::meta::{ObjectKey, label};
use std::sync::Arc;

use crate::controllerrevision::list_snapshot_revisions;
use crate::error::HistoryError;
use crate::revision::Revisions;

/// Revision history of StatefulSets, read from their ControllerRevisions.
#[derive(Clone)]
pub struct StatefulSetHistory {
    client: Arc<dyn ClusterReader>,
}

impl StatefulSetHistory {
    pub fn new(client: Arc<dyn ClusterReader>) -> Self {
        Self { client }
    }

    /// List the revisions of the StatefulSet `key`, sorted ascending.
    pub async fn list_revisions(&self, key: &ObjectKey) -> Result<Revisions, HistoryError> {
        list_snapshot_revisions::<StatefulSet, _>(
            self.client.as_ref(),
            key,
            pod_belongs_to_statefulset_revision,
        )
        .await
    }
}

/// StatefulSet pods carry the name of their ControllerRevision in the
/// revision hash label.
pub fn pod_belongs_to_statefulset_revision(cr: &ControllerRevision, pod: &Pod) -> bool {
    label(&pod.metadata, CONTROLLER_REVISION_HASH_LABEL)
        .is_some_and(|hash| Some(hash) == cr.metadata.name.as_deref())
}
