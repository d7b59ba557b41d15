use k8s_openapi::api::apps::v1::{ControllerRevision, DaemonSet};
use k8s_openapi::api::core::v1::Pod;
use pkg_cluster::ClusterReader;
use pkg_constants::labels::CONTROLLER_REVISION_HASH_LABEL;
use pkg_types::meta::{ObjectKey, label};
use std::sync::Arc;

use crate::controllerrevision::list_snapshot_revisions;
use crate::error::HistoryError;
use crate::revision::Revisions;

/// Revision history of DaemonSets, read from their ControllerRevisions.
#[derive(Clone)]
pub struct DaemonSetHistory {
    client: Arc<dyn ClusterReader>,
}

impl DaemonSetHistory {
    pub fn new(client: Arc<dyn ClusterReader>) -> Self {
        Self { client }
    }

    /// List the revisions of the DaemonSet `key`, sorted ascending.
    pub async fn list_revisions(&self, key: &ObjectKey) -> Result<Revisions, HistoryError> {
        list_snapshot_revisions::<DaemonSet, _>(
            self.client.as_ref(),
            key,
            pod_belongs_to_daemonset_revision,
        )
        .await
    }
}

/// DaemonSet pods and their ControllerRevision share the revision hash label.
pub fn pod_belongs_to_daemonset_revision(cr: &ControllerRevision, pod: &Pod) -> bool {
    match (
        label(&cr.metadata, CONTROLLER_REVISION_HASH_LABEL),
        label(&pod.metadata, CONTROLLER_REVISION_HASH_LABEL),
    ) {
        (Some(want), Some(got)) => want == got,
        _ => false,
    }
}
