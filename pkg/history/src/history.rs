use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use pkg_cluster::ClusterReader;
use pkg_types::meta::{GroupKind, ObjectKey};
use pkg_types::workload::{Resource, ResourceType, Workload};
use std::sync::Arc;
use tracing::debug;

use crate::daemonset::DaemonSetHistory;
use crate::deployment::DeploymentHistory;
use crate::error::HistoryError;
use crate::revision::Revisions;
use crate::statefulset::StatefulSetHistory;

/// Workload kinds with a known revision history.
pub const SUPPORTED_KINDS: [ResourceType; 3] = [Deployment::TYPE, StatefulSet::TYPE, DaemonSet::TYPE];

/// Revision history of one workload kind.
#[derive(Clone)]
pub enum History {
    Deployment(DeploymentHistory),
    StatefulSet(StatefulSetHistory),
    DaemonSet(DaemonSetHistory),
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            History::Deployment(_) => f.write_str("History::Deployment"),
            History::StatefulSet(_) => f.write_str("History::StatefulSet"),
            History::DaemonSet(_) => f.write_str("History::DaemonSet"),
        }
    }
}

impl History {
    /// Pick the history implementation for the given kind.
    pub fn for_group_kind(client: Arc<dyn ClusterReader>, group_kind: &GroupKind) -> Result<Self, HistoryError> {
        if *group_kind == Deployment::TYPE.group_kind() {
            Ok(History::Deployment(DeploymentHistory::new(client)))
        } else if *group_kind == StatefulSet::TYPE.group_kind() {
            Ok(History::StatefulSet(StatefulSetHistory::new(client)))
        } else if *group_kind == DaemonSet::TYPE.group_kind() {
            Ok(History::DaemonSet(DaemonSetHistory::new(client)))
        } else {
            Err(HistoryError::Unsupported(group_kind.clone()))
        }
    }

    /// Pick the history implementation for the kind of `workload`.
    pub fn for_object(client: Arc<dyn ClusterReader>, workload: &Workload) -> Self {
        match workload {
            Workload::Deployment(_) => History::Deployment(DeploymentHistory::new(client)),
            Workload::StatefulSet(_) => History::StatefulSet(StatefulSetHistory::new(client)),
            Workload::DaemonSet(_) => History::DaemonSet(DaemonSetHistory::new(client)),
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        match self {
            History::Deployment(_) => Deployment::TYPE,
            History::StatefulSet(_) => StatefulSet::TYPE,
            History::DaemonSet(_) => DaemonSet::TYPE,
        }
    }

    /// List the revisions of the workload `key`, sorted ascending by number.
    pub async fn list_revisions(&self, key: &ObjectKey) -> Result<Revisions, HistoryError> {
        debug!("Listing {} revisions of {}", self.resource_type().kind, key);
        match self {
            History::Deployment(h) => h.list_revisions(key).await,
            History::StatefulSet(h) => h.list_revisions(key).await,
            History::DaemonSet(h) => h.list_revisions(key).await,
        }
    }
}

/// List the revisions of `workload`, sorted ascending by number.
pub async fn list_revisions(client: Arc<dyn ClusterReader>, workload: &Workload) -> Result<Revisions, HistoryError> {
    History::for_object(client, workload)
        .list_revisions(&workload.key())
        .await
}
