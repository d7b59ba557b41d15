use k8s_openapi::api::apps::v1::{Deployment, ReplicaSet};
use pkg_cluster::ClusterReader;
use pkg_types::meta::{ObjectKey, is_controlled_by};
use pkg_types::selector::as_selector;
use pkg_types::workload::{Resource, WorkloadResource};
use std::sync::Arc;
use tracing::debug;

use crate::error::HistoryError;
use crate::replicaset::ReplicaSetRevision;
use crate::revision::{Revision, Revisions};

/// Revision history of Deployments, read from their ReplicaSets.
#[derive(Clone)]
pub struct DeploymentHistory {
    client: Arc<dyn ClusterReader>,
}

impl DeploymentHistory {
    pub fn new(client: Arc<dyn ClusterReader>) -> Self {
        Self { client }
    }

    /// List the revisions of the Deployment `key`, sorted ascending.
    pub async fn list_revisions(&self, key: &ObjectKey) -> Result<Revisions, HistoryError> {
        let client = self.client.as_ref();

        let deploy: Deployment = pkg_cluster::get(client, key).await.map_err(HistoryError::Get)?;

        let selector = as_selector(deploy.selector()).map_err(|source| HistoryError::Selector {
            kind: Deployment::TYPE.kind,
            source,
        })?;
        let Some(selector) = selector else {
            debug!("Deployment {} has no selector", key);
            return Ok(Revisions::new());
        };

        let namespace = deploy.metadata.namespace.as_deref().unwrap_or(&key.namespace);
        let replica_sets: Vec<ReplicaSet> = pkg_cluster::list(client, namespace, &selector)
            .await
            .map_err(|source| HistoryError::List {
                kind: ReplicaSet::TYPE.kind,
                source,
            })?;

        let mut revs = Revisions::new();
        for rs in &replica_sets {
            // selectors may overlap with other Deployments
            if !is_controlled_by(&rs.metadata, &deploy.metadata) {
                continue;
            }

            let revision = ReplicaSetRevision::new(rs).map_err(|source| HistoryError::Convert {
                kind: ReplicaSet::TYPE.kind,
                name: rs.metadata.name.clone().unwrap_or_default(),
                source,
            })?;
            revs.push(Revision::ReplicaSet(revision));
        }

        debug!(
            "Deployment {}: {} of {} ReplicaSets owned",
            key,
            revs.len(),
            replica_sets.len()
        );

        revs.sort();
        Ok(revs)
    }
}
