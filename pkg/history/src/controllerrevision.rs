use k8s_openapi::api::apps::v1::ControllerRevision;
use k8s_openapi::api::core::v1::Pod;
use kube::core::Selector;
use pkg_cluster::ClusterReader;
use pkg_types::codec::{DecodeError, decode_template};
use pkg_types::meta::{ObjectKey, is_controlled_by};
use pkg_types::pod::pod_from_template;
use pkg_types::selector::as_selector;
use pkg_types::workload::{Resource, WorkloadResource};
use tracing::debug;

use crate::error::HistoryError;
use crate::revision::{Replicas, Revision, Revisions, count_replicas};

/// A ControllerRevision as a revision of its StatefulSet or DaemonSet.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRevision {
    controller_revision: ControllerRevision,
    template: Pod,
    replicas: Replicas,
}

impl SnapshotRevision {
    /// Copy `controller_revision` into a revision, decoding the pod template
    /// of the embedded `W` once.
    pub fn new<W: WorkloadResource>(controller_revision: &ControllerRevision) -> Result<Self, DecodeError> {
        let template = decode_template::<W>(controller_revision.data.as_ref())?;
        Ok(Self {
            controller_revision: controller_revision.clone(),
            template: pod_from_template(&template),
            replicas: Replicas::default(),
        })
    }

    pub fn with_replicas(mut self, replicas: Replicas) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn number(&self) -> i64 {
        self.controller_revision.revision
    }

    pub fn controller_revision(&self) -> &ControllerRevision {
        &self.controller_revision
    }

    pub fn pod_template(&self) -> &Pod {
        &self.template
    }

    pub fn replicas(&self) -> Replicas {
        self.replicas
    }
}

/// List the ControllerRevisions and Pods matching a workload's selector.
pub async fn list_controller_revisions_and_pods(
    client: &dyn ClusterReader,
    namespace: &str,
    selector: &Selector,
) -> Result<(Vec<ControllerRevision>, Vec<Pod>), HistoryError> {
    let controller_revisions = pkg_cluster::list::<ControllerRevision>(client, namespace, selector)
        .await
        .map_err(|source| HistoryError::List {
            kind: ControllerRevision::TYPE.kind,
            source,
        })?;

    let pods = pkg_cluster::list::<Pod>(client, namespace, selector)
        .await
        .map_err(|source| HistoryError::List {
            kind: Pod::TYPE.kind,
            source,
        })?;

    Ok((controller_revisions, pods))
}

/// Revision listing shared by the ControllerRevision-based workloads.
///
/// `belongs` decides whether a Pod was created from a given revision; the
/// label correlating the two differs per workload kind.
pub(crate) async fn list_snapshot_revisions<W, P>(
    client: &dyn ClusterReader,
    key: &ObjectKey,
    belongs: P,
) -> Result<Revisions, HistoryError>
where
    W: WorkloadResource,
    P: Fn(&ControllerRevision, &Pod) -> bool + Send + Sync,
{
    let workload: W = pkg_cluster::get(client, key).await.map_err(HistoryError::Get)?;

    let selector = as_selector(workload.selector()).map_err(|source| HistoryError::Selector {
        kind: W::TYPE.kind,
        source,
    })?;
    let Some(selector) = selector else {
        debug!("{} {} has no selector", W::TYPE.kind, key);
        return Ok(Revisions::new());
    };

    let namespace = workload.metadata().namespace.as_deref().unwrap_or(&key.namespace);
    let (controller_revisions, pods) = list_controller_revisions_and_pods(client, namespace, &selector).await?;

    let mut revs = Revisions::new();
    for controller_revision in &controller_revisions {
        if !is_controlled_by(&controller_revision.metadata, workload.metadata()) {
            continue;
        }

        let revision = SnapshotRevision::new::<W>(controller_revision).map_err(|source| {
            HistoryError::Convert {
                kind: ControllerRevision::TYPE.kind,
                name: controller_revision.metadata.name.clone().unwrap_or_default(),
                source,
            }
        })?;

        let replicas = count_replicas(&pods, |pod| belongs(controller_revision, pod));
        revs.push(Revision::ControllerRevision(revision.with_replicas(replicas)));
    }

    debug!(
        "{} {}: {} of {} ControllerRevisions owned, {} pods",
        W::TYPE.kind,
        key,
        revs.len(),
        controller_revisions.len(),
        pods.len()
    );

    revs.sort();
    Ok(revs)
}
