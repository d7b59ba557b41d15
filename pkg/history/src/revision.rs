use k8s_openapi::api::apps::v1::{ControllerRevision, ReplicaSet};
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use pkg_types::pod::is_pod_ready;
use pkg_types::workload::{Resource, ResourceType};
use serde::Serialize;
use std::ops::Deref;

use crate::controllerrevision::SnapshotRevision;
use crate::error::SelectionError;
use crate::replicaset::ReplicaSetRevision;
use crate::sort;

// --- Revision ---

/// A single revision in the history of a workload, e.g. a ReplicaSet in a
/// Deployment's history.
///
/// Revisions own deep copies of the objects they were built from and are
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Revision {
    ReplicaSet(ReplicaSetRevision),
    ControllerRevision(SnapshotRevision),
}

impl Revision {
    /// Revision number. Not necessarily contiguous, nor equal to a list index.
    pub fn number(&self) -> i64 {
        match self {
            Revision::ReplicaSet(r) => r.number(),
            Revision::ControllerRevision(r) => r.number(),
        }
    }

    /// Name of the underlying revision object.
    pub fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or_default()
    }

    /// The full revision object (ReplicaSet or ControllerRevision).
    pub fn object(&self) -> RevisionObject<'_> {
        match self {
            Revision::ReplicaSet(r) => RevisionObject::ReplicaSet(r.replica_set()),
            Revision::ControllerRevision(r) => {
                RevisionObject::ControllerRevision(r.controller_revision())
            }
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        self.object().metadata()
    }

    /// The pod template specified in this revision of the workload.
    pub fn pod_template(&self) -> Pod {
        match self {
            Revision::ReplicaSet(r) => r.pod_template(),
            Revision::ControllerRevision(r) => r.pod_template().clone(),
        }
    }

    // Only current and ready replicas are exposed: desired replicas per
    // revision cannot be determined for ControllerRevision-based workloads.

    /// Total number of replicas belonging to this revision.
    pub fn current_replicas(&self) -> i32 {
        self.replicas().current
    }

    /// Number of ready replicas belonging to this revision.
    pub fn ready_replicas(&self) -> i32 {
        self.replicas().ready
    }

    fn replicas(&self) -> Replicas {
        match self {
            Revision::ReplicaSet(r) => r.replicas(),
            Revision::ControllerRevision(r) => r.replicas(),
        }
    }
}

/// Borrowed view of a revision's underlying object, serializable as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RevisionObject<'a> {
    ReplicaSet(&'a ReplicaSet),
    ControllerRevision(&'a ControllerRevision),
}

impl<'a> RevisionObject<'a> {
    pub fn metadata(&self) -> &'a ObjectMeta {
        match self {
            RevisionObject::ReplicaSet(rs) => &rs.metadata,
            RevisionObject::ControllerRevision(cr) => &cr.metadata,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        match self {
            RevisionObject::ReplicaSet(_) => ReplicaSet::TYPE,
            RevisionObject::ControllerRevision(_) => ControllerRevision::TYPE,
        }
    }
}

// --- Replicas ---

/// Replica counts attributed to a revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Replicas {
    pub current: i32,
    pub ready: i32,
}

/// Count the pods matching `predicate`, and how many of them are ready.
pub fn count_replicas<'a>(
    pods: impl IntoIterator<Item = &'a Pod>,
    predicate: impl Fn(&Pod) -> bool,
) -> Replicas {
    let mut replicas = Replicas::default();
    for pod in pods.into_iter().filter(|p| predicate(p)) {
        replicas.current += 1;
        if is_pod_ready(pod) {
            replicas.ready += 1;
        }
    }
    replicas
}

// --- Revisions ---

/// A list of revisions. Indexing operations expect it sorted ascending by
/// number, see [`Revisions::sort`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Revisions(Vec<Revision>);

impl Revisions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, revision: Revision) {
        self.0.push(revision);
    }

    pub fn into_inner(self) -> Vec<Revision> {
        self.0
    }

    /// Sort in place, ascending by revision number.
    pub fn sort(&mut self) {
        sort::sort(&mut self.0);
    }

    /// Find a revision in the sorted list.
    ///
    /// Positive numbers are looked up by revision number. Negative numbers
    /// count from the end by position: -1 is the latest revision, -2 the one
    /// before it, regardless of gaps in the numbering.
    pub fn by_number(&self, number: i64) -> Result<&Revision, SelectionError> {
        let index = self.position_of(number)?;
        Ok(&self.0[index])
    }

    /// Find the revision preceding the one identified by `number` (see
    /// [`Revisions::by_number`]) by list position.
    pub fn predecessor(&self, number: i64) -> Result<&Revision, SelectionError> {
        let index = self.position_of(number)?;
        match index.checked_sub(1) {
            Some(previous) => Ok(&self.0[previous]),
            None => Err(SelectionError::NoPredecessor(self.0[index].number())),
        }
    }

    /// List position of the revision `number` refers to.
    fn position_of(&self, number: i64) -> Result<usize, SelectionError> {
        if self.0.is_empty() {
            return Err(SelectionError::NotFound(number));
        }

        if number == 0 {
            return Err(SelectionError::Invalid(number));
        }

        if number < 0 {
            return usize::try_from(self.0.len() as i64 + number)
                .map_err(|_| SelectionError::NotFound(number));
        }

        // index and number are unrelated once old revisions are pruned
        self.0
            .iter()
            .position(|r| r.number() == number)
            .ok_or(SelectionError::NotFound(number))
    }
}

impl Deref for Revisions {
    type Target = [Revision];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Revision>> for Revisions {
    fn from(revisions: Vec<Revision>) -> Self {
        Self(revisions)
    }
}

impl FromIterator<Revision> for Revisions {
    fn from_iter<I: IntoIterator<Item = Revision>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Revisions {
    type Item = Revision;
    type IntoIter = std::vec::IntoIter<Revision>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Revisions {
    type Item = &'a Revision;
    type IntoIter = std::slice::Iter<'a, Revision>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
