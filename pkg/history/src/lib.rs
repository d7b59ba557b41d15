//! Revision history of workload controllers.
//!
//! Deployments keep old versions as ReplicaSets, StatefulSets and DaemonSets
//! as ControllerRevisions. [`History`] picks the matching adapter for a
//! workload kind and normalizes whatever it finds into [`Revisions`], sorted
//! ascending by revision number.

pub mod controllerrevision;
pub mod daemonset;
pub mod deployment;
pub mod error;
pub mod history;
pub mod replicaset;
pub mod revision;
pub mod sort;
pub mod statefulset;

#[cfg(test)]
mod fixtures;

pub use error::{HistoryError, SelectionError};
pub use history::{History, SUPPORTED_KINDS, list_revisions};
pub use revision::{Replicas, Revision, RevisionObject, Revisions};
