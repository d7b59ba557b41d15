use pkg_cluster::ClusterError;
use pkg_types::codec::DecodeError;
use pkg_types::meta::GroupKind;
use pkg_types::selector::SelectorError;
use thiserror::Error;

/// Failure while discovering a workload's revisions.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("{0} is not supported")]
    Unsupported(GroupKind),
    /// Fetching the workload itself failed, e.g. because it does not exist
    #[error(transparent)]
    Get(ClusterError),
    #[error("error parsing {kind} selector: {source}")]
    Selector {
        kind: &'static str,
        source: SelectorError,
    },
    #[error("error listing {kind}s: {source}")]
    List {
        kind: &'static str,
        source: ClusterError,
    },
    /// One revision could not be normalized; the whole history is discarded
    #[error("error converting {kind} {name}: {source}")]
    Convert {
        kind: &'static str,
        name: String,
        source: DecodeError,
    },
}

impl HistoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, HistoryError::Get(e) if e.is_not_found())
    }
}

/// A requested revision does not exist in the history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("invalid revision number {0}")]
    Invalid(i64),
    #[error("revision {0} not found")]
    NotFound(i64),
    #[error("predecessor of revision {0} not found")]
    NoPredecessor(i64),
}
