use crate::revision::Revision;

/// Sort revisions in place by revision number (ascending).
///
/// The sort is stable: revisions sharing a number keep their relative order.
pub fn sort(revisions: &mut [Revision]) {
    revisions.sort_by_key(Revision::number);
}
