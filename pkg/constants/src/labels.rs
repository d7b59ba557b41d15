//! Well-known labels and annotations set by the workload controllers.

/// Annotation holding a ReplicaSet's revision number in its Deployment's history.
pub const REVISION_ANNOTATION: &str = "deployment.kubernetes.io/revision";

/// Label added by the Deployment controller to ReplicaSets and their Pods.
/// Not part of the user-authored template.
pub const POD_TEMPLATE_HASH_LABEL: &str = "pod-template-hash";

/// Label correlating Pods with the ControllerRevision they were created from.
/// StatefulSets set it to the revision's name, DaemonSets to the revision's hash.
pub const CONTROLLER_REVISION_HASH_LABEL: &str = "controller-revision-hash";

/// Pod condition type signaling readiness.
pub const POD_READY_CONDITION: &str = "Ready";

/// Condition status value for a satisfied condition.
pub const CONDITION_TRUE: &str = "True";
