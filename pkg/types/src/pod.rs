use k8s_openapi::api::core::v1::{Pod, PodCondition, PodStatus, PodTemplateSpec};
use pkg_constants::labels::{CONDITION_TRUE, POD_READY_CONDITION};

/// A Pod as the given template would produce it (metadata and spec only).
pub fn pod_from_template(template: &PodTemplateSpec) -> Pod {
    Pod {
        metadata: template.metadata.clone().unwrap_or_default(),
        spec: template.spec.clone(),
        status: None,
    }
}

/// Whether the Pod's `Ready` condition is `True`.
pub fn is_pod_ready(pod: &Pod) -> bool {
    pod.status
        .as_ref()
        .and_then(|s| s.conditions.as_deref())
        .and_then(|conditions| get_pod_condition(conditions, POD_READY_CONDITION))
        .is_some_and(|c| c.status == CONDITION_TRUE)
}

/// Find the condition of the given type, if present.
pub fn get_pod_condition<'a>(conditions: &'a [PodCondition], type_: &str) -> Option<&'a PodCondition> {
    conditions.iter().find(|c| c.type_ == type_)
}

/// Set the condition of the given type to `status`, adding it if missing.
pub fn set_pod_condition(pod: &mut Pod, type_: &str, status: &str) {
    let conditions = pod
        .status
        .get_or_insert_with(PodStatus::default)
        .conditions
        .get_or_insert_with(Vec::new);
    match conditions.iter_mut().find(|c| c.type_ == type_) {
        Some(condition) => condition.status = status.to_string(),
        None => conditions.push(PodCondition {
            type_: type_.to_string(),
            status: status.to_string(),
            ..Default::default()
        }),
    }
}
