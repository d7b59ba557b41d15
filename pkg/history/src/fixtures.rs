use k8s_openapi::api::apps::v1::{
    ControllerRevision, DaemonSet, DaemonSetSpec, Deployment, DeploymentSpec, ReplicaSet,
    ReplicaSetSpec, StatefulSet, StatefulSetSpec,
};
use k8s_openapi::api::core::v1::{Container, Pod, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::apimachinery::pkg::runtime::RawExtension;
use pkg_constants::labels::{
    CONDITION_TRUE, CONTROLLER_REVISION_HASH_LABEL, POD_READY_CONDITION, POD_TEMPLATE_HASH_LABEL,
    REVISION_ANNOTATION,
};
use pkg_types::meta::controller_reference;
use pkg_types::pod::set_pod_condition;
use pkg_types::workload::WorkloadResource;
use std::collections::BTreeMap;

use crate::replicaset::ReplicaSetRevision;
use crate::revision::{Revision, Revisions};

/// Hands out distinct image tags: app:0.1, app:0.2, ...
pub struct ImageTags {
    count: u32,
}

impl ImageTags {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn next_tag(&mut self) -> String {
        self.count += 1;
        format!("app:0.{}", self.count)
    }
}

pub fn labels(pairs: &[(&str, &str)]) -> Option<BTreeMap<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

/// Image of the first container.
pub fn image_of(pod: &Pod) -> Option<&str> {
    pod.spec.as_ref()?.containers.first()?.image.as_deref()
}

// --- Revisions ---

pub fn make_named_revision(name: &str, number: i64) -> Revision {
    let rs = ReplicaSet {
        metadata: ObjectMeta {
            namespace: Some("test".to_string()),
            name: Some(name.to_string()),
            annotations: labels(&[(REVISION_ANNOTATION, &number.to_string())]),
            ..Default::default()
        },
        ..Default::default()
    };
    Revision::ReplicaSet(ReplicaSetRevision::new(&rs).unwrap())
}

pub fn make_replica_set_revision(number: i64) -> Revision {
    make_named_revision(&format!("app-{}", number), number)
}

pub fn numbers(revs: &Revisions) -> Vec<i64> {
    revs.iter().map(Revision::number).collect()
}

// --- Pods ---

pub fn make_pod(namespace: &str, name: &str, pairs: &[(&str, &str)]) -> Pod {
    Pod {
        metadata: ObjectMeta {
            namespace: Some(namespace.to_string()),
            name: Some(name.to_string()),
            labels: labels(pairs),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A Pod created from `cr`, labeled with `revision_hash` and ready or not.
pub fn make_revision_pod(cr: &ControllerRevision, name: &str, revision_hash: &str, ready: bool) -> Pod {
    let mut pod_labels = cr.metadata.labels.clone().unwrap_or_default();
    pod_labels.insert(CONTROLLER_REVISION_HASH_LABEL.to_string(), revision_hash.to_string());

    let mut pod = Pod {
        metadata: ObjectMeta {
            namespace: cr.metadata.namespace.clone(),
            name: Some(name.to_string()),
            labels: Some(pod_labels),
            ..Default::default()
        },
        ..Default::default()
    };
    let status = if ready { CONDITION_TRUE } else { "False" };
    set_pod_condition(&mut pod, POD_READY_CONDITION, status);
    pod
}

// --- Workloads ---

pub fn make_template(app: &str, image: &str) -> PodTemplateSpec {
    PodTemplateSpec {
        metadata: Some(ObjectMeta {
            labels: labels(&[("app", app)]),
            ..Default::default()
        }),
        spec: Some(PodSpec {
            containers: vec![Container {
                name: app.to_string(),
                image: Some(image.to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }),
    }
}

fn make_meta(namespace: &str, name: &str) -> ObjectMeta {
    ObjectMeta {
        namespace: Some(namespace.to_string()),
        name: Some(name.to_string()),
        uid: Some(format!("uid-{}", name)),
        ..Default::default()
    }
}

fn make_selector(app: &str) -> LabelSelector {
    LabelSelector {
        match_labels: labels(&[("app", app)]),
        ..Default::default()
    }
}

pub fn make_deployment(namespace: &str, name: &str) -> Deployment {
    Deployment {
        metadata: make_meta(namespace, name),
        spec: Some(DeploymentSpec {
            selector: make_selector(name),
            template: make_template(name, "app:latest"),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn make_statefulset(namespace: &str, name: &str) -> StatefulSet {
    StatefulSet {
        metadata: make_meta(namespace, name),
        spec: Some(StatefulSetSpec {
            selector: make_selector(name),
            template: make_template(name, "app:latest"),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn make_daemonset(namespace: &str, name: &str) -> DaemonSet {
    DaemonSet {
        metadata: make_meta(namespace, name),
        spec: Some(DaemonSetSpec {
            selector: make_selector(name),
            template: make_template(name, "app:latest"),
            ..Default::default()
        }),
        ..Default::default()
    }
}

// --- Revision objects ---

/// A ReplicaSet owned by `deploy` at the given revision, running `image`.
pub fn replica_set_for(deploy: &Deployment, revision: i64, image: &str) -> ReplicaSet {
    let hash = format!("h{}", revision);
    let name = format!("{}-{}", deploy.metadata.name.as_deref().unwrap(), hash);
    let spec = deploy.spec.as_ref().unwrap();

    let mut template = spec.template.clone();
    template.spec.as_mut().unwrap().containers[0].image = Some(image.to_string());
    let template_labels = template.metadata.get_or_insert_default().labels.get_or_insert_default();
    template_labels.insert(POD_TEMPLATE_HASH_LABEL.to_string(), hash.clone());
    let rs_labels = template_labels.clone();

    ReplicaSet {
        metadata: ObjectMeta {
            labels: Some(rs_labels),
            annotations: labels(&[(REVISION_ANNOTATION, &revision.to_string())]),
            owner_references: Some(vec![controller_reference::<Deployment>(&deploy.metadata)]),
            ..make_meta(deploy.metadata.namespace.as_deref().unwrap(), &name)
        },
        spec: Some(ReplicaSetSpec {
            selector: spec.selector.clone(),
            template: Some(template),
            ..Default::default()
        }),
        status: None,
    }
}

/// A ControllerRevision owned by `workload` at the given revision, running
/// `image`. Its name is `<workload>-r<revision>`, its hash label `r<revision>`.
pub fn controller_revision_for<W: WorkloadResource>(workload: &W, revision: i64, image: &str) -> ControllerRevision {
    let meta = workload.metadata();
    let hash = format!("r{}", revision);
    let name = format!("{}-{}", meta.name.as_deref().unwrap(), hash);

    let mut snapshot = serde_json::to_value(workload).unwrap();
    snapshot["spec"]["template"]["spec"]["containers"][0]["image"] = serde_json::Value::from(image);

    let mut cr_labels = workload
        .template()
        .and_then(|t| t.metadata.as_ref())
        .and_then(|m| m.labels.clone())
        .unwrap_or_default();
    cr_labels.insert(CONTROLLER_REVISION_HASH_LABEL.to_string(), hash);

    ControllerRevision {
        metadata: ObjectMeta {
            labels: Some(cr_labels),
            owner_references: Some(vec![controller_reference::<W>(meta)]),
            ..make_meta(meta.namespace.as_deref().unwrap(), &name)
        },
        data: Some(RawExtension(snapshot)),
        revision,
    }
}
