use k8s_openapi::api::apps::v1::{
    ControllerRevision, Deployment, DeploymentSpec, ReplicaSet, ReplicaSetSpec, StatefulSet,
    StatefulSetSpec,
};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::apimachinery::pkg::runtime::RawExtension;
use pkg_cluster::{ClusterReader, MemoryCluster};
use pkg_constants::labels::{CONTROLLER_REVISION_HASH_LABEL, POD_TEMPLATE_HASH_LABEL, REVISION_ANNOTATION};
use pkg_types::meta::controller_reference;
use std::collections::BTreeMap;
use std::sync::Arc;

fn labels(pairs: &[(&str, &str)]) -> Option<BTreeMap<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

fn make_template(app: &str, image: &str) -> PodTemplateSpec {
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

fn make_meta(name: &str) -> ObjectMeta {
    ObjectMeta {
        namespace: Some("test".to_string()),
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

/// Deployment `test/web` with ReplicaSets at the given revisions, each
/// running `app:0.<revision>`.
pub fn add_deployment(cluster: &MemoryCluster, revisions: &[i64]) {
    let deploy = Deployment {
        metadata: make_meta("web"),
        spec: Some(DeploymentSpec {
            selector: make_selector("web"),
            template: make_template("web", "app:latest"),
            ..Default::default()
        }),
        ..Default::default()
    };
    cluster.insert(&deploy).unwrap();

    for revision in revisions {
        let hash = format!("h{}", revision);
        let mut template = make_template("web", &format!("app:0.{}", revision));
        template.metadata = Some(ObjectMeta {
            labels: labels(&[("app", "web"), (POD_TEMPLATE_HASH_LABEL, &hash)]),
            ..Default::default()
        });

        let rs = ReplicaSet {
            metadata: ObjectMeta {
                labels: labels(&[("app", "web"), (POD_TEMPLATE_HASH_LABEL, &hash)]),
                annotations: labels(&[(REVISION_ANNOTATION, &revision.to_string())]),
                owner_references: Some(vec![controller_reference::<Deployment>(&deploy.metadata)]),
                ..make_meta(&format!("web-{}", hash))
            },
            spec: Some(ReplicaSetSpec {
                selector: make_selector("web"),
                template: Some(template),
                ..Default::default()
            }),
            status: None,
        };
        cluster.insert(&rs).unwrap();
    }
}

/// StatefulSet `test/db` with ControllerRevisions at the given revisions.
pub fn add_statefulset(cluster: &MemoryCluster, revisions: &[i64]) {
    let sts = StatefulSet {
        metadata: make_meta("db"),
        spec: Some(StatefulSetSpec {
            selector: make_selector("db"),
            template: make_template("db", "app:latest"),
            ..Default::default()
        }),
        ..Default::default()
    };
    cluster.insert(&sts).unwrap();

    for revision in revisions {
        let hash = format!("r{}", revision);
        let mut template = serde_json::to_value(make_template("db", &format!("app:0.{}", revision))).unwrap();
        template["$patch"] = serde_json::Value::from("replace");

        let cr = ControllerRevision {
            metadata: ObjectMeta {
                labels: labels(&[("app", "db"), (CONTROLLER_REVISION_HASH_LABEL, &hash)]),
                owner_references: Some(vec![controller_reference::<StatefulSet>(&sts.metadata)]),
                ..make_meta(&format!("db-{}", hash))
            },
            // the StatefulSet controller stores only the template, as a replace patch
            data: Some(RawExtension(serde_json::json!({"spec": {"template": template}}))),
            revision: *revision,
        };
        cluster.insert(&cr).unwrap();
    }
}

pub fn make_client(cluster: MemoryCluster) -> Arc<dyn ClusterReader> {
    Arc::new(cluster)
}
