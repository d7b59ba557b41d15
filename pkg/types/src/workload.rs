use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::core::v1::PodTemplateSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::{Metadata, NamespaceResourceScope};
use kube::core::{ApiResource, GroupVersionKind};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::meta::{GroupKind, ObjectKey};

// --- Resource types ---

/// Static description of an API resource: where it lives and what it is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceType {
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
    pub plural: &'static str,
}

impl ResourceType {
    pub const fn of<K: k8s_openapi::Resource>() -> Self {
        Self {
            group: K::GROUP,
            version: K::VERSION,
            kind: K::KIND,
            plural: K::URL_PATH_SEGMENT,
        }
    }

    /// `group/version`, or just `version` for the core group.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.to_string()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn group_kind(&self) -> GroupKind {
        GroupKind::new(self.group, self.kind)
    }

    /// Lowercase `kind.group` as kubectl prints it, e.g. `replicaset.apps`.
    pub fn kind_group(&self) -> String {
        qualify(&self.kind.to_lowercase(), self.group)
    }

    /// `plural.group` as the API server reports it, e.g. `deployments.apps`.
    pub fn plural_group(&self) -> String {
        qualify(self.plural, self.group)
    }

    pub fn api_resource(&self) -> ApiResource {
        let gvk = GroupVersionKind::gvk(self.group, self.version, self.kind);
        ApiResource::from_gvk_with_plural(&gvk, self.plural)
    }
}

fn qualify(name: &str, group: &str) -> String {
    if group.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", name, group)
    }
}

/// A namespaced API object this tool reads.
pub trait Resource:
    k8s_openapi::Resource<Scope = NamespaceResourceScope>
    + Metadata<Ty = ObjectMeta>
    + Serialize
    + DeserializeOwned
    + Clone
    + Send
    + Sync
    + 'static
{
    const TYPE: ResourceType = ResourceType::of::<Self>();

    fn key(&self) -> ObjectKey {
        ObjectKey::from_meta(self.metadata())
    }
}

impl<K> Resource for K where
    K: k8s_openapi::Resource<Scope = NamespaceResourceScope>
        + Metadata<Ty = ObjectMeta>
        + Serialize
        + DeserializeOwned
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// A workload controller whose history can be inspected.
pub trait WorkloadResource: Resource {
    /// `None` when the object carries no spec.
    fn selector(&self) -> Option<&LabelSelector>;

    fn template(&self) -> Option<&PodTemplateSpec>;

    fn into_workload(self) -> Workload;
}

macro_rules! workload_resource {
    ($kind:ident) => {
        impl WorkloadResource for $kind {
            fn selector(&self) -> Option<&LabelSelector> {
                self.spec.as_ref().map(|spec| &spec.selector)
            }

            fn template(&self) -> Option<&PodTemplateSpec> {
                self.spec.as_ref().map(|spec| &spec.template)
            }

            fn into_workload(self) -> Workload {
                Workload::$kind(self)
            }
        }
    };
}

workload_resource!(Deployment);
workload_resource!(StatefulSet);
workload_resource!(DaemonSet);

// --- Workload ---

/// One of the supported workload controllers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Workload {
    Deployment(Deployment),
    StatefulSet(StatefulSet),
    DaemonSet(DaemonSet),
}

impl Workload {
    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Workload::Deployment(d) => &d.metadata,
            Workload::StatefulSet(s) => &s.metadata,
            Workload::DaemonSet(d) => &d.metadata,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        match self {
            Workload::Deployment(_) => Deployment::TYPE,
            Workload::StatefulSet(_) => StatefulSet::TYPE,
            Workload::DaemonSet(_) => DaemonSet::TYPE,
        }
    }

    pub fn group_kind(&self) -> GroupKind {
        self.resource_type().group_kind()
    }

    pub fn key(&self) -> ObjectKey {
        ObjectKey::from_meta(self.metadata())
    }

    pub fn template(&self) -> Option<&PodTemplateSpec> {
        match self {
            Workload::Deployment(d) => d.template(),
            Workload::StatefulSet(s) => s.template(),
            Workload::DaemonSet(d) => d.template(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::{ControllerRevision, DeploymentSpec, ReplicaSet};
    use k8s_openapi::api::core::v1::Pod;

    #[test]
    fn test_resource_types() {
        assert_eq!(Deployment::TYPE.api_version(), "apps/v1");
        assert_eq!(Deployment::TYPE.plural_group(), "deployments.apps");
        assert_eq!(ReplicaSet::TYPE.kind_group(), "replicaset.apps");
        assert_eq!(ControllerRevision::TYPE.plural, "controllerrevisions");
        assert_eq!(Pod::TYPE.api_version(), "v1");
        assert_eq!(Pod::TYPE.plural_group(), "pods");
        assert_eq!(Pod::TYPE.kind_group(), "pod");
        assert_eq!(StatefulSet::TYPE.group_kind(), GroupKind::new("apps", "StatefulSet"));
    }

    #[test]
    fn test_api_resource() {
        let ar = DaemonSet::TYPE.api_resource();
        assert_eq!(ar.group, "apps");
        assert_eq!(ar.version, "v1");
        assert_eq!(ar.api_version, "apps/v1");
        assert_eq!(ar.kind, "DaemonSet");
        assert_eq!(ar.plural, "daemonsets");
    }

    #[test]
    fn test_workload_accessors() {
        let mut deploy = Deployment {
            metadata: ObjectMeta {
                name: Some("web".to_string()),
                namespace: Some("test".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(deploy.selector().is_none());
        assert!(deploy.template().is_none());

        deploy.spec = Some(DeploymentSpec::default());
        assert!(deploy.selector().is_some());

        let workload = deploy.into_workload();
        assert_eq!(workload.resource_type(), Deployment::TYPE);
        assert_eq!(workload.key(), ObjectKey::new("test", "web"));
        assert!(workload.template().is_some());
    }
}
