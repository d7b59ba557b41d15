use async_trait::async_trait;
use kube::core::Selector;
use pkg_types::meta::ObjectKey;
use pkg_types::workload::{Resource, ResourceType};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("{} \"{name}\" not found", .resource.plural_group())]
    NotFound {
        resource: ResourceType,
        namespace: String,
        name: String,
    },
    #[error("{verb} {} in namespace {namespace:?} failed: {source}", .resource.plural_group())]
    Api {
        verb: &'static str,
        resource: ResourceType,
        namespace: String,
        source: kube::Error,
    },
    #[error("error decoding {kind}: {source}")]
    Decode {
        kind: &'static str,
        source: serde_json::Error,
    },
}

impl ClusterError {
    pub fn not_found(resource: ResourceType, key: &ObjectKey) -> Self {
        ClusterError::NotFound {
            resource,
            namespace: key.namespace.clone(),
            name: key.name.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClusterError::NotFound { .. })
    }
}

/// Read-only access to namespaced cluster objects in their JSON form.
///
/// Dropping a returned future abandons the request.
#[async_trait]
pub trait ClusterReader: Send + Sync {
    /// Fetch a single object; a missing object yields [`ClusterError::NotFound`].
    async fn get(&self, resource: ResourceType, key: &ObjectKey) -> Result<Value, ClusterError>;

    /// List objects of a kind in `namespace` whose labels match `selector`.
    /// A failed request is an error, never an empty list.
    async fn list(
        &self,
        resource: ResourceType,
        namespace: &str,
        selector: &Selector,
    ) -> Result<Vec<Value>, ClusterError>;
}

/// Fetch and decode a typed object.
pub async fn get<T: Resource>(reader: &dyn ClusterReader, key: &ObjectKey) -> Result<T, ClusterError> {
    let value = reader.get(T::TYPE, key).await?;
    from_value(value)
}

/// List and decode typed objects.
pub async fn list<T: Resource>(
    reader: &dyn ClusterReader,
    namespace: &str,
    selector: &Selector,
) -> Result<Vec<T>, ClusterError> {
    reader
        .list(T::TYPE, namespace, selector)
        .await?
        .into_iter()
        .map(from_value)
        .collect()
}

fn from_value<T: Resource>(value: Value) -> Result<T, ClusterError> {
    serde_json::from_value(value).map_err(|source| ClusterError::Decode {
        kind: T::TYPE.kind,
        source,
    })
}
