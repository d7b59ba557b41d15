use async_trait::async_trait;
use kube::api::{Api, DynamicObject, ListParams};
use kube::core::Selector;
use kube::Client;
use pkg_types::meta::ObjectKey;
use pkg_types::workload::ResourceType;
use serde_json::Value;
use tracing::debug;

use crate::reader::{ClusterError, ClusterReader};

/// Reads objects from a Kubernetes API server.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, resource: ResourceType, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &resource.api_resource())
    }
}

fn to_value(resource: ResourceType, object: DynamicObject) -> Result<Value, ClusterError> {
    serde_json::to_value(object).map_err(|source| ClusterError::Decode {
        kind: resource.kind,
        source,
    })
}

#[async_trait]
impl ClusterReader for KubeCluster {
    async fn get(&self, resource: ResourceType, key: &ObjectKey) -> Result<Value, ClusterError> {
        let object = match self.api(resource, &key.namespace).get(&key.name).await {
            Ok(object) => object,
            Err(kube::Error::Api(ref err)) if err.code == 404 => {
                return Err(ClusterError::not_found(resource, key));
            }
            Err(source) => {
                return Err(ClusterError::Api {
                    verb: "get",
                    resource,
                    namespace: key.namespace.clone(),
                    source,
                });
            }
        };
        debug!("Got {} {}", resource.plural_group(), key);
        to_value(resource, object)
    }

    async fn list(
        &self,
        resource: ResourceType,
        namespace: &str,
        selector: &Selector,
    ) -> Result<Vec<Value>, ClusterError> {
        let params = ListParams::default().labels(&selector.to_string());
        let list = self
            .api(resource, namespace)
            .list(&params)
            .await
            .map_err(|source| ClusterError::Api {
                verb: "list",
                resource,
                namespace: namespace.to_string(),
                source,
            })?;
        debug!(
            "Listed {} {} in {} matching {:?}",
            list.items.len(),
            resource.plural_group(),
            namespace,
            selector.to_string()
        );
        list.items
            .into_iter()
            .map(|object| to_value(resource, object))
            .collect()
    }
}
