//! In-memory cluster.
//!
//! Serves objects inserted by the caller through the same [`ClusterReader`]
//! contract as the API client, including selector filtering.

use async_trait::async_trait;
use dashmap::DashMap;
use kube::core::{Selector, SelectorExt};
use pkg_types::meta::ObjectKey;
use pkg_types::workload::{Resource, ResourceType};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::reader::{ClusterError, ClusterReader};

type StoreKey = (ResourceType, String, String);

#[derive(Clone, Default)]
pub struct MemoryCluster {
    objects: Arc<DashMap<StoreKey, (BTreeMap<String, String>, Value)>>,
}

impl MemoryCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `object`, replacing any object of the same kind and key.
    pub fn insert<T: Resource>(&self, object: &T) -> anyhow::Result<()> {
        let meta = object.metadata();
        let Some(name) = meta.name.clone() else {
            anyhow::bail!("cannot store a {} without a name", T::TYPE.kind);
        };
        let namespace = meta.namespace.clone().unwrap_or_default();
        let labels = meta.labels.clone().unwrap_or_default();

        let value = serde_json::to_value(object)?;
        self.objects.insert((T::TYPE, namespace, name), (labels, value));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ClusterReader for MemoryCluster {
    async fn get(&self, resource: ResourceType, key: &ObjectKey) -> Result<Value, ClusterError> {
        self.objects
            .get(&(resource, key.namespace.clone(), key.name.clone()))
            .map(|entry| entry.value().1.clone())
            .ok_or_else(|| ClusterError::not_found(resource, key))
    }

    async fn list(
        &self,
        resource: ResourceType,
        namespace: &str,
        selector: &Selector,
    ) -> Result<Vec<Value>, ClusterError> {
        let mut matched: Vec<(String, Value)> = self
            .objects
            .iter()
            .filter(|entry| {
                let (kind, ns, _) = entry.key();
                *kind == resource && (namespace.is_empty() || ns == namespace)
            })
            .filter(|entry| selector.matches(&entry.value().0))
            .map(|entry| (entry.key().2.clone(), entry.value().1.clone()))
            .collect();

        // the API server lists in name order
        matched.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(matched.into_iter().map(|(_, v)| v).collect())
    }
}
