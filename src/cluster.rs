//! Read access to the cluster objects the synthesis consults.

mod selector;
mod snapshot;

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{Pod, Service};
use kube::ResourceExt;

pub use selector::BTreeMapContains;
pub use snapshot::{Snapshot, TargetNamespaces};

/// Cached, non-blocking lookups against the current cluster state.
pub trait ClusterState {
    fn service(&self, namespace: &str, name: &str) -> Option<&Service>;

    /// Pods in `namespace` whose labels contain every `selector` entry, ordered
    /// by pod name. An empty selector selects nothing.
    fn pods_by_selector(&self, namespace: &str, selector: &BTreeMap<String, String>) -> Vec<&Pod>;
}

pub trait ExtractNamespace {
    fn extract_namespace(&self) -> String;
}

impl<K> ExtractNamespace for K
where
    K: ResourceExt,
{
    fn extract_namespace(&self) -> String {
        self.namespace().unwrap_or_else(|| "default".to_string())
    }
}
