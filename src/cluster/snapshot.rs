use std::collections::BTreeMap;

use anyhow::Result;
use futures::future::try_join_all;
use k8s_openapi::{
    api::{
        core::v1::{Pod, Service},
        networking::v1::Ingress,
    },
    List, ListableResource,
};
use kube::{Resource, ResourceExt};
use serde::de::DeserializeOwned;

use crate::{annotations::is_application_gateway_ingress, kube::KubeClientRequest, logger};

use super::{BTreeMapContains as _, ClusterState, ExtractNamespace as _};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetNamespaces {
    All,
    Namespaces(Vec<String>),
}

/// Point-in-time copy of the objects one synthesis pass reads.
#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    ingresses: Vec<Ingress>,
    services: BTreeMap<(String, String), Service>,
    /// Sorted by namespace, then name.
    pods: Vec<Pod>,
}

impl Snapshot {
    pub fn new(ingresses: Vec<Ingress>, services: Vec<Service>, mut pods: Vec<Pod>) -> Self {
        let services = services
            .into_iter()
            .map(|svc| ((svc.extract_namespace(), svc.name_any()), svc))
            .collect();

        pods.sort_by_cached_key(|pod| (pod.extract_namespace(), pod.name_any()));

        Self {
            ingresses,
            services,
            pods,
        }
    }

    pub fn ingresses(&self) -> &[Ingress] {
        &self.ingresses
    }

    /// Lists Ingresses, Services and Pods, keeping only the Ingresses of
    /// `ingress_class`.
    pub async fn fetch<C>(
        client: &C,
        namespaces: &TargetNamespaces,
        ingress_class: &str,
    ) -> Result<Self>
    where
        C: KubeClientRequest,
    {
        let (ingresses, services, pods) = futures::try_join!(
            list::<C, Ingress>(client, namespaces),
            list::<C, Service>(client, namespaces),
            list::<C, Pod>(client, namespaces),
        )?;

        let total = ingresses.len();

        let ingresses: Vec<Ingress> = ingresses
            .into_iter()
            .filter(|ing| is_application_gateway_ingress(ing, ingress_class))
            .collect();

        logger!(
            info,
            "[snapshot] {} of {} Ingresses belong to class {}; {} Services, {} Pods",
            ingresses.len(),
            total,
            ingress_class,
            services.len(),
            pods.len()
        );

        Ok(Self::new(ingresses, services, pods))
    }
}

async fn list<C, K>(client: &C, namespaces: &TargetNamespaces) -> Result<Vec<K>>
where
    C: KubeClientRequest,
    K: Resource<DynamicType = ()> + ListableResource + DeserializeOwned + 'static,
{
    match namespaces {
        TargetNamespaces::All => {
            let list: List<K> = client.request(&K::url_path(&(), None)).await?;

            Ok(list.items)
        }
        TargetNamespaces::Namespaces(namespaces) => {
            let lists: Vec<List<K>> = try_join_all(
                namespaces.iter().map(|ns| async move {
                    client
                        .request::<List<K>>(&K::url_path(&(), Some(ns.as_str())))
                        .await
                }),
            )
            .await?;

            Ok(lists.into_iter().flat_map(|list| list.items).collect())
        }
    }
}

impl ClusterState for Snapshot {
    fn service(&self, namespace: &str, name: &str) -> Option<&Service> {
        self.services
            .get(&(namespace.to_string(), name.to_string()))
    }

    fn pods_by_selector(&self, namespace: &str, selector: &BTreeMap<String, String>) -> Vec<&Pod> {
        if selector.is_empty() {
            return Vec::new();
        }

        self.pods
            .iter()
            .filter(|pod| pod.extract_namespace() == namespace)
            .filter(|pod| pod.labels().contains_key_values(selector))
            .collect()
    }
}
