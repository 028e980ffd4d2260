use k8s_openapi::api::networking::v1::Ingress;

use crate::cluster::ClusterState;

use super::{defaults::Defaults, types::GatewayConfig};

/// Builds the gateway configuration for one reconcile pass.
///
/// The stages live next to their synthesis code: see
/// [`frontend_ports`](Self::frontend_ports) and
/// [`health_probes`](Self::health_probes).
pub struct ConfigBuilder<'a, C>
where
    C: ClusterState,
{
    cluster: &'a C,
    defaults: Defaults,
    config: GatewayConfig,
}

impl<'a, C> ConfigBuilder<'a, C>
where
    C: ClusterState,
{
    pub fn new(cluster: &'a C, defaults: Defaults) -> Self {
        Self {
            cluster,
            defaults,
            config: GatewayConfig::default(),
        }
    }

    pub(super) fn cluster(&self) -> &'a C {
        self.cluster
    }

    pub(super) fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub(super) fn config_mut(&mut self) -> &mut GatewayConfig {
        &mut self.config
    }

    pub fn build(self) -> GatewayConfig {
        self.config
    }
}

/// Runs every stage, ports before probes, against one cluster snapshot.
pub fn synthesize<C>(cluster: &C, ingresses: &[Ingress], defaults: Defaults) -> GatewayConfig
where
    C: ClusterState,
{
    let mut builder = ConfigBuilder::new(cluster, defaults);

    builder.frontend_ports(ingresses).health_probes(ingresses);

    builder.build()
}
