use std::collections::BTreeMap;

use serde::Serialize;
use strum::Display;

use super::identifier::BackendIdentifier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendPort {
    pub name: String,
    pub port: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum ProbeProtocol {
    #[default]
    Http,
    Https,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProbe {
    pub name: String,
    pub protocol: ProbeProtocol,
    pub host: String,
    pub path: String,
    /// Seconds between two probes.
    pub interval: i32,
    /// Seconds before a probe counts as failed.
    pub timeout: i32,
    pub unhealthy_threshold: i32,
}

/// The part of the gateway configuration owned by this crate.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    pub frontend_ports: Vec<FrontendPort>,
    pub probes: Vec<HealthProbe>,
    /// Probe assigned to each routing target, read by the listener and
    /// routing rule stages.
    #[serde(skip)]
    pub backend_probes: BTreeMap<BackendIdentifier, HealthProbe>,
}
