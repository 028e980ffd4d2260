//! Synthesis of the Application Gateway configuration from Ingress resources.
//!
//! [`ConfigBuilder`] owns the configuration under construction and fills it in
//! stages. Every stage is a pure function of the Ingress list and the
//! [`ClusterState`](crate::cluster::ClusterState) snapshot, so running it twice
//! against the same snapshot yields identical output.

mod builder;
pub mod defaults;
mod frontend_ports;
mod health_probes;
mod identifier;
mod ingress_rules;
mod names;
mod types;

pub use builder::{synthesize, ConfigBuilder};
pub use defaults::{default_probe, Defaults};
pub use frontend_ports::aggregate_frontend_ports;
pub use health_probes::ProbesMap;
pub use identifier::{backend_ids, BackendIdentifier, IngressKey, PathKey, RuleKey, ServicePortSpec};
pub use ingress_rules::ingress_frontend_ports;
pub use names::{frontend_port_name, probe_name};
pub use types::{FrontendPort, GatewayConfig, HealthProbe, ProbeProtocol};
