use std::collections::{BTreeMap, BTreeSet};

use k8s_openapi::{
    api::{
        core::v1::{ContainerPort, Probe, Service, ServicePort},
        networking::v1::Ingress,
    },
    apimachinery::pkg::util::intstr::IntOrString,
};

use crate::{annotations::backend_path_prefix, cluster::ClusterState, logger};

use super::{
    builder::ConfigBuilder,
    identifier::{backend_ids, BackendIdentifier, IngressKey, ServicePortSpec},
    names::probe_name,
    types::{HealthProbe, ProbeProtocol},
};

const PROTOCOL_TCP: &str = "TCP";
const SCHEME_HTTPS: &str = "HTTPS";

/// Probes keyed by name, and the probe each routing target uses.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProbesMap {
    pub by_name: BTreeMap<String, HealthProbe>,
    pub by_backend: BTreeMap<BackendIdentifier, HealthProbe>,
}

/// Container ports a service port forwards to.
#[derive(Debug, Default, PartialEq)]
struct TargetPorts {
    numbers: BTreeSet<i32>,
    names: BTreeSet<String>,
}

impl TargetPorts {
    /// Targets of the first TCP service port selected by `backend_port`.
    fn resolve(service: &Service, backend_port: &ServicePortSpec) -> Self {
        let mut targets = Self::default();

        let ports = service
            .spec
            .as_ref()
            .and_then(|spec| spec.ports.as_deref())
            .unwrap_or_default();

        let Some(service_port) = ports
            .iter()
            .filter(|sp| is_tcp(sp))
            .find(|sp| backend_port.matches(sp))
        else {
            return targets;
        };

        match &service_port.target_port {
            None => {
                targets.numbers.insert(service_port.port);
            }
            Some(IntOrString::String(name)) if name.is_empty() => {
                targets.numbers.insert(service_port.port);
            }
            Some(IntOrString::Int(number)) => {
                targets.numbers.insert(*number);
            }
            Some(IntOrString::String(name)) => {
                targets.numbers.extend(
                    ports
                        .iter()
                        .filter(|sp| sp.name.as_ref() == Some(name))
                        .filter_map(|sp| match sp.target_port {
                            Some(IntOrString::Int(number)) => Some(number),
                            _ => None,
                        }),
                );
                targets.names.insert(name.clone());
            }
        }

        targets
    }

    fn contains(&self, port: &ContainerPort) -> bool {
        self.numbers.contains(&port.container_port)
            || port
                .name
                .as_ref()
                .is_some_and(|name| self.names.contains(name))
    }

    fn is_empty(&self) -> bool {
        self.numbers.is_empty() && self.names.is_empty()
    }
}

/// Services without an explicit protocol are TCP.
fn is_tcp(port: &ServicePort) -> bool {
    port.protocol.as_deref().unwrap_or(PROTOCOL_TCP) == PROTOCOL_TCP
}

fn http_get_probe(probe: Option<&Probe>) -> Option<&Probe> {
    probe.filter(|probe| probe.http_get.is_some())
}

/// Overrides the fields of `probe` the container probe explicitly sets.
fn merge_container_probe(probe: &mut HealthProbe, container_probe: &Probe) {
    if let Some(http_get) = container_probe.http_get.as_ref() {
        if let Some(host) = http_get.host.as_deref().filter(|host| !host.is_empty()) {
            probe.host = host.to_string();
        }

        if let Some(path) = http_get.path.as_deref().filter(|path| !path.is_empty()) {
            probe.path = path.to_string();
        }

        if http_get.scheme.as_deref() == Some(SCHEME_HTTPS) {
            probe.protocol = ProbeProtocol::Https;
        }
    }

    if let Some(interval) = container_probe.period_seconds.filter(|v| *v != 0) {
        probe.interval = interval;
    }

    if let Some(timeout) = container_probe.timeout_seconds.filter(|v| *v != 0) {
        probe.timeout = timeout;
    }

    if let Some(threshold) = container_probe.failure_threshold.filter(|v| *v != 0) {
        probe.unhealthy_threshold = threshold;
    }
}

impl<'a, C> ConfigBuilder<'a, C>
where
    C: ClusterState,
{
    /// Resolves one probe per routing target. Targets that resolve to nothing
    /// share the default probe, which is always part of `by_name`.
    pub fn probes_map(&self, ingresses: &[Ingress]) -> ProbesMap {
        let default_probe = self.defaults().probe.clone();

        logger!(
            info,
            "[health-probes] Adding default probe: {}",
            default_probe.name
        );

        let mut map = ProbesMap::default();

        map.by_name
            .insert(default_probe.name.clone(), default_probe.clone());

        let owners: BTreeMap<IngressKey, &Ingress> = ingresses
            .iter()
            .map(|ing| (IngressKey::from_ingress(ing), ing))
            .collect();

        for backend in backend_ids(ingresses) {
            let probe = owners
                .get(&backend.ingress)
                .and_then(|ingress| self.resolve_probe(&backend, ingress));

            match probe {
                Some(probe) => {
                    logger!(
                        info,
                        "[health-probes] Created probe {} for backend: '{}'",
                        probe.name,
                        backend
                    );

                    map.by_name.insert(probe.name.clone(), probe.clone());
                    map.by_backend.insert(backend, probe);
                }
                None => {
                    logger!(
                        info,
                        "[health-probes] No k8s probe for backend: '{}'; Adding default probe: '{}'",
                        backend,
                        default_probe.name
                    );

                    map.by_backend.insert(backend, default_probe.clone());
                }
            }
        }

        map
    }

    /// Probe for one routing target of `ingress`, or `None` when its service
    /// does not exist.
    pub fn resolve_probe(
        &self,
        backend: &BackendIdentifier,
        ingress: &Ingress,
    ) -> Option<HealthProbe> {
        let service = self
            .cluster()
            .service(backend.namespace(), &backend.service_name)?;

        let mut probe = HealthProbe {
            name: probe_name(
                &backend.service_name,
                &backend.service_port,
                &backend.ingress.name,
            ),
            ..self.defaults().probe.clone()
        };

        if let Some(host) = backend.host() {
            probe.host = host.to_string();
        }

        if let Some(path) = backend_path_prefix(ingress).or_else(|| backend.path().map(String::from)) {
            probe.path = path;
        }

        if let Some(container_probe) = self.container_probe(service, backend) {
            merge_container_probe(&mut probe, container_probe);
        }

        Some(probe)
    }

    /// First HTTP-GET probe among the containers serving a target port of the
    /// backend, readiness before liveness. Pods are visited by name, containers
    /// in declaration order.
    fn container_probe(&self, service: &Service, backend: &BackendIdentifier) -> Option<&'a Probe> {
        let targets = TargetPorts::resolve(service, &backend.service_port);

        if targets.is_empty() {
            logger!(
                debug,
                "[health-probes] No TCP port of service {} matches backend '{}'",
                backend.service_name,
                backend
            );
            return None;
        }

        let selector = service
            .spec
            .as_ref()
            .and_then(|spec| spec.selector.clone())
            .unwrap_or_default();

        let cluster: &'a C = self.cluster();

        cluster
            .pods_by_selector(backend.namespace(), &selector)
            .into_iter()
            .filter_map(|pod| pod.spec.as_ref())
            .flat_map(|spec| spec.containers.iter())
            .filter(|container| {
                container
                    .ports
                    .iter()
                    .flatten()
                    .any(|port| targets.contains(port))
            })
            .find_map(|container| {
                http_get_probe(container.readiness_probe.as_ref())
                    .or_else(|| http_get_probe(container.liveness_probe.as_ref()))
            })
    }

    pub fn health_probes(&mut self, ingresses: &[Ingress]) -> &mut Self {
        let ProbesMap {
            by_name,
            by_backend,
        } = self.probes_map(ingresses);

        logger!(
            info,
            "[health-probes] Will create {} App Gateway probes.",
            by_name.len()
        );

        let mut probes: Vec<HealthProbe> = by_name.into_values().collect();

        probes.sort_by(|a, b| a.name.cmp(&b.name));

        let config = self.config_mut();
        config.probes = probes;
        config.backend_probes = by_backend;

        self
    }
}
