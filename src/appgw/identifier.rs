use std::{collections::BTreeSet, fmt};

use k8s_openapi::{
    api::{
        core::v1::ServicePort,
        networking::v1::{HTTPIngressPath, Ingress, IngressBackend, IngressRule, ServiceBackendPort},
    },
    apimachinery::pkg::util::intstr::IntOrString,
};
use kube::ResourceExt;

use crate::{cluster::ExtractNamespace, logger};

/// Port of a Service as referenced from an Ingress backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServicePortSpec {
    Number(i32),
    Name(String),
}

impl ServicePortSpec {
    /// `None` when the backend names neither a port number nor a port name.
    pub fn from_backend_port(port: &ServiceBackendPort) -> Option<Self> {
        if let Some(number) = port.number {
            return Some(Self::Number(number));
        }

        port.name
            .as_ref()
            .filter(|name| !name.is_empty())
            .map(|name| Self::Name(name.clone()))
    }

    /// A number selects the service port by `port` or numeric `targetPort`,
    /// a name selects it by `name` or named `targetPort`.
    pub fn matches(&self, service_port: &ServicePort) -> bool {
        match self {
            Self::Number(number) => {
                service_port.port == *number
                    || matches!(&service_port.target_port, Some(IntOrString::Int(target)) if target == number)
            }
            Self::Name(name) => {
                service_port.name.as_ref() == Some(name)
                    || matches!(&service_port.target_port, Some(IntOrString::String(target)) if target == name)
            }
        }
    }
}

impl fmt::Display for ServicePortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{}", number),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IngressKey {
    pub namespace: String,
    pub name: String,
}

impl IngressKey {
    pub fn from_ingress(ingress: &Ingress) -> Self {
        Self {
            namespace: ingress.extract_namespace(),
            name: ingress.name_any(),
        }
    }
}

impl fmt::Display for IngressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleKey {
    pub host: Option<String>,
}

impl From<&IngressRule> for RuleKey {
    fn from(rule: &IngressRule) -> Self {
        Self {
            host: rule.host.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathKey {
    pub path: Option<String>,
    pub path_type: String,
}

impl From<&HTTPIngressPath> for PathKey {
    fn from(path: &HTTPIngressPath) -> Self {
        Self {
            path: path.path.clone(),
            path_type: path.path_type.clone(),
        }
    }
}

/// One routing target of an Ingress.
///
/// `rule` and `path` are `None` for the Ingress default backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BackendIdentifier {
    pub ingress: IngressKey,
    pub rule: Option<RuleKey>,
    pub path: Option<PathKey>,
    pub service_name: String,
    pub service_port: ServicePortSpec,
}

impl BackendIdentifier {
    fn new(
        ingress: &IngressKey,
        rule: Option<&IngressRule>,
        path: Option<&HTTPIngressPath>,
        backend: &IngressBackend,
    ) -> Option<Self> {
        let Some(service) = backend.service.as_ref() else {
            logger!(
                debug,
                "[backend-ids] Ingress {} has a non-service backend; skipping",
                ingress
            );
            return None;
        };

        let Some(service_port) = service
            .port
            .as_ref()
            .and_then(ServicePortSpec::from_backend_port)
        else {
            logger!(
                info,
                "[backend-ids] Ingress {} backend {} has no service port; skipping",
                ingress,
                service.name
            );
            return None;
        };

        Some(Self {
            ingress: ingress.clone(),
            rule: rule.map(RuleKey::from),
            path: path.map(PathKey::from),
            service_name: service.name.clone(),
            service_port,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.ingress.namespace
    }

    /// Host of the owning rule, if it declares a non-empty one.
    pub fn host(&self) -> Option<&str> {
        self.rule
            .as_ref()
            .and_then(|rule| rule.host.as_deref())
            .filter(|host| !host.is_empty())
    }

    /// Literal path of the owning path rule, if it declares a non-empty one.
    pub fn path(&self) -> Option<&str> {
        self.path
            .as_ref()
            .and_then(|path| path.path.as_deref())
            .filter(|path| !path.is_empty())
    }
}

impl fmt::Display for BackendIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}:{}",
            self.ingress.namespace, self.service_name, self.service_port
        )
    }
}

fn ingress_backend_ids(ingress: &Ingress) -> Vec<BackendIdentifier> {
    let key = IngressKey::from_ingress(ingress);

    let Some(spec) = ingress.spec.as_ref() else {
        return Vec::new();
    };

    let default_backend = spec
        .default_backend
        .as_ref()
        .and_then(|backend| BackendIdentifier::new(&key, None, None, backend));

    let rule_backends = spec.rules.iter().flatten().flat_map(|rule| {
        rule.http
            .iter()
            .flat_map(|http| http.paths.iter())
            .filter_map(|path| BackendIdentifier::new(&key, Some(rule), Some(path), &path.backend))
            .collect::<Vec<_>>()
    });

    default_backend.into_iter().chain(rule_backends).collect()
}

/// Distinct routing targets referenced by the given Ingresses.
pub fn backend_ids(ingresses: &[Ingress]) -> BTreeSet<BackendIdentifier> {
    ingresses.iter().flat_map(ingress_backend_ids).collect()
}
