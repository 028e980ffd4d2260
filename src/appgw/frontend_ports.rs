use std::collections::BTreeSet;

use k8s_openapi::api::networking::v1::Ingress;
use kube::ResourceExt;

use crate::{cluster::ClusterState, logger};

use super::{
    builder::ConfigBuilder, ingress_rules::ingress_frontend_ports, names::frontend_port_name,
    types::FrontendPort,
};

/// Distinct frontend ports of all Ingresses, sorted by port.
///
/// Never empty: `default_port` stands in when no Ingress asks for one.
pub fn aggregate_frontend_ports(ingresses: &[Ingress], default_port: i32) -> Vec<FrontendPort> {
    let mut ports: BTreeSet<i32> = BTreeSet::new();

    for ingress in ingresses {
        logger!(
            info,
            "[frontend-ports] Ingress {} from namespace {}",
            ingress.name_any(),
            ingress.namespace().unwrap_or_default()
        );

        ports.extend(ingress_frontend_ports(ingress));
    }

    if ports.is_empty() {
        logger!(
            info,
            "[frontend-ports] No port requested; adding default port {}",
            default_port
        );
        ports.insert(default_port);
    }

    ports
        .into_iter()
        .map(|port| FrontendPort {
            name: frontend_port_name(port),
            port,
        })
        .collect()
}

impl<C> ConfigBuilder<'_, C>
where
    C: ClusterState,
{
    pub fn frontend_ports(&mut self, ingresses: &[Ingress]) -> &mut Self {
        let ports = aggregate_frontend_ports(ingresses, self.defaults().frontend_port);

        logger!(
            info,
            "[frontend-ports] Will create {} frontend ports",
            ports.len()
        );

        self.config_mut().frontend_ports = ports;

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use crate::appgw::defaults::DEFAULT_FRONTEND_PORT;

    fn ingresses() -> Vec<Ingress> {
        serde_yaml::from_str(indoc! {
            "
            - metadata:
                name: ingress-1
              spec:
                rules:
                  - host: example.com
            - metadata:
                name: ingress-2
              spec:
                tls:
                  - hosts:
                      - secure.example.com
                rules:
                  - host: www.example.com
                  - host: secure.example.com
            "
        })
        .unwrap()
    }

    fn ports(frontend_ports: &[FrontendPort]) -> Vec<i32> {
        frontend_ports.iter().map(|p| p.port).collect()
    }

    #[test]
    fn 全ingressのポートの和集合を返す() {
        let actual = aggregate_frontend_ports(&ingresses(), DEFAULT_FRONTEND_PORT);

        assert_eq!(
            actual,
            vec![
                FrontendPort {
                    name: "k8s-ag-ingress-fp-80".into(),
                    port: 80
                },
                FrontendPort {
                    name: "k8s-ag-ingress-fp-443".into(),
                    port: 443
                },
            ]
        );
    }

    #[test]
    fn ingressの順序に依存しない() {
        let mut reversed = ingresses();
        reversed.reverse();

        assert_eq!(
            aggregate_frontend_ports(&reversed, DEFAULT_FRONTEND_PORT),
            aggregate_frontend_ports(&ingresses(), DEFAULT_FRONTEND_PORT)
        );
    }

    #[test]
    fn ingressがないときデフォルトポートを1つ返す() {
        let actual = aggregate_frontend_ports(&[], DEFAULT_FRONTEND_PORT);

        assert_eq!(ports(&actual), vec![DEFAULT_FRONTEND_PORT]);
    }

    #[test]
    fn ポートを要求しないingressだけのときデフォルトポートを返す() {
        let ingresses: Vec<Ingress> = serde_yaml::from_str(indoc! {
            "
            - metadata:
                name: ingress
              spec: {}
            "
        })
        .unwrap();

        let actual = aggregate_frontend_ports(&ingresses, 8080);

        assert_eq!(
            actual,
            vec![FrontendPort {
                name: "k8s-ag-ingress-fp-8080".into(),
                port: 8080
            }]
        );
    }
}
