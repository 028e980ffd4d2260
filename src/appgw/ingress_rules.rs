use std::collections::BTreeSet;

use k8s_openapi::api::networking::v1::{Ingress, IngressTLS};

use crate::annotations::ssl_redirect;

const HTTP_PORT: i32 = 80;
const HTTPS_PORT: i32 = 443;

/// A TLS block without hosts applies to every host of the Ingress.
fn has_tls(tls: &[IngressTLS], host: Option<&str>) -> bool {
    tls.iter().any(|tls| match tls.hosts.as_deref() {
        None | Some([]) => true,
        Some(hosts) => host.is_some_and(|host| hosts.iter().any(|h| h == host)),
    })
}

/// Frontend ports the rules of one Ingress need the gateway to listen on.
pub fn ingress_frontend_ports(ingress: &Ingress) -> BTreeSet<i32> {
    let mut ports = BTreeSet::new();

    let Some(spec) = ingress.spec.as_ref() else {
        return ports;
    };

    let tls = spec.tls.as_deref().unwrap_or_default();
    let redirect = ssl_redirect(ingress);

    let mut insert = |host: Option<&str>| {
        if has_tls(tls, host) {
            ports.insert(HTTPS_PORT);

            if redirect {
                ports.insert(HTTP_PORT);
            }
        } else {
            ports.insert(HTTP_PORT);
        }
    };

    match spec.rules.as_deref() {
        Some(rules) if !rules.is_empty() => {
            for rule in rules {
                insert(rule.host.as_deref());
            }
        }
        _ => {
            if spec.default_backend.is_some() {
                insert(None);
            }
        }
    }

    ports
}
