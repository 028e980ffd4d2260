use sha2::{Digest, Sha256};

use super::identifier::ServicePortSpec;

const PREFIX: &str = "k8s-ag-ingress";

const MAX_NAME_LENGTH: usize = 80;

const HASH_LENGTH: usize = 4;

pub fn frontend_port_name(port: i32) -> String {
    format!("{PREFIX}-fp-{port}")
}

/// Probe name for a `(service, port, ingress)` triple.
///
/// The hash suffix is taken over the unjoined fields, so two triples that only
/// differ in where their dashes fall still get different names.
pub fn probe_name(service_name: &str, service_port: &ServicePortSpec, ingress_name: &str) -> String {
    let suffix = format!("-pb-{}", short_hash(service_name, service_port, ingress_name));

    let readable = format!("{PREFIX}-{service_name}-{service_port}-{ingress_name}");

    let readable = truncate(&readable, MAX_NAME_LENGTH - suffix.len());

    format!("{readable}{suffix}")
}

fn short_hash(service_name: &str, service_port: &ServicePortSpec, ingress_name: &str) -> String {
    let port = match service_port {
        ServicePortSpec::Number(number) => format!("number:{number}"),
        ServicePortSpec::Name(name) => format!("name:{name}"),
    };

    let mut hasher = Sha256::new();

    for (i, field) in [service_name, port.as_str(), ingress_name].iter().enumerate() {
        if i != 0 {
            hasher.update([0u8]);
        }
        hasher.update(field.as_bytes());
    }

    hasher.finalize()[..HASH_LENGTH]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }

    let end = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|end| *end <= max)
        .last()
        .unwrap_or(0);

    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn frontend_port名はポート番号から決まる() {
        assert_eq!(frontend_port_name(443), "k8s-ag-ingress-fp-443");
    }

    #[test]
    fn 同じ入力からは同じprobe名を返す() {
        let port = ServicePortSpec::Number(80);

        assert_eq!(
            probe_name("service", &port, "ingress"),
            probe_name("service", &port, "ingress")
        );
    }

    #[test]
    fn probe名は読める部分とハッシュからなる() {
        let name = probe_name("service", &ServicePortSpec::Number(80), "ingress");

        assert!(name.starts_with("k8s-ag-ingress-service-80-ingress-pb-"));
        assert_eq!(name.len(), "k8s-ag-ingress-service-80-ingress-pb-".len() + HASH_LENGTH * 2);
    }

    #[test]
    fn ダッシュの位置だけが異なる入力でもprobe名は異なる() {
        assert_ne!(
            probe_name("a-b", &ServicePortSpec::Name("c".into()), "ingress"),
            probe_name("a", &ServicePortSpec::Name("b-c".into()), "ingress"),
        );
    }

    #[test]
    fn ポートの種類が異なるとprobe名は異なる() {
        assert_ne!(
            probe_name("service", &ServicePortSpec::Number(80), "ingress"),
            probe_name("service", &ServicePortSpec::Name("80".into()), "ingress"),
        );
    }

    #[test]
    fn 長い名前は上限の長さに切り詰める() {
        let long = "x".repeat(100);

        let name = probe_name(&long, &ServicePortSpec::Number(80), "ingress");

        assert_eq!(name.len(), MAX_NAME_LENGTH);
        assert_ne!(
            name,
            probe_name(&long, &ServicePortSpec::Number(80), "other")
        );
    }
}
