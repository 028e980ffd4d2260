use crate::config::Config;

use super::types::{HealthProbe, ProbeProtocol};

pub const DEFAULT_FRONTEND_PORT: i32 = 80;

pub const DEFAULT_PROBE_NAME: &str = "k8s-ag-ingress-defaultprobe";
pub const DEFAULT_PROBE_HOST: &str = "localhost";
pub const DEFAULT_PROBE_PATH: &str = "/";
pub const DEFAULT_PROBE_INTERVAL: i32 = 30;
pub const DEFAULT_PROBE_TIMEOUT: i32 = 30;
pub const DEFAULT_PROBE_UNHEALTHY_THRESHOLD: i32 = 3;

pub fn default_probe() -> HealthProbe {
    HealthProbe {
        name: DEFAULT_PROBE_NAME.to_string(),
        protocol: ProbeProtocol::Http,
        host: DEFAULT_PROBE_HOST.to_string(),
        path: DEFAULT_PROBE_PATH.to_string(),
        interval: DEFAULT_PROBE_INTERVAL,
        timeout: DEFAULT_PROBE_TIMEOUT,
        unhealthy_threshold: DEFAULT_PROBE_UNHEALTHY_THRESHOLD,
    }
}

/// Fallback values used when nothing can be resolved from the cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub frontend_port: i32,
    pub probe: HealthProbe,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            frontend_port: DEFAULT_FRONTEND_PORT,
            probe: default_probe(),
        }
    }
}

impl From<&Config> for Defaults {
    fn from(config: &Config) -> Self {
        let probe = &config.default_probe;

        Self {
            frontend_port: config.default_frontend_port,
            probe: HealthProbe {
                host: probe.host.clone(),
                path: probe.path.clone(),
                interval: probe.interval,
                timeout: probe.timeout,
                unhealthy_threshold: probe.unhealthy_threshold,
                ..default_probe()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn デフォルト設定から作るとdefault_probeと一致する() {
        let defaults = Defaults::from(&Config::default());

        assert_eq!(defaults, Defaults::default());
    }

    #[test]
    fn 設定値でprobeを上書きしても名前は変わらない() {
        let mut config = Config::default();
        config.default_probe.path = "/healthz".into();

        let defaults = Defaults::from(&config);

        assert_eq!(defaults.probe.name, DEFAULT_PROBE_NAME);
        assert_eq!(defaults.probe.path, "/healthz");
    }
}
