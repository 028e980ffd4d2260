use std::path::PathBuf;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::appgw::{
    defaults::{
        DEFAULT_FRONTEND_PORT, DEFAULT_PROBE_HOST, DEFAULT_PROBE_INTERVAL, DEFAULT_PROBE_PATH,
        DEFAULT_PROBE_TIMEOUT, DEFAULT_PROBE_UNHEALTHY_THRESHOLD,
    },
    Defaults,
};

pub const DEFAULT_INGRESS_CLASS: &str = "azure/application-gateway";

#[derive(Debug, Default)]
pub enum ConfigLoadOption {
    #[default]
    Default,

    Path(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DefaultProbeConfig {
    pub host: String,
    pub path: String,
    pub interval: i32,
    pub timeout: i32,
    pub unhealthy_threshold: i32,
}

impl Default for DefaultProbeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PROBE_HOST.to_string(),
            path: DEFAULT_PROBE_PATH.to_string(),
            interval: DEFAULT_PROBE_INTERVAL,
            timeout: DEFAULT_PROBE_TIMEOUT,
            unhealthy_threshold: DEFAULT_PROBE_UNHEALTHY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub ingress_class: String,
    pub default_frontend_port: i32,
    #[serde(default)]
    pub default_probe: DefaultProbeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ingress_class: DEFAULT_INGRESS_CLASS.to_string(),
            default_frontend_port: DEFAULT_FRONTEND_PORT,
            default_probe: DefaultProbeConfig::default(),
        }
    }
}

impl Config {
    pub fn load(option: ConfigLoadOption) -> Result<Self> {
        Self::figment(option).extract_lossy().map_err(Into::into)
    }

    fn figment(option: ConfigLoadOption) -> Figment {
        let figment = Figment::new();

        match option {
            ConfigLoadOption::Default => figment.merge(Serialized::defaults(Self::default())),
            ConfigLoadOption::Path(path) => figment
                .merge(Serialized::defaults(Self::default()))
                .merge(Yaml::file(path)),
        }
        .merge(Env::prefixed("APPGW_INGRESS_").split("__"))
    }

    pub fn defaults(&self) -> Defaults {
        Defaults::from(self)
    }
}
