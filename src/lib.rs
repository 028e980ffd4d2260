pub mod annotations;
pub mod appgw;
pub mod cluster;
pub mod cmd;
pub mod config;
pub mod error;
pub mod kube;
pub mod logging;
