mod client;

pub use client::{KubeClient, KubeClientRequest};

#[cfg(test)]
pub use client::mock;
