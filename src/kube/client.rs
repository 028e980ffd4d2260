use anyhow::Result;
use async_trait::async_trait;
use http::header::{HeaderValue, ACCEPT};
use kube::{
    api::{GetParams, Request},
    Client,
};
use serde::de::DeserializeOwned;

use crate::logger;

fn remove_slash(path: &str) -> &str {
    if let Some(path) = path.strip_prefix('/') {
        path
    } else {
        path
    }
}

#[derive(Clone)]
pub struct KubeClient {
    client: Client,
    server_url: String,
}

impl KubeClient {
    pub fn new(client: Client, server_url: impl Into<String>) -> Self {
        let url: String = server_url.into();
        let server_url = if let Some(url) = url.strip_suffix('/') {
            url.to_string()
        } else {
            url
        };
        Self { client, server_url }
    }
}

#[async_trait]
pub trait KubeClientRequest: Send + Sync {
    async fn request<T: DeserializeOwned + 'static>(&self, path: &str) -> Result<T>;
}

#[async_trait]
impl KubeClientRequest for KubeClient {
    async fn request<T: DeserializeOwned + 'static>(&self, path: &str) -> Result<T> {
        let request = Request::new(&self.server_url);

        let mut request = request.get(remove_slash(path), &GetParams::default())?;

        request
            .headers_mut()
            .insert(ACCEPT, HeaderValue::from_static("application/json"));

        logger!(debug, "HTTP request {:?}", request);

        let ret = self.client.request(request).await;

        ret.map_err(Into::into)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn 先頭のスラッシュを取り除く() {
        assert_eq!(remove_slash("/api/v1/pods"), "api/v1/pods");
        assert_eq!(remove_slash("api/v1/pods"), "api/v1/pods");
    }
}
