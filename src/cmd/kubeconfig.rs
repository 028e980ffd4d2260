use std::path::PathBuf;

use kube::{
    config::{KubeConfigOptions, Kubeconfig, KubeconfigError, NamedContext},
    Client, Config,
};

use crate::{error::Error, kube::KubeClient, logger};

pub(super) fn read_kubeconfig(path: Option<PathBuf>) -> Result<Kubeconfig, KubeconfigError> {
    if let Some(path) = path {
        Kubeconfig::read_from(path)
    } else {
        Kubeconfig::read()
    }
}

/// The requested context, else the current context, else the first one.
pub(super) fn read_context(
    kubeconfig: &Kubeconfig,
    context: Option<&str>,
) -> Result<NamedContext, Error> {
    let find = |name: &str| {
        kubeconfig
            .contexts
            .iter()
            .find(|ctx| ctx.name == name)
            .cloned()
            .ok_or_else(|| Error::Raw(format!("Cannot find context {}", name)))
    };

    if let Some(context) = context {
        find(context)
    } else if let Some(current_context) = &kubeconfig.current_context {
        find(current_context)
    } else {
        kubeconfig
            .contexts
            .first()
            .cloned()
            .ok_or_else(|| Error::Raw("Empty contexts".into()))
    }
}

/// Client for `context` and the namespace the context defaults to.
pub(super) async fn kube_client(
    kubeconfig: &Kubeconfig,
    context: &NamedContext,
) -> Result<(KubeClient, String), Error> {
    let options = KubeConfigOptions {
        context: Some(context.name.to_string()),
        ..Default::default()
    };

    let config = Config::from_custom_kubeconfig(kubeconfig.clone(), &options).await?;

    let default_namespace = config.default_namespace.to_string();
    let server_url = config.cluster_url.to_string();

    logger!(
        info,
        "[kubeconfig] context={} server={} namespace={}",
        context.name,
        server_url,
        default_namespace
    );

    let client = Client::try_from(config)?;

    Ok((KubeClient::new(client, server_url), default_namespace))
}
