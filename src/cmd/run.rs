use anyhow::Result;

use crate::{
    appgw::{synthesize, GatewayConfig},
    cluster::Snapshot,
    config::Config,
    logger,
};

use super::{
    args::OutputFormat,
    kubeconfig::{kube_client, read_context, read_kubeconfig},
    Command,
};

/// Loads one cluster snapshot, runs a synthesis pass and prints the result.
pub fn run(cmd: Command, config: Config) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    let gateway_config = rt.block_on(async {
        let kubeconfig = read_kubeconfig(cmd.kubeconfig.clone())?;

        let context = read_context(&kubeconfig, cmd.context.as_deref())?;

        let (client, default_namespace) = kube_client(&kubeconfig, &context).await?;

        let namespaces = cmd.target_namespaces(&default_namespace);

        logger!(info, "[run] target namespaces: {:?}", namespaces);

        let snapshot = Snapshot::fetch(&client, &namespaces, &config.ingress_class).await?;

        anyhow::Ok(synthesize(
            &snapshot,
            snapshot.ingresses(),
            config.defaults(),
        ))
    })?;

    println!("{}", render(&gateway_config, cmd.output)?);

    Ok(())
}

pub fn render(config: &GatewayConfig, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(config)?,
        OutputFormat::Json => serde_json::to_string_pretty(config)?,
    };

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use crate::appgw::{default_probe, FrontendPort};

    fn gateway_config() -> GatewayConfig {
        GatewayConfig {
            frontend_ports: vec![FrontendPort {
                name: "k8s-ag-ingress-fp-80".into(),
                port: 80,
            }],
            probes: vec![default_probe()],
            ..Default::default()
        }
    }

    #[test]
    fn yaml形式で出力する() {
        let actual = render(&gateway_config(), OutputFormat::Yaml).unwrap();

        let expected = indoc! {
            "
            frontendPorts:
            - name: k8s-ag-ingress-fp-80
              port: 80
            probes:
            - name: k8s-ag-ingress-defaultprobe
              protocol: Http
              host: localhost
              path: /
              interval: 30
              timeout: 30
              unhealthyThreshold: 3
            "
        };

        assert_eq!(actual, expected);
    }

    #[test]
    fn json形式で出力する() {
        let actual = render(&gateway_config(), OutputFormat::Json).unwrap();

        let expected = indoc! {
            r#"
            {
              "frontendPorts": [
                {
                  "name": "k8s-ag-ingress-fp-80",
                  "port": 80
                }
              ],
              "probes": [
                {
                  "name": "k8s-ag-ingress-defaultprobe",
                  "protocol": "Http",
                  "host": "localhost",
                  "path": "/",
                  "interval": 30,
                  "timeout": 30,
                  "unhealthyThreshold": 3
                }
              ]
            }"#
        };

        assert_eq!(actual, expected);
    }
}
