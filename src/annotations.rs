use k8s_openapi::api::networking::v1::Ingress;
use kube::ResourceExt;

use crate::{error::AnnotationError, logger};

pub const BACKEND_PATH_PREFIX_KEY: &str = "appgw.ingress.kubernetes.io/backend-path-prefix";
pub const SSL_REDIRECT_KEY: &str = "appgw.ingress.kubernetes.io/ssl-redirect";
pub const INGRESS_CLASS_KEY: &str = "kubernetes.io/ingress.class";

fn parse_string(ingress: &Ingress, name: &'static str) -> Result<String, AnnotationError> {
    let value = ingress
        .annotations()
        .get(name)
        .ok_or(AnnotationError::Missing(name))?;

    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(AnnotationError::Invalid {
            name,
            value: value.to_string(),
        });
    }

    Ok(trimmed.to_string())
}

fn parse_bool(ingress: &Ingress, name: &'static str) -> Result<bool, AnnotationError> {
    let value = parse_string(ingress, name)?;

    value
        .parse::<bool>()
        .map_err(|_| AnnotationError::Invalid { name, value })
}

/// Path the gateway should use instead of the path-rule path when talking to the backend.
pub fn backend_path_prefix(ingress: &Ingress) -> Option<String> {
    parse_string(ingress, BACKEND_PATH_PREFIX_KEY).ok()
}

pub fn ssl_redirect(ingress: &Ingress) -> bool {
    match parse_bool(ingress, SSL_REDIRECT_KEY) {
        Ok(value) => value,
        Err(AnnotationError::Missing(_)) => false,
        Err(err) => {
            logger!(
                warn,
                "Ingress {}/{}: {}",
                ingress.namespace().unwrap_or_default(),
                ingress.name_any(),
                err
            );
            false
        }
    }
}

/// Whether the Ingress is meant for this gateway, either through the legacy
/// class annotation or `spec.ingressClassName`.
pub fn is_application_gateway_ingress(ingress: &Ingress, ingress_class: &str) -> bool {
    if let Ok(class) = parse_string(ingress, INGRESS_CLASS_KEY) {
        return class == ingress_class;
    }

    ingress
        .spec
        .as_ref()
        .and_then(|spec| spec.ingress_class_name.as_deref())
        .is_some_and(|class| class == ingress_class)
}
