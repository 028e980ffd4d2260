use thiserror::Error as TError;

#[derive(Debug, TError)]
pub enum Error {
    #[error(transparent)]
    Kube(#[from] kube::Error),
    #[error(transparent)]
    Kubeconfig(#[from] kube::config::KubeconfigError),
    #[error("{0}")]
    Raw(String),
}

#[derive(Debug, PartialEq, Eq, TError)]
pub enum AnnotationError {
    #[error("MissingAnnotation: {0}")]
    Missing(&'static str),
    #[error("InvalidAnnotation: {name}={value}")]
    Invalid { name: &'static str, value: String },
}
