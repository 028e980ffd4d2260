mod args;
mod command;
mod kubeconfig;
mod run;

pub use self::args::{AllNamespaces, OutputFormat};
pub use self::command::*;
pub use self::run::*;
