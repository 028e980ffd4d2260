use clap::ValueEnum;
use strum::Display;

#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum AllNamespaces {
    True,
    False,
}

impl From<AllNamespaces> for bool {
    fn from(value: AllNamespaces) -> Self {
        match value {
            AllNamespaces::True => true,
            AllNamespaces::False => false,
        }
    }
}

impl std::fmt::Display for AllNamespaces {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllNamespaces::True => "true".fmt(f),
            AllNamespaces::False => "false".fmt(f),
        }
    }
}

/// Format of the printed gateway configuration.
#[derive(Debug, Default, ValueEnum, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}
