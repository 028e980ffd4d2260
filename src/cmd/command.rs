use std::path::PathBuf;

use clap::Parser;

use crate::{cluster::TargetNamespaces, config::ConfigLoadOption};

use super::args::{AllNamespaces, OutputFormat};

const APP_NAME: &str = "appgw-ingress";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Command {
    /// Namespaces (e.g. -n val1,val2,val3 | -n val1 -n val2 -n val3)
    #[arg(
        short,
        long,
        conflicts_with = "all_namespaces",
        value_delimiter = ',',
        display_order = 1000
    )]
    pub namespaces: Option<Vec<String>>,

    /// Context
    #[arg(short, long, display_order = 1000)]
    pub context: Option<String>,

    /// Select all namespaces
    #[arg(
        short = 'A',
        long,
        value_name = "true|false",
        num_args = 0..=1,
        require_equals = true,
        default_value_t = AllNamespaces::False,
        default_missing_value = "true",
        hide_possible_values = true,
        value_enum,
        display_order = 1000
    )]
    pub all_namespaces: AllNamespaces,

    /// kubeconfig path
    #[arg(short = 'C', long, display_order = 1000)]
    pub kubeconfig: Option<PathBuf>,

    /// Logging
    #[arg(short = 'l', long, display_order = 1000)]
    pub logging: bool,

    /// Config file path
    #[arg(long, display_order = 1000)]
    pub config_file: Option<PathBuf>,

    /// Output format
    #[arg(
        short,
        long,
        value_name = "yaml|json",
        default_value_t = OutputFormat::Yaml,
        value_enum,
        display_order = 1000
    )]
    pub output: OutputFormat,
}

impl Command {
    pub fn init() -> Self {
        Self::parse()
    }

    /// Namespaces to read from. Without `-n` or `-A` this is the default
    /// namespace of the selected context.
    pub fn target_namespaces(&self, default_namespace: &str) -> TargetNamespaces {
        if bool::from(self.all_namespaces) {
            return TargetNamespaces::All;
        }

        match &self.namespaces {
            Some(namespaces) if !namespaces.is_empty() => {
                TargetNamespaces::Namespaces(namespaces.clone())
            }
            _ => TargetNamespaces::Namespaces(vec![default_namespace.to_string()]),
        }
    }

    pub fn config_load_option(&self) -> ConfigLoadOption {
        if let Some(path) = &self.config_file {
            return match path.try_exists() {
                Ok(true) => ConfigLoadOption::Path(path.clone()),
                Ok(false) => {
                    eprintln!("Config file not found: {:?}", path);

                    ConfigLoadOption::Default
                }
                Err(err) => {
                    eprintln!("Failed to check config file exists: {}", err);

                    ConfigLoadOption::Default
                }
            };
        }

        let Some(path) = xdg_config_home().map(|dir| dir.join("config.yaml")) else {
            return ConfigLoadOption::Default;
        };

        match path.try_exists() {
            Ok(true) => ConfigLoadOption::Path(path),
            Ok(false) => ConfigLoadOption::Default,
            Err(err) => {
                eprintln!("Failed to check config file exists: {}", err);

                ConfigLoadOption::Default
            }
        }
    }
}

fn xdg_config_home() -> Option<PathBuf> {
    match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) => Some(PathBuf::from(dir).join(APP_NAME)),
        None => dirs::home_dir().map(|home| home.join(".config").join(APP_NAME)),
    }
}

#[allow(clippy::bool_assert_comparison)]
#[cfg(test)]
mod tests {
    use super::*;

    mod namespace {
        use clap::error::ErrorKind;
        use pretty_assertions::assert_eq;
        use rstest::rstest;

        use super::*;

        #[test]
        fn 値を設定しないとエラーを返す() {
            let cmd = Command::try_parse_from(["appgw-ingress", "-n"]);
            assert_eq!(cmd.unwrap_err().kind(), ErrorKind::InvalidValue)
        }

        #[rstest]
        #[case::multiple_occurrences(&["appgw-ingress", "-n", "foo", "-n", "bar", "-n", "zoo"])]
        #[case::delimiter(&["appgw-ingress", "-n", "foo,bar,zoo"])]
        #[case::mixed(&["appgw-ingress", "-n", "foo,bar", "-n", "zoo"])]
        fn namespaceを複数指定したときvecを返す(#[case] iter: &[&str]) {
            let cmd = Command::try_parse_from(iter).unwrap();
            assert_eq!(
                cmd.namespaces,
                Some(vec![
                    "foo".to_string(),
                    "bar".to_string(),
                    "zoo".to_string()
                ])
            )
        }

        #[test]
        fn all_namespacesと併用するとエラーを返す() {
            let cmd = Command::try_parse_from(["appgw-ingress", "-A", "-n", "hoge"]);
            assert_eq!(cmd.unwrap_err().kind(), ErrorKind::ArgumentConflict)
        }
    }

    mod all_namespaces {
        use pretty_assertions::assert_eq;
        use rstest::rstest;

        use super::*;

        #[test]
        fn equalがない構文のときエラーになる() {
            let cmd = Command::try_parse_from(["appgw-ingress", "--all-namespaces", "true"]);
            assert_eq!(cmd.is_err(), true)
        }

        #[rstest]
        #[case::short(&["appgw-ingress", "-A"], AllNamespaces::True)]
        #[case::long(&["appgw-ingress", "--all-namespaces"], AllNamespaces::True)]
        #[case::explicit_true(&["appgw-ingress", "--all-namespaces=true"], AllNamespaces::True)]
        #[case::explicit_false(&["appgw-ingress", "--all-namespaces=false"], AllNamespaces::False)]
        #[case::none(&["appgw-ingress"], AllNamespaces::False)]
        fn 指定に応じた値を返す(#[case] iter: &[&str], #[case] expected: AllNamespaces) {
            let cmd = Command::try_parse_from(iter).unwrap();
            assert_eq!(cmd.all_namespaces, expected)
        }
    }

    mod output {
        use clap::error::ErrorKind;
        use pretty_assertions::assert_eq;
        use rstest::rstest;

        use super::*;

        #[rstest]
        #[case::default(&["appgw-ingress"], OutputFormat::Yaml)]
        #[case::yaml(&["appgw-ingress", "-o", "yaml"], OutputFormat::Yaml)]
        #[case::json(&["appgw-ingress", "--output", "json"], OutputFormat::Json)]
        fn 指定した形式を返す(#[case] iter: &[&str], #[case] expected: OutputFormat) {
            let cmd = Command::try_parse_from(iter).unwrap();
            assert_eq!(cmd.output, expected)
        }

        #[test]
        fn possible_valuesの値にない値を設定したときerrを返す() {
            let cmd = Command::try_parse_from(["appgw-ingress", "-o", "toml"]);
            assert_eq!(cmd.unwrap_err().kind(), ErrorKind::InvalidValue)
        }
    }

    mod target_namespaces {
        use pretty_assertions::assert_eq;

        use super::*;

        #[test]
        fn all_namespacesのときallを返す() {
            let cmd = Command::try_parse_from(["appgw-ingress", "-A"]).unwrap();
            assert_eq!(cmd.target_namespaces("default"), TargetNamespaces::All)
        }

        #[test]
        fn namespaceを指定したときその値を返す() {
            let cmd = Command::try_parse_from(["appgw-ingress", "-n", "foo,bar"]).unwrap();
            assert_eq!(
                cmd.target_namespaces("default"),
                TargetNamespaces::Namespaces(vec!["foo".to_string(), "bar".to_string()])
            )
        }

        #[test]
        fn 指定がないときcontextのnamespaceを返す() {
            let cmd = Command::try_parse_from(["appgw-ingress"]).unwrap();
            assert_eq!(
                cmd.target_namespaces("kube-system"),
                TargetNamespaces::Namespaces(vec!["kube-system".to_string()])
            )
        }
    }

    mod config_load_option {
        use figment::Jail;
        use pretty_assertions::assert_eq;

        use super::*;

        #[test]
        fn config_fileが存在するときpathを返す() {
            Jail::expect_with(|jail| {
                jail.create_file("custom.yaml", "default_frontend_port: 8080")?;

                let cmd =
                    Command::try_parse_from(["appgw-ingress", "--config-file", "custom.yaml"])
                        .unwrap();

                assert_eq!(
                    matches!(cmd.config_load_option(), ConfigLoadOption::Path(path) if path == PathBuf::from("custom.yaml")),
                    true
                );

                Ok(())
            });
        }

        #[test]
        fn config_fileが存在しないときdefaultを返す() {
            Jail::expect_with(|_| {
                let cmd =
                    Command::try_parse_from(["appgw-ingress", "--config-file", "missing.yaml"])
                        .unwrap();

                assert_eq!(
                    matches!(cmd.config_load_option(), ConfigLoadOption::Default),
                    true
                );

                Ok(())
            });
        }

        #[test]
        fn xdg_config_homeの設定ファイルを読む() {
            Jail::expect_with(|jail| {
                jail.create_dir("appgw-ingress")?;
                jail.create_file("appgw-ingress/config.yaml", "ingress_class: custom")?;
                let dir = jail.directory().to_path_buf();
                jail.set_env("XDG_CONFIG_HOME", dir.display());

                let cmd = Command::try_parse_from(["appgw-ingress"]).unwrap();

                let expected = jail.directory().join("appgw-ingress").join("config.yaml");

                assert_eq!(
                    matches!(cmd.config_load_option(), ConfigLoadOption::Path(path) if path == expected),
                    true
                );

                Ok(())
            });
        }
    }
}
