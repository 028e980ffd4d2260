use anyhow::Result;

use appgw_ingress::{cmd::Command, config::Config, logger, logging::Logger};

fn main() -> Result<()> {
    let cmd = Command::init();

    if cmd.logging {
        Logger::init()?;
    }

    let config = Config::load(cmd.config_load_option())?;

    logger!(info, "Loaded config: {:?}", config);

    appgw_ingress::cmd::run(cmd, config)
}
