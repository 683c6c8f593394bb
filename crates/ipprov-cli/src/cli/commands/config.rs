//! `ipprov config` - Inspect CLI configuration.

use anyhow::Result;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            print!("{}", ctx.config.to_toml()?);
        }
        ConfigCommands::Path => {
            let path = match &ctx.config_path {
                Some(path) => path.clone(),
                None => Config::path()?,
            };
            println!("{}", path.display());
        }
    }

    Ok(())
}
