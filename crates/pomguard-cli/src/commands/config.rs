//! `pomguard config`.

use std::path::Path;

use pomguard_core::config::CliOverrides;
use pomguard_core::errors::ConfigError;

use super::load_config;
use crate::cli::{ConfigArgs, ConfigCommand};

pub fn run_config(args: ConfigArgs, config_path: Option<&Path>) -> Result<i32, ConfigError> {
    let (_, config) = load_config(config_path, CliOverrides::default())?;
    match args.command {
        ConfigCommand::Show => print!("{}", config.to_toml()?),
        ConfigCommand::Validate => println!(
            "✓ Configuration is valid ({} expected dependencies)",
            config.audit.expect.len()
        ),
    }
    Ok(0)
}
