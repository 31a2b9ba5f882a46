//! Configuration inspection commands

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::output::json::format_json;

/// Print the effective configuration: file settings merged with flag and
/// environment overrides
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let config = opts.merged_config()?;
    let path = Config::resolve_path(opts.config_ref())?;

    match opts.resolve_format(&config) {
        OutputFormat::Json => println!("{}", format_json(&config)?),
        _ => {
            let source = if path.exists() {
                path.display().to_string()
            } else {
                format!("{} (not found, using defaults)", path.display())
            };
            println!("# Source: {}", source);
            print!(
                "{}",
                serde_yaml::to_string(&config).map_err(ConfigError::from)?
            );
        }
    }

    if let Err(err) = config.validate() {
        log::warn!("Configuration is not valid: {}", err);
    }
    Ok(())
}

/// Print the config file path in use
pub fn path(opts: &GlobalOptions) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    println!("{}", path.display());
    Ok(())
}
