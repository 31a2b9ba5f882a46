//! Global CLI options shared across all commands
//!
//! This module provides a centralized struct for global CLI options so
//! handlers take one parameter instead of every flag.

use clap::ValueEnum;

use crate::cli::{Cli, OutputFormat};
use crate::config::{Config, ConfigOverrides};
use crate::error::Result;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// For most options, the precedence is: CLI flag > environment variable > config file > default.
/// Clap resolves the flag and environment layers; this struct applies them
/// on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json); `None` defers to the config file
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.nhschools/config.yaml)
    pub config: Option<String>,

    /// API URL, fiscal years and graduation grade from flags or environment
    pub overrides: ConfigOverrides,

    /// Bypass the disk cache entirely
    pub no_cache: bool,

    /// Fetch fresh data and overwrite cached responses
    pub refresh: bool,

    /// Report dollar amounts as published instead of in fiscal-year dollars
    pub nominal: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    ///
    /// This is the primary constructor, called once in main.rs after parsing.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            overrides: ConfigOverrides {
                api_base_url: cli.api_url.clone(),
                fiscal_year: cli.fiscal_year,
                fiscal_start_year: cli.fiscal_start_year,
                graduation_grade: cli.graduation_grade,
            },
            no_cache: cli.no_cache,
            refresh: cli.refresh,
            nominal: cli.nominal,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Config file merged with flag and environment overrides, unvalidated
    pub fn merged_config(&self) -> Result<Config> {
        let mut config = Config::load_at(self.config_ref())?;
        config.apply(&self.overrides);
        Ok(config)
    }

    /// Merged and validated configuration
    pub fn load_config(&self) -> Result<Config> {
        let config = self.merged_config()?;
        config.validate()?;
        Ok(config)
    }

    /// Flag or environment format, else the config preference, else pretty
    pub fn resolve_format(&self, config: &Config) -> OutputFormat {
        self.format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(|f| OutputFormat::from_str(f, true).ok())
            })
            .unwrap_or_default()
    }

    /// Format for commands that do not load the config file
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}
