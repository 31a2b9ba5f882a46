//! Configuration management for nhschools
//!
//! Precedence: CLI flag > environment variable > config file > default.
//! Flags and environment variables are both parsed by clap and arrive here
//! as [`ConfigOverrides`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::finance::{CPI_FIRST_YEAR, CPI_LAST_YEAR};
use crate::error::{ConfigError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_FISCAL_YEAR: i32 = 2024;
pub const DEFAULT_FISCAL_START_YEAR: i32 = 2016;
pub const DEFAULT_GRADUATION_GRADE: u32 = 12;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the school statistics API
    pub api_base_url: String,

    /// Reporting year for financial and assessment data
    pub fiscal_year: i32,

    /// First year shown in financial trends
    pub fiscal_start_year: i32,

    /// Grade whose enrollment is the graduating class
    pub graduation_grade: u32,

    /// User preferences
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format (pretty, table, json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            fiscal_year: DEFAULT_FISCAL_YEAR,
            fiscal_start_year: DEFAULT_FISCAL_START_YEAR,
            graduation_grade: DEFAULT_GRADUATION_GRADE,
            preferences: Preferences::default(),
        }
    }
}

/// Values from flags or environment that replace file settings
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub fiscal_year: Option<i32>,
    pub fiscal_start_year: Option<i32>,
    pub graduation_grade: Option<u32>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".nhschools").join("config.yaml"))
    }

    /// Path in use: the explicit one, else the default
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => {
                let path = Path::new(p);
                if !path.exists() {
                    return Err(ConfigError::Invalid(format!(
                        "Config file not found: {}",
                        path.display()
                    ))
                    .into());
                }
                Self::load_from(path)
            }
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    log::debug!("No config file at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Replace file settings with any override that is set
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref url) = overrides.api_base_url {
            self.api_base_url = url.clone();
        }
        if let Some(year) = overrides.fiscal_year {
            self.fiscal_year = year;
        }
        if let Some(year) = overrides.fiscal_start_year {
            self.fiscal_start_year = year;
        }
        if let Some(grade) = overrides.graduation_grade {
            self.graduation_grade = grade;
        }
    }

    /// Check the settings are usable together
    pub fn validate(&self) -> Result<()> {
        let url_ok = reqwest::Url::parse(&self.api_base_url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !url_ok {
            return Err(ConfigError::InvalidBaseUrl(self.api_base_url.clone()).into());
        }

        for (name, year) in [
            ("fiscal_year", self.fiscal_year),
            ("fiscal_start_year", self.fiscal_start_year),
        ] {
            if !(CPI_FIRST_YEAR..=CPI_LAST_YEAR).contains(&year) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be between {} and {}, got {}",
                    name, CPI_FIRST_YEAR, CPI_LAST_YEAR, year
                ))
                .into());
            }
        }

        if self.fiscal_start_year > self.fiscal_year {
            return Err(ConfigError::Invalid(format!(
                "fiscal_start_year ({}) is after fiscal_year ({})",
                self.fiscal_start_year, self.fiscal_year
            ))
            .into());
        }

        if !(1..=12).contains(&self.graduation_grade) {
            return Err(ConfigError::Invalid(format!(
                "graduation_grade must be between 1 and 12, got {}",
                self.graduation_grade
            ))
            .into());
        }

        Ok(())
    }

    /// Years covered by financial trends
    pub fn fiscal_years(&self) -> std::ops::RangeInclusive<i32> {
        self.fiscal_start_year..=self.fiscal_year
    }
}
