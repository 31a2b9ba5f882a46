//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod academic;
pub mod args;
pub mod cache;
pub mod class_size;
pub mod config;
pub mod context;
pub mod efa;
pub mod enrollment;
pub mod entity;
pub mod finance;
pub mod list;
pub mod outcomes;
pub mod overview;
pub mod safety;
pub mod staff;
pub mod view;

use args::{AcademicArgs, ListArgs};
pub use args::OutputFormat;
pub use context::CommandContext;

use crate::client::models::SafetyCategory;

/// nhschools - New Hampshire public school statistics from the command line
#[derive(Parser, Debug)]
#[command(name = "nhschools")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json) [default: pretty]
    #[arg(
        long,
        global = true,
        env = "NHSCHOOLS_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "NHSCHOOLS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true, env = "NHSCHOOLS_API_BASE_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Latest year of financial trends and target year of inflation adjustment
    #[arg(long, global = true, env = "NHSCHOOLS_FISCAL_YEAR", hide_env = true)]
    pub fiscal_year: Option<i32>,

    /// First year of financial trends
    #[arg(long, global = true, env = "NHSCHOOLS_FISCAL_START_YEAR", hide_env = true)]
    pub fiscal_start_year: Option<i32>,

    /// Grade whose enrollment post-graduation plans are measured against
    #[arg(long, global = true, env = "NHSCHOOLS_GRADUATION_GRADE", hide_env = true)]
    pub graduation_grade: Option<u32>,

    /// Enable debug logging
    #[arg(long, global = true, env = "NHSCHOOLS_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "NHSCHOOLS_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Fetch fresh data and overwrite cached responses
    #[arg(long, global = true)]
    pub refresh: bool,

    /// Show dollar amounts as published, without inflation adjustment
    #[arg(long, global = true)]
    pub nominal: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// District listings and views
    #[command(subcommand)]
    District(EntityCommands),

    /// School listings and views
    #[command(subcommand)]
    School(EntityCommands),

    /// Statewide views
    #[command(subcommand)]
    State(StateCommands),

    /// Manage local response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   nhschools completion bash > /etc/bash_completion.d/nhschools
  zsh:    nhschools completion zsh > \"${fpath[1]}/_nhschools\"
  fish:   nhschools completion fish > ~/.config/fish/completions/nhschools.fish

Re-generate completions after upgrading nhschools.")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Display version information
    Version,
}

/// Views of one district or school, selected by id
#[derive(Subcommand, Debug)]
pub enum EntityCommands {
    /// List entries, ordered by name
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Identity, enrollment and latest measurements
    Overview {
        /// District or school id
        id: u32,
    },

    /// Assessment proficiency trend and rank among peers
    #[command(after_help = "EXAMPLES:\n  \
            nhschools district academic 5                     # First subject, all students\n  \
            nhschools district academic 5 ELA --subgroup Female\n  \
            nhschools school academic 41 Math --grade 3")]
    Academic {
        /// District or school id
        id: u32,

        #[command(flatten)]
        args: AcademicArgs,
    },

    /// Safety incidents per 100 students
    Safety {
        /// District or school id
        id: u32,

        /// Incident category (all categories when omitted)
        #[arg(value_enum)]
        category: Option<SafetyCategory>,
    },

    /// Expenditures, revenues and per-pupil spending
    Finance {
        /// District id
        id: u32,
    },

    /// Education Freedom Account grants in the district's towns
    Efa {
        /// District id
        id: u32,
    },

    /// Enrollment by year and grade
    Enrollment {
        /// District or school id
        id: u32,
    },

    /// Graduation rates and post-graduation plans
    Outcomes {
        /// District or school id
        id: u32,
    },

    /// Teachers, salaries and students per teacher
    Staff {
        /// District or school id
        id: u32,
    },

    /// Average class size by grade band
    ClassSize {
        /// District or school id
        id: u32,
    },
}

/// Statewide views
#[derive(Subcommand, Debug)]
pub enum StateCommands {
    /// Assessment proficiency trend
    Academic(AcademicArgs),

    /// Safety incidents per 100 students
    Safety {
        /// Incident category (all categories when omitted)
        #[arg(value_enum)]
        category: Option<SafetyCategory>,
    },

    /// Expenditures, revenues and per-pupil spending
    Finance,

    /// Education Freedom Account grants across all towns
    Efa,

    /// Enrollment by year and grade
    Enrollment,

    /// Graduation rates and post-graduation plans
    Outcomes,

    /// Teachers, salaries and students per teacher
    Staff,

    /// Average class size by grade band
    ClassSize,
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Clear cached data
    Clear {
        /// Only entries whose endpoint starts with this prefix, e.g. "assessments"
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Print cache directory path
    Path,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
}
