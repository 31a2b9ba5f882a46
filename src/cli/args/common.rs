//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting (global default)
    #[default]
    Pretty,
    /// Table format - plain tables without styling
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}
