//! Command execution context
//!
//! Provides a unified context for view commands: configuration, the typed
//! store over the (cached) API client, and runtime options.

use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::CachedEducationClient;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{EducationApi, SchoolDataClient};
use crate::config::Config;
use crate::error::Result;
use crate::store::{EducationStore, StoreConfig};

/// Client used outside tests: HTTP behind the disk cache
pub type LiveClient = CachedEducationClient<SchoolDataClient>;

/// Context for command execution containing config, store, and runtime options.
pub struct CommandContext<C = LiveClient> {
    /// Loaded and validated configuration
    pub config: Config,
    /// Per-resource caches over the API client
    pub store: EducationStore<C>,
    /// Output format preference
    pub format: OutputFormat,
    /// Bypass cached entries and overwrite them
    pub refresh: bool,
    /// Skip inflation adjustment
    pub nominal: bool,
}

impl CommandContext<LiveClient> {
    /// Create a new command context with full initialization.
    ///
    /// This handles:
    /// - Loading config from path (or default location)
    /// - Applying flag and environment overrides, then validating
    /// - Creating the HTTP client with the caching wrapper (disabled by `--no-cache`)
    ///
    /// # Errors
    /// Returns error if config cannot be loaded or is invalid.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = opts.load_config()?;
        let format = opts.resolve_format(&config);

        let raw_client = SchoolDataClient::new(&config.api_base_url)?;
        let client = CachedEducationClient::new(raw_client, !opts.no_cache);

        Ok(Self::with_client(
            config,
            client,
            format,
            opts.refresh,
            opts.nominal,
        ))
    }
}

impl<C: EducationApi + 'static> CommandContext<C> {
    /// Build a context around any client implementation
    pub fn with_client(
        config: Config,
        client: C,
        format: OutputFormat,
        refresh: bool,
        nominal: bool,
    ) -> Self {
        Self {
            config,
            store: EducationStore::new(client, StoreConfig::default()),
            format,
            refresh,
            nominal,
        }
    }

    /// Target year for inflation adjustment, `None` with `--nominal`
    pub fn adjust_to(&self) -> Option<i32> {
        (!self.nominal).then_some(self.config.fiscal_year)
    }

    /// Await `fut` behind a spinner on stderr.
    ///
    /// The spinner is hidden for JSON output and when stderr is not a
    /// terminal, and cleared whether `fut` succeeds or fails.
    pub async fn with_spinner<T, F>(&self, message: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let spinner = self.spinner(message);
        let result = fut.await;
        spinner.finish_and_clear();
        result
    }

    fn spinner(&self, message: &str) -> ProgressBar {
        if self.format == OutputFormat::Json || !std::io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}
