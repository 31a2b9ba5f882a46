//! nhschools - New Hampshire public school statistics from the command line

use std::io;

use clap::{CommandFactory, Parser};
use env_logger::Env;

mod cache;
mod cli;
mod client;
mod config;
mod data;
mod error;
mod models;
mod output;
mod store;

use cli::args::GlobalOptions;
use cli::{CacheCommands, Cli, Commands, ConfigCommands};
use client::Level;
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);
    log::debug!("Running {:?}", cli.command);

    match cli.command {
        Commands::District(command) => cli::view::run_entity(&opts, Level::District, command).await,
        Commands::School(command) => cli::view::run_entity(&opts, Level::School, command).await,
        Commands::State(command) => cli::view::run_state(&opts, command).await,
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Status => cli::cache::status(opts.output_format()),
            CacheCommands::Clear { endpoint } => {
                cli::cache::clear(opts.output_format(), endpoint.as_deref())
            }
            CacheCommands::Path => cli::cache::path(),
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => cli::config::show(&opts),
            ConfigCommands::Path => cli::config::path(&opts),
        },
        Commands::Completion { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "nhschools", &mut io::stdout());
            Ok(())
        }
        Commands::Version => {
            println!("nhschools version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
