// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # reflex CLI
//!
//! Matches free-text queries against a file of stored trigger/response
//! patterns, and maintains pattern strength through reinforcement and decay.
//!
//! ## Commands
//!
//! - `reflex match <QUERY>...` - Rank patterns against a query
//! - `reflex list` - List stored patterns
//! - `reflex reinforce <ID>` - Strengthen a pattern after use
//! - `reflex decay [<ID>]` - Apply time decay to one or all patterns
//! - `reflex config show|validate|generate` - Configuration management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use reflex_cortex::application::StandardPatternService;

use reflex_cli::commands::{
    self, ConfigCommand, DecayCommand, ListCommand, MatchCommand, ReinforceCommand,
};
use reflex_cli::config::ReflexConfig;
use reflex_cli::store::YamlPatternRepository;

/// reflex - pattern matching with reinforcement and decay
#[derive(Parser)]
#[command(name = "reflex")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "REFLEX_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Pattern file (overrides patterns_path from config)
    #[arg(short, long, global = true, env = "REFLEX_PATTERNS_PATH", value_name = "FILE")]
    patterns: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "REFLEX_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank stored patterns against a query
    #[command(name = "match")]
    Match {
        #[command(flatten)]
        command: MatchCommand,
    },

    /// List stored patterns
    #[command(name = "list")]
    List {
        #[command(flatten)]
        command: ListCommand,
    },

    /// Reinforce a pattern
    #[command(name = "reinforce")]
    Reinforce {
        #[command(flatten)]
        command: ReinforceCommand,
    },

    /// Apply time decay to one pattern, or to all of them
    #[command(name = "decay")]
    Decay {
        #[command(flatten)]
        command: DecayCommand,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Config { command } => {
            commands::config::handle_command(command, cli.config).await
        }
        Commands::Match { command } => {
            let (config, _, service) = open(cli.config, cli.patterns).await?;
            commands::search::execute(command, &config, &service).await
        }
        Commands::List { command } => {
            let (_, repo, _) = open(cli.config, cli.patterns).await?;
            commands::pattern::list(command, &*repo).await
        }
        Commands::Reinforce { command } => {
            let (_, _, service) = open(cli.config, cli.patterns).await?;
            commands::pattern::reinforce(command, &service).await
        }
        Commands::Decay { command } => {
            let (_, _, service) = open(cli.config, cli.patterns).await?;
            commands::pattern::decay(command, &service).await
        }
    }
}

/// Load and validate configuration, then open the pattern store.
async fn open(
    config_path: Option<PathBuf>,
    patterns: Option<PathBuf>,
) -> Result<(ReflexConfig, Arc<YamlPatternRepository>, StandardPatternService)> {
    let config = ReflexConfig::load_or_default(config_path).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    let (repo, service) = reflex_cli::open_service(&config, patterns).await?;
    Ok((config, repo, service))
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
