// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! modhost - load, inspect and configure plugins from the command line.

mod plugins;
mod resolve;
mod settings;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use modhost_config::{ConfigError, ModhostConfig};
use modhost_core::ModhostError;
use modhost_plugin::PluginManager;
use modhost_storage::SqliteEntityStore;

use crate::settings::SettingsAction;

/// modhost - plugin host for modular sites.
#[derive(Parser, Debug)]
#[command(name = "modhost", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load every plugin and list the active ones with their manifests.
    Plugins {
        /// Output JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Print the plugin a source or script path belongs to.
    Resolve {
        path: String,
        /// Match the path as a request entry script.
        #[arg(long)]
        entry_script: bool,
    },
    /// Read and write plugin settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

fn load_config(path: Option<&Path>) -> Result<ModhostConfig, Vec<ConfigError>> {
    match path {
        Some(path) => modhost_config::load_and_validate_path(path),
        None => modhost_config::load_and_validate(),
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("modhost={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Open the configured entity store and build a manager over it.
pub(crate) async fn open_manager(config: &ModhostConfig) -> Result<PluginManager, ModhostError> {
    let store = SqliteEntityStore::new(config.storage.clone());
    store.initialize().await?;
    PluginManager::builder(config.clone(), Arc::new(store)).build()
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            modhost_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.site.log_level);

    let result = match cli.command {
        Commands::Plugins { json } => plugins::run_plugins(&config, json, cli.plain).await,
        Commands::Resolve { path, entry_script } => {
            resolve::run_resolve(&config, &path, entry_script)
        }
        Commands::Settings { action } => settings::run_settings(&config, action, cli.plain).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("modhost: {e}");
            ExitCode::FAILURE
        }
    }
}
