// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `modhost resolve` command implementation.

use std::process::ExitCode;

use modhost_config::{ModhostConfig, ResolutionMode};
use modhost_core::ModhostError;
use modhost_plugin::IdentityResolver;

fn resolve_path(
    config: &ModhostConfig,
    path: &str,
    entry_script: bool,
) -> Result<Option<String>, ModhostError> {
    let resolver = IdentityResolver::new(&config.plugins.dir_segment)?;
    let mode = if entry_script {
        ResolutionMode::EntryScript
    } else {
        config.plugins.resolution
    };
    Ok(resolver.resolve(path, mode))
}

/// Print the plugin `path` belongs to; exit non-zero when there is none.
pub fn run_resolve(
    config: &ModhostConfig,
    path: &str,
    entry_script: bool,
) -> Result<ExitCode, ModhostError> {
    match resolve_path(config, path, entry_script)? {
        Some(plugin) => {
            println!("{plugin}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("modhost: no plugin found for {path}");
            Ok(ExitCode::FAILURE)
        }
    }
}
