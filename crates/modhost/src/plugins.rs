// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `modhost plugins` command implementation.
//!
//! Boots a plugin manager against the configured store and plugins root,
//! then prints each active plugin with its manifest. Plugins skipped under
//! `on_load_error = "skip"` are listed separately.

use std::io::IsTerminal;
use std::process::ExitCode;

use modhost_config::ModhostConfig;
use modhost_core::ModhostError;
use modhost_plugin::{LoadReport, Manifest};
use serde::Serialize;

use crate::open_manager;

/// One active plugin in `--json` output.
#[derive(Debug, Serialize)]
pub struct PluginListing {
    pub name: String,
    pub path: String,
    pub manifest: Option<Manifest>,
    pub views: bool,
    pub translations: bool,
}

/// A plugin that failed to load.
#[derive(Debug, Serialize)]
pub struct FailedPlugin {
    pub name: String,
    pub reason: String,
}

/// Structured output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct PluginsResponse {
    pub plugins: Vec<PluginListing>,
    pub failed: Vec<FailedPlugin>,
}

fn build_response(report: LoadReport, manifests: &[(String, Manifest)]) -> PluginsResponse {
    let plugins = report
        .loaded
        .into_iter()
        .map(|descriptor| PluginListing {
            manifest: manifests
                .iter()
                .find(|(name, _)| *name == descriptor.name)
                .map(|(_, manifest)| manifest.clone()),
            path: descriptor.path.display().to_string(),
            name: descriptor.name,
            views: descriptor.has_views,
            translations: descriptor.has_translations,
        })
        .collect();
    let failed = report
        .failed
        .into_iter()
        .map(|(name, reason)| FailedPlugin { name, reason })
        .collect();
    PluginsResponse { plugins, failed }
}

/// Run the `modhost plugins` command.
pub async fn run_plugins(
    config: &ModhostConfig,
    json: bool,
    plain: bool,
) -> Result<ExitCode, ModhostError> {
    let manager = open_manager(config).await?;
    let report = manager.boot().await?;
    let manifests = manager.manifests().await;
    manager.shutdown().await?;

    let response = build_response(report, &manifests);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_plugins(&config.plugins.path, &response, use_color);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_plugins(root: &str, response: &PluginsResponse, use_color: bool) {
    println!();
    println!("  modhost plugins ({root})");
    println!("  {}", "-".repeat(35));

    if response.plugins.is_empty() && response.failed.is_empty() {
        println!("    no plugins found");
    }

    for plugin in &response.plugins {
        let summary = match &plugin.manifest {
            Some(m) => format!("{} by {} - {}", m.version, m.author, m.description),
            None => "no manifest".to_string(),
        };
        if use_color {
            use colored::Colorize;
            println!("    {} {:<16} {}", "✓".green(), plugin.name.bold(), summary);
        } else {
            println!("    [OK]   {:<16} {}", plugin.name, summary);
        }
    }

    for failed in &response.failed {
        if use_color {
            use colored::Colorize;
            println!("    {} {:<16} {}", "✗".red(), failed.name.bold(), failed.reason.red());
        } else {
            println!("    [FAIL] {:<16} {}", failed.name, failed.reason);
        }
    }

    println!();
}
