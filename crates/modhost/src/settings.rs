// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `modhost settings` command implementation.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Subcommand;
use modhost_config::ModhostConfig;
use modhost_core::ModhostError;
use modhost_plugin::PluginSettings;

use crate::open_manager;

/// Settings subcommands.
#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print one setting.
    Get { plugin: String, key: String },
    /// Set one setting, creating the plugin's settings record if needed.
    Set {
        plugin: String,
        key: String,
        value: String,
    },
    /// Remove one setting.
    Clear { plugin: String, key: String },
    /// Print every setting of a plugin.
    List {
        plugin: String,
        /// Output JSON for scripting.
        #[arg(long)]
        json: bool,
    },
}

/// Execute `action` against `settings`, printing results.
///
/// Returns `false` when the command found nothing or was refused.
async fn apply(
    settings: &PluginSettings,
    action: SettingsAction,
    use_color: bool,
) -> Result<bool, ModhostError> {
    match action {
        SettingsAction::Get { plugin, key } => match settings.get(&plugin, &key).await? {
            Some(value) => {
                println!("{value}");
                Ok(true)
            }
            None => {
                eprintln!("modhost: {plugin} has no setting `{key}`");
                Ok(false)
            }
        },
        SettingsAction::Set { plugin, key, value } => {
            if settings.set(&plugin, &key, &value).await? {
                Ok(true)
            } else {
                eprintln!("modhost: `{key}` cannot be set for `{plugin}`");
                Ok(false)
            }
        }
        SettingsAction::Clear { plugin, key } => {
            if !settings.clear(&plugin, &key).await? {
                eprintln!("modhost: `{key}` is not set for `{plugin}`");
            }
            Ok(true)
        }
        SettingsAction::List { plugin, json } => {
            let all = settings.all(&plugin).await?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&all).unwrap_or_else(|_| "{}".to_string())
                );
            } else if use_color {
                use colored::Colorize;
                for (key, value) in &all {
                    println!("{} = {}", key.bold(), value);
                }
            } else {
                for (key, value) in &all {
                    println!("{key} = {value}");
                }
            }
            Ok(true)
        }
    }
}

/// Run a `modhost settings` subcommand.
pub async fn run_settings(
    config: &ModhostConfig,
    action: SettingsAction,
    plain: bool,
) -> Result<ExitCode, ModhostError> {
    let manager = open_manager(config).await?;
    manager.init().await?;

    let use_color = !plain && std::io::stdout().is_terminal();
    let ok = apply(manager.settings(), action, use_color).await?;
    manager.shutdown().await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use modhost_plugin::run_init_hook;
    use modhost_test_utils::MemoryEntityStore;

    async fn settings() -> PluginSettings {
        let store = Arc::new(MemoryEntityStore::new());
        run_init_hook(store.as_ref()).await.unwrap();
        PluginSettings::new(store)
    }

    #[tokio::test]
    async fn set_then_get_succeeds() {
        let settings = settings().await;
        let set = SettingsAction::Set {
            plugin: "thewire".into(),
            key: "limit".into(),
            value: "140".into(),
        };
        assert!(apply(&settings, set, false).await.unwrap());
        assert_eq!(
            settings.get("thewire", "limit").await.unwrap().as_deref(),
            Some("140")
        );

        let get = SettingsAction::Get {
            plugin: "thewire".into(),
            key: "limit".into(),
        };
        assert!(apply(&settings, get, false).await.unwrap());
    }

    #[tokio::test]
    async fn reserved_key_fails() {
        let settings = settings().await;
        let set = SettingsAction::Set {
            plugin: "thewire".into(),
            key: "title".into(),
            value: "x".into(),
        };
        assert!(!apply(&settings, set, false).await.unwrap());
        assert!(settings.find("thewire").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_setting_fails() {
        let settings = settings().await;
        let get = SettingsAction::Get {
            plugin: "thewire".into(),
            key: "limit".into(),
        };
        assert!(!apply(&settings, get, false).await.unwrap());
    }

    #[tokio::test]
    async fn clear_removes_setting() {
        let settings = settings().await;
        settings.set("blog", "color", "blue").await.unwrap();
        let clear = SettingsAction::Clear {
            plugin: "blog".into(),
            key: "color".into(),
        };
        assert!(apply(&settings, clear, false).await.unwrap());
        assert!(settings.get("blog", "color").await.unwrap().is_none());
    }
}
