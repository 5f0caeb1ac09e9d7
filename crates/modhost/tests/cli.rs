// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests driving the `modhost` binary against a temp site.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use modhost_test_utils::PluginTree;
use tempfile::TempDir;

struct Site {
    _tree: PluginTree,
    _data: TempDir,
    config: PathBuf,
}

fn site() -> Site {
    let tree = PluginTree::builder()
        .plugin(
            "thewire",
            "[manifest]\nauthor = \"Curverider\"\ndescription = \"Microblogging\"\nversion = \"1.0\"\n\n[settings]\nlimit = \"140\"\n",
        )
        .view("thewire", "forms/thewire/add.php", "<form/>")
        .plugin("blog", "")
        .build()
        .unwrap();
    let data = tempfile::tempdir().unwrap();
    let config = data.path().join("modhost.toml");
    std::fs::write(
        &config,
        format!(
            "[plugins]\npath = {:?}\n\n[storage]\ndatabase_path = {:?}\n",
            tree.path().display().to_string(),
            data.path().join("modhost.db").display().to_string(),
        ),
    )
    .unwrap();
    Site {
        _tree: tree,
        _data: data,
        config,
    }
}

fn modhost(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_modhost"))
        .arg("--config")
        .arg(config)
        .arg("--plain")
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn plugins_json_lists_loaded_plugins() {
    let site = site();
    let output = modhost(&site.config, &["plugins", "--json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let plugins = json["plugins"].as_array().unwrap();
    assert_eq!(plugins.len(), 2);
    assert_eq!(plugins[0]["name"], "blog");
    assert!(plugins[0]["manifest"].is_null());
    assert_eq!(plugins[1]["name"], "thewire");
    assert_eq!(plugins[1]["manifest"]["author"], "Curverider");
    assert_eq!(plugins[1]["views"], true);
}

#[test]
fn settings_roundtrip_through_the_database() {
    let site = site();

    let set = modhost(&site.config, &["settings", "set", "blog", "color", "blue"]);
    assert!(set.status.success());

    let get = modhost(&site.config, &["settings", "get", "blog", "color"]);
    assert!(get.status.success());
    assert_eq!(stdout(&get), "blue");

    let clear = modhost(&site.config, &["settings", "clear", "blog", "color"]);
    assert!(clear.status.success());
    let get = modhost(&site.config, &["settings", "get", "blog", "color"]);
    assert!(!get.status.success());
}

#[test]
fn title_cannot_be_set() {
    let site = site();
    let output = modhost(&site.config, &["settings", "set", "blog", "title", "x"]);
    assert!(!output.status.success());
}

#[test]
fn start_file_defaults_visible_after_plugins_run() {
    let site = site();
    assert!(modhost(&site.config, &["plugins"]).status.success());

    let list = modhost(&site.config, &["settings", "list", "thewire", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&list)).unwrap();
    assert_eq!(json["limit"], "140");
}

#[test]
fn resolve_prints_plugin_name() {
    let site = site();
    let found = modhost(&site.config, &["resolve", "/var/www/mod/thewire/start.php"]);
    assert!(found.status.success());
    assert_eq!(stdout(&found), "thewire");

    let missing = modhost(&site.config, &["resolve", "/var/www/index.php"]);
    assert!(!missing.status.success());
}

#[test]
fn invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("modhost.toml");
    std::fs::write(&config, "[plugins]\npaht = \"mod\"\n").unwrap();

    let output = modhost(&config, &["plugins"]);
    assert!(!output.status.success());
}
