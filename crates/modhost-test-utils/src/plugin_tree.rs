// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builder for temporary plugins roots.
//!
//! ```no_run
//! use modhost_test_utils::PluginTree;
//!
//! let tree = PluginTree::builder()
//!     .plugin("thewire", r#"[manifest]
//! author = "Curverider"
//! description = "Microblogging"
//! version = "1.0"
//! "#)
//!     .view("thewire", "forms/thewire/add.php", "<form/>")
//!     .build()
//!     .unwrap();
//! assert!(tree.path().join("thewire/start.toml").exists());
//! ```

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

enum Entry {
    Start { plugin: String, contents: String },
    Dir { relative: PathBuf },
    File { relative: PathBuf, contents: String },
}

/// Collects plugin directories and files before writing them to disk.
#[derive(Default)]
pub struct PluginTreeBuilder {
    entries: Vec<Entry>,
}

impl PluginTreeBuilder {
    /// Add a plugin directory with a `start.toml` bootstrap.
    pub fn plugin(mut self, name: &str, start_toml: &str) -> Self {
        self.entries.push(Entry::Start {
            plugin: name.to_string(),
            contents: start_toml.to_string(),
        });
        self
    }

    /// Add an empty directory (a plugin without a bootstrap, or any other dir).
    pub fn dir(mut self, relative: &str) -> Self {
        self.entries.push(Entry::Dir {
            relative: PathBuf::from(relative),
        });
        self
    }

    /// Add a file relative to the plugins root.
    pub fn file(mut self, relative: &str, contents: &str) -> Self {
        self.entries.push(Entry::File {
            relative: PathBuf::from(relative),
            contents: contents.to_string(),
        });
        self
    }

    /// Add a view file under `<plugin>/views/default/`.
    pub fn view(self, plugin: &str, view: &str, contents: &str) -> Self {
        self.file(&format!("{plugin}/views/default/{view}"), contents)
    }

    /// Add a language file `<plugin>/languages/<lang>.toml`.
    pub fn language(self, plugin: &str, lang: &str, contents: &str) -> Self {
        self.file(&format!("{plugin}/languages/{lang}.toml"), contents)
    }

    /// Write everything into a fresh temporary directory.
    pub fn build(self) -> io::Result<PluginTree> {
        let root = TempDir::new()?;
        for entry in self.entries {
            match entry {
                Entry::Start { plugin, contents } => {
                    let dir = root.path().join(plugin);
                    std::fs::create_dir_all(&dir)?;
                    std::fs::write(dir.join("start.toml"), contents)?;
                }
                Entry::Dir { relative } => {
                    std::fs::create_dir_all(root.path().join(relative))?;
                }
                Entry::File { relative, contents } => {
                    let path = root.path().join(relative);
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, contents)?;
                }
            }
        }
        Ok(PluginTree { root })
    }
}

/// A plugins root on disk, removed when dropped.
pub struct PluginTree {
    root: TempDir,
}

impl PluginTree {
    pub fn builder() -> PluginTreeBuilder {
        PluginTreeBuilder::default()
    }

    /// The plugins root directory.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path of one plugin's directory.
    pub fn plugin_dir(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }
}
