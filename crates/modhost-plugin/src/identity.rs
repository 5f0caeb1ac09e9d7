// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin identity resolution from source or entry-script paths.
//!
//! Plugins live at `<segment>/<plugin>/` where `<segment>` is the plugins
//! directory name (`mod` by default). Two modes are supported:
//!
//! - **call site**: given source paths ordered newest-to-outward, the first
//!   one ending in `<segment>/<plugin>/start.<ext>` names the plugin;
//! - **entry script**: the request's entry script names the plugin if it
//!   contains `<segment>/<plugin>/` anywhere.
//!
//! Plugin-scoped APIs take an explicit [`PluginContext`](crate::PluginContext);
//! the resolver is only needed where a path is all the caller has.

use modhost_config::ResolutionMode;
use modhost_core::ModhostError;
use regex::Regex;

/// Normalize separators: backslashes become `/` and runs of `/` collapse to one.
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Matches plugin paths under a configurable plugins directory segment.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    segment: String,
    start_pattern: Regex,
    entry_pattern: Regex,
}

impl IdentityResolver {
    /// Build a resolver for plugins under `segment` (e.g. `"mod"`).
    pub fn new(segment: &str) -> Result<Self, ModhostError> {
        let escaped = regex::escape(segment);
        let start_pattern = Regex::new(&format!(
            r"(?:^|/){escaped}/([A-Za-z0-9_-]+)/start\.[A-Za-z0-9]+$"
        ))
        .map_err(|e| ModhostError::Config(format!("invalid plugin dir segment `{segment}`: {e}")))?;
        let entry_pattern = Regex::new(&format!(r"(?:^|/){escaped}/([A-Za-z0-9_-]+)/"))
            .map_err(|e| {
                ModhostError::Config(format!("invalid plugin dir segment `{segment}`: {e}"))
            })?;

        Ok(Self {
            segment: segment.to_string(),
            start_pattern,
            entry_pattern,
        })
    }

    /// The plugins directory segment this resolver matches.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Plugin name of a single bootstrap source path, if it is one.
    pub fn plugin_of_source(&self, path: &str) -> Option<String> {
        let path = normalize_path(path);
        self.start_pattern
            .captures(&path)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// First plugin found walking `frames` newest-to-outward.
    pub fn resolve_call_site<'a, I>(&self, frames: I) -> Option<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        frames
            .into_iter()
            .find_map(|frame| self.plugin_of_source(frame))
    }

    /// Plugin that owns the request's entry script, if any.
    pub fn resolve_entry_script(&self, script_path: &str) -> Option<String> {
        let path = normalize_path(script_path);
        self.entry_pattern
            .captures(&path)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Resolve a single path with the given mode.
    pub fn resolve(&self, path: &str, mode: ResolutionMode) -> Option<String> {
        match mode {
            ResolutionMode::CallSite => self.plugin_of_source(path),
            ResolutionMode::EntryScript => self.resolve_entry_script(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn resolver() -> IdentityResolver {
        IdentityResolver::new("mod").unwrap()
    }

    #[test]
    fn normalize_converts_backslashes_and_collapses() {
        assert_eq!(
            normalize_path(r"C:\www\\mod\thewire\start.php"),
            "C:/www/mod/thewire/start.php"
        );
        assert_eq!(normalize_path("/var//www///mod/x"), "/var/www/mod/x");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn call_site_resolves_start_file() {
        let r = resolver();
        assert_eq!(
            r.plugin_of_source("/var/www/mod/thewire/start.php").as_deref(),
            Some("thewire")
        );
        assert_eq!(
            r.plugin_of_source("mod/blog/start.toml").as_deref(),
            Some("blog")
        );
    }

    #[test]
    fn call_site_rejects_non_start_files() {
        let r = resolver();
        assert_eq!(r.plugin_of_source("/var/www/mod/thewire/views/add.php"), None);
        assert_eq!(r.plugin_of_source("/var/www/engine/start.php"), None);
        assert_eq!(r.plugin_of_source("/var/www/mod/start.php"), None);
        assert_eq!(r.plugin_of_source("/var/www/mymod/thewire/start.php"), None);
    }

    #[test]
    fn call_site_takes_newest_matching_frame() {
        let r = resolver();
        let frames = [
            "/var/www/engine/lib/plugins.php",
            "/var/www/mod/groups/start.php",
            "/var/www/mod/thewire/start.php",
        ];
        assert_eq!(r.resolve_call_site(frames).as_deref(), Some("groups"));
        assert_eq!(r.resolve_call_site(["/var/www/index.php"]), None);
        assert_eq!(r.resolve_call_site(Vec::<&str>::new()), None);
    }

    #[test]
    fn windows_paths_are_normalized_before_matching() {
        let r = resolver();
        assert_eq!(
            r.plugin_of_source(r"C:\inetpub\\mod\thewire\start.php").as_deref(),
            Some("thewire")
        );
    }

    #[test]
    fn entry_script_matches_any_file_under_plugin() {
        let r = resolver();
        assert_eq!(
            r.resolve_entry_script("/mod/thewire/everyone.php").as_deref(),
            Some("thewire")
        );
        assert_eq!(
            r.resolve_entry_script("/pg//mod/blog/actions/save.php").as_deref(),
            Some("blog")
        );
        assert_eq!(r.resolve_entry_script("/index.php"), None);
        assert_eq!(r.resolve_entry_script("/mod/thewire"), None);
    }

    #[test]
    fn resolve_dispatches_on_mode() {
        let r = resolver();
        let path = "/var/www/mod/thewire/start.php";
        assert_eq!(r.resolve(path, ResolutionMode::CallSite).as_deref(), Some("thewire"));
        assert_eq!(
            r.resolve("/mod/thewire/index.php", ResolutionMode::CallSite),
            None
        );
        assert_eq!(
            r.resolve("/mod/thewire/index.php", ResolutionMode::EntryScript)
                .as_deref(),
            Some("thewire")
        );
    }

    #[test]
    fn custom_segment_is_escaped() {
        let r = IdentityResolver::new("plugins.d").unwrap();
        assert_eq!(r.segment(), "plugins.d");
        assert_eq!(
            r.plugin_of_source("/srv/plugins.d/thewire/start.toml").as_deref(),
            Some("thewire")
        );
        assert_eq!(r.plugin_of_source("/srv/pluginsXd/thewire/start.toml"), None);
    }

    proptest! {
        #[test]
        fn any_valid_name_round_trips(
            name in "[A-Za-z0-9_-]{1,24}",
            prefix in "(/[a-l]{1,8}){0,4}",
            ext in "[a-z]{1,4}",
        ) {
            let r = resolver();
            let path = format!("{prefix}/mod/{name}/start.{ext}");
            prop_assert_eq!(r.plugin_of_source(&path), Some(name.clone()));
            prop_assert_eq!(r.resolve_entry_script(&path), Some(name));
        }

        #[test]
        fn normalize_is_idempotent(path in r"[a-z/\\]{0,32}") {
            let once = normalize_path(&path);
            prop_assert_eq!(normalize_path(&once), once.clone());
            prop_assert!(!once.contains("//"));
            prop_assert!(!once.contains('\\'));
        }
    }
}
