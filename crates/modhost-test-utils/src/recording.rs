// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registrars that record every call for later assertions.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use modhost_core::{ModhostError, TranslationRegistrar, ViewRegistrar};

/// One recorded `register_views` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRegistration {
    pub prefix: String,
    pub views_path: PathBuf,
    pub base_path: PathBuf,
}

/// [`ViewRegistrar`] that records its calls.
#[derive(Debug, Default)]
pub struct RecordingViews {
    calls: Mutex<Vec<ViewRegistration>>,
}

impl RecordingViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls so far, in order.
    pub fn calls(&self) -> Vec<ViewRegistration> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ViewRegistrar for RecordingViews {
    fn register_views(
        &self,
        prefix: &str,
        views_path: &Path,
        base_path: &Path,
    ) -> Result<(), ModhostError> {
        let mut calls = self
            .calls
            .lock()
            .map_err(|_| ModhostError::Internal("recording lock poisoned".into()))?;
        calls.push(ViewRegistration {
            prefix: prefix.to_string(),
            views_path: views_path.to_path_buf(),
            base_path: base_path.to_path_buf(),
        });
        Ok(())
    }
}

/// [`TranslationRegistrar`] that records the directories it receives.
#[derive(Debug, Default)]
pub struct RecordingTranslations {
    calls: Mutex<Vec<PathBuf>>,
}

impl RecordingTranslations {
    pub fn new() -> Self {
        Self::default()
    }

    /// All registered language directories, in order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl TranslationRegistrar for RecordingTranslations {
    fn register_translations(&self, languages_path: &Path) -> Result<(), ModhostError> {
        let mut calls = self
            .calls
            .lock()
            .map_err(|_| ModhostError::Internal("recording lock poisoned".into()))?;
        calls.push(languages_path.to_path_buf());
        Ok(())
    }
}
