// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config diagnostics.
//!
//! Each figment error becomes one [`ConfigError`]. Unknown keys are pointed
//! at in the offending file and come with the closest valid key, picked by
//! Jaro-Winkler similarity.

// The miette derive expands to assignments rustc reports as unused.
#![allow(unused_assignments)]

use std::io::IsTerminal;

use figment::error::Kind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Similarity a valid key must beat to be offered as a correction.
const MIN_SIMILARITY: f64 = 0.75;

/// One problem found while loading or validating modhost configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("`{key}` is not a modhost setting")]
    #[diagnostic(
        code(modhost::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("unknown key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: {detail}")]
    #[diagnostic(code(modhost::config::invalid_type), help("use a {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    #[error("`{key}` has an unsupported value: {detail}")]
    #[diagnostic(code(modhost::config::invalid_value))]
    InvalidValue { key: String, detail: String },

    #[error("`{key}` must be set")]
    #[diagnostic(
        code(modhost::config::missing_key),
        help("set `{key}` in modhost.toml or through a MODHOST_* variable")
    )]
    MissingKey { key: String },

    /// A value that parsed but makes no sense (see `validation`).
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(modhost::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(modhost::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(closest) => format!("perhaps `{closest}`? (allowed here: {valid_keys})"),
        None => format!("allowed here: {valid_keys}"),
    }
}

impl ConfigError {
    fn from_figment(error: figment::error::Error, sources: &[(String, String)]) -> Self {
        let dotted = error.path.join(".");
        match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (span, src) = locate(&error, field, sources).unzip();
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, *expected),
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.to_string(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: dotted,
                detail: format!("got {actual}"),
                expected: expected.clone(),
            },
            Kind::UnknownVariant(variant, allowed) => ConfigError::InvalidValue {
                key: dotted,
                detail: format!("`{variant}` (choose one of {})", allowed.join(", ")),
            },
            _ => ConfigError::Other(error.to_string()),
        }
    }
}

/// Turn a (possibly multi-error) `figment::Error` into diagnostics.
///
/// `sources` pairs a file name with its contents and is only used to point
/// at unknown keys.
pub fn figment_to_config_errors(
    err: figment::Error,
    sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| ConfigError::from_figment(error, sources))
        .collect()
}

/// Span and named source of `field` in the file the error came from.
fn locate(
    error: &figment::error::Error,
    field: &str,
    sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let origin = error.metadata.as_ref().and_then(|m| match &m.source {
        Some(figment::Source::File(path)) => Some(path.display().to_string()),
        _ => None,
    });
    let (name, content) = match origin {
        Some(path) => sources.iter().find(|(name, _)| *name == path)?,
        // Inline strings have no path; a single source must be it.
        None => match sources {
            [only] => only,
            _ => return None,
        },
    };

    let offset = find_key_offset(content, &error.path, field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(name, content.clone()),
    ))
}

/// Byte offset of `field` inside the table named by `path`.
///
/// Lines are scanned while tracking the current `[table]` header, so a key
/// with the same name in another table is never matched. An empty `path`
/// means the top level, before any header.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let wanted = path.join(".");
    let mut table = String::new();
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        let text = line.trim();
        if let Some(header) = text.strip_prefix('[') {
            table = header
                .split(']')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            continue;
        }
        if table != wanted {
            continue;
        }
        let Some((key, _)) = text.split_once('=') else {
            continue;
        };
        if key.trim() == field {
            let indent = line.len() - line.trim_start().len();
            return Some(start + indent);
        }
    }

    None
}

/// The valid key most similar to `unknown`, if any is similar enough.
pub fn suggest_key<S: AsRef<str>>(unknown: &str, valid_keys: &[S]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (key.as_ref(), strsim::jaro_winkler(unknown, key.as_ref())))
        .filter(|(_, score)| *score > MIN_SIMILARITY)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(key, _)| key.to_string())
}

/// Print every error to stderr as a miette report.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::{GraphicalReportHandler, GraphicalTheme};

    let theme = if std::io::stderr().is_terminal() {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme);

    for error in errors {
        let mut out = String::new();
        match handler.render_report(&mut out, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{out}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}
