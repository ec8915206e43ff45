//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use std::path::Path;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, DirectoryStore, HttpStore, ProductStore};

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Counts characters, not bytes, so accented product names are safe.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Format a price in cents as `R$ 1.234,56`, or `-` when unknown
pub fn format_cents(cents: Option<i64>) -> String {
    let Some(cents) = cents else {
        return "-".to_string();
    };

    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = (abs / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{}R$ {},{:02}", sign, grouped, abs % 100)
}

/// Resolve `auto` against the configured default format
pub fn resolve_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }
    config
        .default_format
        .as_deref()
        .and_then(|s| OutputFormat::from_str(s, true).ok())
        .unwrap_or(OutputFormat::Auto)
}

/// Store receiving created products
///
/// `--out-dir` selects a local directory; otherwise the records API from
/// the configuration is used and its settings must be complete.
pub fn open_store(out_dir: Option<&Path>, config: &Config) -> Result<Box<dyn ProductStore>> {
    if let Some(dir) = out_dir {
        let store = DirectoryStore::new(dir).into_diagnostic()?;
        return Ok(Box::new(store));
    }

    let settings = config.store_settings().into_diagnostic()?;
    let store = HttpStore::new(&settings.url, &settings.table, &settings.token).into_diagnostic()?;
    Ok(Box::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("Máscara de Cílios", 10), "Máscara...");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("with\nnewline"), "\"with\nnewline\"");
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(Some(3990)), "R$ 39,90");
        assert_eq!(format_cents(Some(5)), "R$ 0,05");
        assert_eq!(format_cents(Some(123456789)), "R$ 1.234.567,89");
        assert_eq!(format_cents(None), "-");
    }

    #[test]
    fn test_resolve_format() {
        let global = GlobalOpts {
            format: OutputFormat::Auto,
            quiet: false,
            verbose: false,
        };
        let config = Config {
            default_format: Some("JSON".into()),
            ..Config::default()
        };
        assert_eq!(resolve_format(&global, &config), OutputFormat::Json);
        assert_eq!(resolve_format(&global, &Config::default()), OutputFormat::Auto);

        let explicit = GlobalOpts {
            format: OutputFormat::Csv,
            ..global
        };
        assert_eq!(resolve_format(&explicit, &config), OutputFormat::Csv);
    }

    #[test]
    fn test_open_store_requires_settings() {
        assert!(open_store(None, &Config::default()).is_err());

        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        assert!(open_store(Some(&out), &Config::default()).is_ok());
        assert!(out.is_dir());
    }
}
