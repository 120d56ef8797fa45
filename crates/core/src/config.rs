//! Configuration module for the breadcrumb generator
//!
//! This module provides the user-visible label templates and the generator
//! settings, loadable from YAML or JSON files.

use chrono::Month;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Label templates; `{}` is replaced by the dynamic part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub error_404: String,
    pub posts_tagged: String,
    pub products_tagged: String,
    pub author: String,
    pub search_results: String,
    pub page: String,

    /// Month names, January first
    pub months: Vec<String>,
}

impl Default for Labels {
    fn default() -> Self {
        let months = (1..=12u8)
            .filter_map(|m| Month::try_from(m).ok())
            .map(|m| m.name().to_string())
            .collect();

        Self {
            error_404: "Error 404".to_string(),
            posts_tagged: "Posts tagged \u{201c}{}\u{201d}".to_string(),
            products_tagged: "Products tagged \u{201c}{}\u{201d}".to_string(),
            author: "Author: {}".to_string(),
            search_results: "Search results for \u{201c}{}\u{201d}".to_string(),
            page: "Page {}".to_string(),
            months,
        }
    }
}

impl Labels {
    /// Fill a template's placeholder
    pub fn format(template: &str, value: impl std::fmt::Display) -> String {
        template.replacen("{}", &value.to_string(), 1)
    }

    /// Localized name of a month (1-12); the number itself when unknown
    pub fn month_name(&self, month: u32) -> String {
        month
            .checked_sub(1)
            .and_then(|idx| self.months.get(idx as usize))
            .cloned()
            .unwrap_or_else(|| month.to_string())
    }
}

/// Configuration for the breadcrumb generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadcrumbConfig {
    /// User-visible label templates
    pub labels: Labels,

    /// Maximum number of parent pages followed for a static page
    pub max_parent_depth: usize,
}

impl Default for BreadcrumbConfig {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            max_parent_depth: 64,
        }
    }
}

impl BreadcrumbConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set labels (builder pattern)
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Set maximum parent depth (builder pattern)
    pub fn with_max_parent_depth(mut self, depth: usize) -> Self {
        self.max_parent_depth = depth;
        self
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&raw)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)?,
            other => {
                return Err(ConfigError::InvalidConfig(format!(
                    "unsupported config extension: {:?}",
                    other
                )))
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.labels.months.len() != 12 {
            return Err(ConfigError::InvalidConfig(format!(
                "expected 12 month names, got {}",
                self.labels.months.len()
            )));
        }
        if self.max_parent_depth == 0 {
            return Err(ConfigError::InvalidConfig(
                "max_parent_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_labels() {
        let labels = Labels::default();
        assert_eq!(labels.months.len(), 12);
        assert_eq!(labels.month_name(3), "March");
        assert_eq!(labels.month_name(13), "13");
        assert_eq!(labels.month_name(0), "0");
        assert_eq!(Labels::format(&labels.page, 2), "Page 2");
    }

    #[test]
    fn test_config_builder() {
        let config = BreadcrumbConfig::new().with_max_parent_depth(8);
        assert_eq!(config.max_parent_depth, 8);
        assert_eq!(config.labels, Labels::default());
    }

    #[test]
    fn test_load_partial_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("breadcrumbs.yaml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "labels:\n  error_404: Seite nicht gefunden\nmax_parent_depth: 4").unwrap();

        let config = BreadcrumbConfig::from_path(&path).unwrap();
        assert_eq!(config.labels.error_404, "Seite nicht gefunden");
        assert_eq!(config.labels.page, "Page {}");
        assert_eq!(config.max_parent_depth, 4);
    }

    #[test]
    fn test_reject_bad_months() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("breadcrumbs.json");
        fs::write(&path, r#"{"labels":{"months":["Jan"]}}"#).unwrap();

        let err = BreadcrumbConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn test_reject_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("breadcrumbs.toml");
        fs::write(&path, "").unwrap();

        assert!(BreadcrumbConfig::from_path(&path).is_err());
    }
}
