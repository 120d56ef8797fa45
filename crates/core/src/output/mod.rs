//! Output formatting module
//!
//! This module provides formatters for JSON, YAML, ANSI and plain summary
//! output of single trails and batch reports.

pub mod ansi;
mod json;
mod yaml;

pub use ansi::{format_batch_ansi, format_breadcrumb_ansi};
pub use json::format_json;
pub use yaml::format_yaml;

use crate::models::{BatchReport, Breadcrumb};
use serde::Serialize;
use thiserror::Error;

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format
    #[default]
    Json,
    /// YAML format
    Yaml,
    /// ANSI colored text
    Ansi,
    /// Plain text summary
    Summary,
}

/// Format a single trail in the specified format
pub fn format_output(data: &Breadcrumb, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(data),
        OutputFormat::Yaml => format_yaml(data),
        OutputFormat::Ansi => Ok(format_breadcrumb_ansi(data)),
        OutputFormat::Summary => Ok(format_summary(data)),
    }
}

/// Format a batch report in the specified format
pub fn format_batch(data: &BatchReport, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(data),
        OutputFormat::Yaml => format_yaml(data),
        OutputFormat::Ansi => Ok(format_batch_ansi(data)),
        OutputFormat::Summary => Ok(format_batch_summary(data)),
    }
}

/// Format any serializable value in a structured format; text formats fall back to JSON
pub fn format_value<T: Serialize>(data: &T, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Yaml => format_yaml(data),
        _ => format_json(data),
    }
}

/// Format as plain text, one crumb per line
fn format_summary(data: &Breadcrumb) -> String {
    let mut output = String::new();

    match data.kind {
        Some(kind) => output.push_str(&format!("Page kind: {}\n", kind.label())),
        None => output.push_str("Page kind: (none)\n"),
    }
    output.push_str(&format!("Crumbs: {}\n", data.depth()));

    if data.is_empty() {
        return output;
    }

    output.push_str(&format!("Path: {}\n\n", data.path()));
    for (idx, crumb) in data.crumbs.iter().enumerate() {
        if crumb.is_linked() {
            output.push_str(&format!("{}. {} <{}>\n", idx + 1, crumb.label, crumb.link));
        } else {
            output.push_str(&format!("{}. {}\n", idx + 1, crumb.label));
        }
    }

    output
}

/// Format a batch report as plain text summary
fn format_batch_summary(data: &BatchReport) -> String {
    let mut output = String::new();

    output.push_str("Breadcrumb Batch Results\n");
    output.push_str("========================\n\n");
    output.push_str(&format!("Contexts: {}\n", data.stats.total_contexts));
    output.push_str(&format!("Empty trails: {}\n", data.stats.empty_trails));
    output.push_str(&format!("Total crumbs: {}\n", data.stats.total_crumbs));
    output.push_str(&format!("Deepest trail: {}\n\n", data.stats.max_depth));

    for trail in &data.trails {
        output.push_str(&format!("{}: {}\n", trail.name, trail.breadcrumb.path()));
    }

    output.push_str(&format!("\nDuration: {}ms\n", data.metadata.duration_ms));
    output.push_str(&format!(
        "Processing Speed: {:.2} contexts/sec\n",
        data.metadata.contexts_per_second
    ));

    output
}
