//! ANSI colored output formatter
//!
//! This module provides colorful terminal output for breadcrumb trails.

use crate::models::{BatchReport, Breadcrumb, Crumb};

// ANSI escape codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const UNDERLINE: &str = "\x1b[4m";

const BRIGHT_CYAN: &str = "\x1b[96m";
const BRIGHT_WHITE: &str = "\x1b[97m";
const BRIGHT_YELLOW: &str = "\x1b[93m";

// Background colors
const BG_BLUE: &str = "\x1b[44m";

/// Color a crumb: links are underlined cyan, terminal crumbs bold white
fn format_crumb(crumb: &Crumb) -> String {
    if crumb.is_linked() {
        format!("{}{}{}{}", UNDERLINE, BRIGHT_CYAN, crumb.label, RESET)
    } else {
        format!("{}{}{}{}", BOLD, BRIGHT_WHITE, crumb.label, RESET)
    }
}

/// Format breadcrumb trail as ANSI
pub fn format_breadcrumb_ansi(breadcrumb: &Breadcrumb) -> String {
    if breadcrumb.is_empty() {
        return format!("{}(no breadcrumb){}", DIM, RESET);
    }

    breadcrumb
        .crumbs
        .iter()
        .map(format_crumb)
        .collect::<Vec<_>>()
        .join(&format!(" {}>{} ", DIM, RESET))
}

/// Format a batch report as ANSI colored text
pub fn format_batch_ansi(data: &BatchReport) -> String {
    let mut output = String::new();

    // Header
    output.push_str(&format!(
        "\n{}{}  Breadcrumb Batch Results  {}{}\n\n",
        BOLD, BG_BLUE, RESET, RESET
    ));

    // Stats summary
    output.push_str(&format!(
        "{}Contexts:{} {}  {}Empty:{} {}  {}Crumbs:{} {}\n\n",
        BOLD,
        RESET,
        data.stats.total_contexts,
        BOLD,
        RESET,
        data.stats.empty_trails,
        BOLD,
        RESET,
        data.stats.total_crumbs
    ));

    let width = data.trails.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for trail in &data.trails {
        let kind = trail.breadcrumb.kind.map(|k| k.label()).unwrap_or("-");
        output.push_str(&format!(
            "{}{:<width$}{} {}[{}]{} {}\n",
            BRIGHT_YELLOW,
            trail.name,
            RESET,
            DIM,
            kind,
            RESET,
            format_breadcrumb_ansi(&trail.breadcrumb),
            width = width
        ));
    }

    // Footer
    output.push_str(&format!(
        "\n{}Completed in {}ms ({:.2} contexts/sec){}\n",
        DIM, data.metadata.duration_ms, data.metadata.contexts_per_second, RESET
    ));

    output
}
