//! Shared CLI output contracts: text tables, status badges, JSON mode.

#![allow(missing_docs)]

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::core::errors::{OdkError, Result};

/// How command output should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable tables.
    Text,
    /// Machine-readable JSON (one document per command).
    Json,
}

/// Serialize a value as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| OdkError::Serialization {
        context: "cli json output",
        details: e.to_string(),
    })?;
    println!("{rendered}");
    Ok(())
}

/// Print a padded text table with a header row.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{h:<width$}", width = widths[i]))
        .collect();
    println!("{}", header_line.join("  ").bold());

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths.get(i).copied().unwrap_or(cell.len());
                let padding = width.saturating_sub(cell.len());
                format!("{}{}", badge(cell), " ".repeat(padding))
            })
            .collect();
        println!("{}", line.join("  "));
    }
}

/// Footer line under a table: "showing X of Y (page P/N)".
pub fn print_footer(shown: usize, total: usize, page: usize, pages: usize) {
    let summary = format!("showing {shown} of {total} (page {page}/{pages})");
    println!("{}", summary.dimmed());
}

/// Color a cell when it is a known status value; pass through otherwise.
#[must_use]
pub fn badge(value: &str) -> ColoredString {
    match value {
        "Active" | "Qualified" | "Clicked" | "Completed" => value.green(),
        "New" | "Scheduled" | "Sent" | "Delivered" => value.cyan(),
        "Contacted" | "Paused" | "Opened" => value.yellow(),
        "Unqualified" | "Bounced" => value.red(),
        other => other.normal(),
    }
}
