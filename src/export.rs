//! CSV export: the bulk action behind the selection checkboxes.

use std::io::Write;

use crate::core::errors::{OdkError, Result};
use crate::view::collection::Record;
use crate::view::selection::SelectionSet;

/// A record shape that can be flattened to CSV.
pub trait Exportable {
    /// Column headers, in row order.
    fn headers() -> &'static [&'static str];

    /// One CSV row of rendered values.
    fn row(&self) -> Vec<String>;
}

/// Write records as CSV with a header row.
pub fn write_csv<R: Exportable, W: Write>(records: &[&R], out: &mut W) -> Result<usize> {
    let write_err = |source: std::io::Error| OdkError::OperationFailed {
        context: "csv export",
        details: source.to_string(),
    };

    writeln!(out, "{}", join_row(R::headers().iter().map(|h| (*h).to_string()))).map_err(write_err)?;
    for record in records {
        writeln!(out, "{}", join_row(record.row().into_iter())).map_err(write_err)?;
    }
    Ok(records.len())
}

/// Write only the selected records, preserving display-list order.
pub fn write_selected_csv<R, W>(
    display: &[&R],
    selection: &SelectionSet,
    out: &mut W,
) -> Result<usize>
where
    R: Exportable + Record,
    W: Write,
{
    let picked: Vec<&R> = display
        .iter()
        .filter(|r| selection.contains(r.id()))
        .copied()
        .collect();
    write_csv(&picked, out)
}

fn join_row(values: impl Iterator<Item = String>) -> String {
    values
        .map(|v| quote_field(&v))
        .collect::<Vec<String>>()
        .join(",")
}

/// Quote a field when it contains a delimiter, quote, or newline.
fn quote_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
