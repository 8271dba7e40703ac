use std::io::{self, Write};

use serde_json::Value;
use tickview_core::Envelope;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => render_table(&mut out, envelope)?,
    }
    Ok(())
}

fn render_table<W: Write>(out: &mut W, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;
    writeln!(out, "status      : {}", envelope.meta.status.as_str())?;
    if !envelope.meta.tickers.is_empty() {
        writeln!(out, "tickers     : {}", envelope.meta.tickers.join(","))?;
    }

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    let Value::Object(data) = &envelope.data else {
        writeln!(out, "data: {}", envelope.data)?;
        return Ok(());
    };

    for (key, value) in data {
        match value {
            Value::Array(rows) => render_rows(out, key, rows)?,
            other => writeln!(out, "{key:<12}: {}", scalar(other))?,
        }
    }
    Ok(())
}

/// One aligned table per ticker; columns come from the first record.
fn render_rows<W: Write>(out: &mut W, ticker: &str, rows: &[Value]) -> Result<(), CliError> {
    writeln!(out)?;
    writeln!(out, "{ticker} ({} rows)", rows.len())?;

    let Some(Value::Object(first)) = rows.first() else {
        return Ok(());
    };
    let columns: Vec<&str> = first.keys().map(String::as_str).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.get(*column).map(scalar).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            cells
                .iter()
                .map(|row| row[index].len())
                .chain([column.len()])
                .max()
                .unwrap_or_default()
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, &width)| format!("{column:>width$}"))
        .collect();
    writeln!(out, "  {}", header.join("  "))?;
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:>width$}"))
            .collect();
        writeln!(out, "  {}", line.join("  "))?;
    }
    Ok(())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
