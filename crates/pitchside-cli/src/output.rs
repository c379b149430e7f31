use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::commands::{CommandOutput, RouteReport, TableView};
use crate::error::CliError;

#[derive(Serialize)]
struct Document<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<&'a RouteReport>,
    data: &'a Value,
}

pub fn render<W: Write>(
    writer: &mut W,
    output: &CommandOutput,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => writeln!(writer, "{}", render_json(output, pretty)?)?,
        OutputFormat::Table => write!(writer, "{}", render_table(output)?)?,
    }
    writer.flush()?;

    Ok(())
}

fn render_json(output: &CommandOutput, pretty: bool) -> Result<String, CliError> {
    let document = Document {
        route: output.route.as_ref(),
        data: &output.data,
    };
    let payload = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(payload)
}

fn render_table(output: &CommandOutput) -> Result<String, CliError> {
    let mut text = String::new();

    if let Some(route) = &output.route {
        text.push_str(&format!("provider    : {}\n", route.provider));
        text.push_str(&format!(
            "sources     : {}\n",
            route
                .source_chain
                .iter()
                .map(|provider| provider.as_str())
                .collect::<Vec<_>>()
                .join(",")
        ));
        text.push_str(&format!("latency_ms  : {}\n", route.latency_ms));
        if !route.errors.is_empty() {
            text.push_str("errors:\n");
            for error in &route.errors {
                text.push_str(&format!("  - {error}\n"));
            }
        }
        text.push('\n');
    }

    match &output.table {
        Some(table) => text.push_str(&format_table(table)),
        None => {
            for line in serde_json::to_string_pretty(&output.data)?.lines() {
                text.push_str(line);
                text.push('\n');
            }
        }
    }

    Ok(text)
}

fn format_table(table: &TableView) -> String {
    let mut widths = table
        .headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };

    let mut text = line(table.headers.clone());
    text.push('\n');
    for row in &table.rows {
        text.push_str(&line(row.iter().map(String::as_str).collect()));
        text.push('\n');
    }
    if table.rows.is_empty() {
        text.push_str("(no records)\n");
    }
    text
}
