use crate::Result;
use crate::summary::{Status, Summary};
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Render a summary as a table of indicators followed by the run's warnings.
pub fn generate<W: Write>(summary: &Summary, use_colors: bool, writer: &mut W) -> Result<()> {
    writeln!(writer, "Run {} ({})", summary.config.run_id, summary.schema_version)?;
    if let (Some(start), Some(end)) = (summary.config.started_at, summary.config.finished_at) {
        writeln!(writer, "Window {} .. {}", start.to_rfc3339(), end.to_rfc3339())?;
    }
    writeln!(writer)?;

    if summary.results.is_empty() {
        writeln!(writer, "No indicators evaluated")?;
    } else {
        let id_width = summary.results.iter().map(|r| r.id.len()).max().unwrap_or(0).max("INDICATOR".len());
        let values: Vec<String> = summary.results.iter().map(|r| format_value(r.value, &r.unit)).collect();
        let value_width = values.iter().map(String::len).max().unwrap_or(0).max("VALUE".len());

        let header = format!("{:<id_width$}  {:<6}  {:<value_width$}  REASON", "INDICATOR", "STATUS", "VALUE");
        if use_colors {
            writeln!(writer, "{}", header.bold())?;
        } else {
            writeln!(writer, "{header}")?;
        }

        for (result, value) in summary.results.iter().zip(&values) {
            // Pad before coloring, escape codes would throw off the width.
            let status = format!("{:<6}", result.status.to_string());
            let status = if use_colors { colorize(result.status, &status) } else { status };
            let reason = result.reason.as_deref().unwrap_or("");
            writeln!(writer, "{:<id_width$}  {status}  {value:<value_width$}  {reason}", result.id)?;
            if !result.inputs_missing.is_empty() {
                writeln!(writer, "{:<id_width$}  missing: {}", "", result.inputs_missing.join(", "))?;
            }
        }
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "{} passed, {} warned, {} failed, {} skipped",
        summary.count(Status::Pass),
        summary.count(Status::Warn),
        summary.count(Status::Fail),
        summary.count(Status::Skip)
    )?;

    if !summary.warnings.is_empty() {
        writeln!(writer)?;
        for warning in &summary.warnings {
            if use_colors {
                writeln!(writer, "{} {warning}", "warning:".yellow().bold())?;
            } else {
                writeln!(writer, "warning: {warning}")?;
            }
        }
    }

    Ok(())
}

fn colorize(status: Status, text: &str) -> String {
    match status {
        Status::Pass => text.green().to_string(),
        Status::Warn => text.yellow().bold().to_string(),
        Status::Fail => text.red().bold().to_string(),
        Status::Skip => text.dimmed().to_string(),
    }
}

fn format_value(value: Option<f64>, unit: &str) -> String {
    match value {
        None => "n/a".to_string(),
        Some(v) if unit.is_empty() => format!("{v}"),
        Some(v) => format!("{v} {unit}"),
    }
}
