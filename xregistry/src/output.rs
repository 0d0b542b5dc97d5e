//! Shared output formatting for index reports.
//!
//! Provides JSON and plain-text formatters for [`IndexReport`]. Color and
//! terminal handling belong to the CLI layer.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::WalkError;
use crate::report::{IndexReport, ValidationResult};
use crate::walker::WalkOutcome;

/// One listed artifact.
#[derive(Debug, Serialize)]
struct EntryView<'a> {
    #[serde(rename = "type")]
    artifact_type: &'static str,
    group: &'a str,
    name: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a Path>,
}

#[derive(Debug, Serialize)]
struct CountsView {
    artifacts: usize,
    policies: usize,
    schemas: usize,
    rules: usize,
}

#[derive(Debug, Serialize)]
struct ReportView<'a> {
    outcome: WalkOutcome,
    ok: bool,
    counts: CountsView,
    validation: &'a ValidationResult,
    errors: &'a [WalkError],
    #[serde(skip_serializing_if = "Option::is_none")]
    artifacts: Option<Vec<EntryView<'a>>>,
}

fn entries(report: &IndexReport) -> Vec<EntryView<'_>> {
    report
        .index
        .entries()
        .map(|(ty, id, content)| EntryView {
            artifact_type: ty.as_str(),
            group: id.group(),
            name: id.name(),
            version: id.version(),
            source: content.source(),
        })
        .collect()
}

fn view(report: &IndexReport, with_artifacts: bool) -> ReportView<'_> {
    let index = &report.index;
    ReportView {
        outcome: report.outcome,
        ok: report.is_ok(),
        counts: CountsView {
            artifacts: index.artifacts().len(),
            policies: index.policies().len(),
            schemas: index.schemas().len(),
            rules: index.rules().len(),
        },
        validation: &report.validation,
        errors: &report.errors,
        artifacts: with_artifacts.then(|| entries(report)),
    }
}

/// Format an [`IndexReport`] as JSON to a writer.
///
/// With `with_artifacts`, the report includes one entry per typed artifact.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(
    report: &IndexReport,
    with_artifacts: bool,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&view(report, with_artifacts))?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format an [`IndexReport`] as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(
    report: &IndexReport,
    with_artifacts: bool,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    let index = &report.index;
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  XREGISTRY INDEX")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Artifacts:  {}", index.artifacts().len())?;
    writeln!(writer, "  Policies:   {}", index.policies().len())?;
    writeln!(writer, "  Schemas:    {}", index.schemas().len())?;
    writeln!(writer, "  Rules:      {}", index.rules().len())?;
    writeln!(writer, "  Problems:   {}", report.errors_count())?;
    writeln!(writer)?;

    if with_artifacts && !index.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  ARTIFACTS")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for entry in entries(report) {
            write!(
                writer,
                "{:<7} {}/{}@{}",
                entry.artifact_type, entry.group, entry.name, entry.version
            )?;
            if let Some(source) = entry.source {
                write!(writer, "  ({})", source.display())?;
            }
            writeln!(writer)?;
        }
        writeln!(writer)?;
    }

    if !report.errors.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  PROBLEMS")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for error in &report.errors {
            writeln!(writer, "{}", error.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    match report.outcome {
        WalkOutcome::Completed if report.validation.valid => {
            writeln!(
                writer,
                "\u{2713} Indexed {} artifact(s) without problems",
                index.len()
            )?;
        }
        WalkOutcome::Completed => {
            writeln!(
                writer,
                "\u{2717} Walk completed with {} problem(s)",
                report.errors_count()
            )?;
        }
        WalkOutcome::MissingRoot => {
            writeln!(writer, "\u{2717} Registry root does not exist")?;
        }
        WalkOutcome::Aborted => {
            writeln!(writer, "\u{2717} Walk aborted before completion")?;
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}
