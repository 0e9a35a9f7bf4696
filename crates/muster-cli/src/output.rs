//! Output formatting for the CLI.

use crate::commands::parse::{FileReport, SkippedInput};
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use muster_domain::PageAnchor;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format per-page parse results.
    pub fn format_reports(&self, reports: &[FileReport], skipped: &[SkippedInput]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "pages": reports,
                "skipped": skipped,
            }))?),
            OutputFormat::Table => Ok(self.format_reports_table(reports, skipped)),
            OutputFormat::Quiet => Ok(reports
                .iter()
                .map(|r| r.output.display().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_reports_table(&self, reports: &[FileReport], skipped: &[SkippedInput]) -> String {
        let mut lines = Vec::new();

        if reports.is_empty() {
            lines.push(self.colorize("No pages parsed.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record([
                "Input", "State", "Page", "Spans", "Parsed", "Unparsed", "Linked", "Records", "Status",
            ]);

            for entry in reports {
                let report = &entry.report;
                let status = if report.is_suspect_offset() {
                    self.colorize("check offset", "red")
                } else if report.unparsed > 0 {
                    self.colorize("partial", "yellow")
                } else {
                    self.colorize("ok", "green")
                };
                builder.push_record([
                    file_name(&entry.input),
                    report.state.clone(),
                    report.source_page.to_string(),
                    report.spans.to_string(),
                    report.parsed.to_string(),
                    report.unparsed.to_string(),
                    report.linked.to_string(),
                    entry.records.to_string(),
                    status,
                ]);
            }

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            lines.push(table.to_string());
        }

        for skip in skipped {
            lines.push(self.warning(&format!(
                "Skipped {}: {}",
                skip.input.display(),
                skip.reason
            )));
        }

        lines.join("\n")
    }

    /// Format the anchor table.
    pub fn format_anchors(&self, anchors: &[&PageAnchor]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = anchors
                    .iter()
                    .map(|a| {
                        serde_json::json!({
                            "state": a.state,
                            "printed_start": a.printed_start,
                            "source_start": a.source_start,
                            "offset": a.offset(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if anchors.is_empty() {
                    return Ok(self.colorize(
                        "No page anchors configured; every page maps to itself.",
                        "yellow",
                    ));
                }
                let mut builder = Builder::default();
                builder.push_record(["State", "Printed start", "Source start", "Offset"]);
                for anchor in anchors {
                    builder.push_record([
                        anchor.state.clone(),
                        anchor.printed_start.to_string(),
                        anchor.source_start.to_string(),
                        format!("{:+}", anchor.offset()),
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(anchors
                .iter()
                .map(|a| a.state.clone())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a page resolution.
    pub fn format_resolution(&self, state: &str, printed_page: u32, source_page: u32) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "state": state,
                "printed_page": printed_page,
                "source_page": source_page,
            }))?),
            OutputFormat::Table => Ok(self.info(&format!(
                "{} printed page {} is source page {}",
                state, printed_page, source_page
            ))),
            OutputFormat::Quiet => Ok(source_page.to_string()),
        }
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
