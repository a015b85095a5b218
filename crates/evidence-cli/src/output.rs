//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use evidence_verify::{aggregate, ItemReport};
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Routing decision for one item, as printed by `plan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    /// Evidence identifier
    pub id: String,
    /// `event_type` or `observation_type`
    pub kind: String,
    /// Declared source
    pub source: String,
    /// Checker that would run
    pub checker: String,
    /// Whether the checker would touch the network
    pub network: bool,
}

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

    /// Format verification reports.
    pub fn format_reports(&self, reports: &[ItemReport]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_reports_json(reports),
            OutputFormat::Table => Ok(self.format_reports_table(reports)),
            OutputFormat::Quiet => Ok(self.format_reports_quiet(reports)),
        }
    }

    /// Reports plus the aggregate as JSON.
    fn format_reports_json(&self, reports: &[ItemReport]) -> Result<String> {
        let combined = aggregate(reports);
        let document = serde_json::json!({
            "is_valid": combined.is_valid,
            "errors": combined.errors,
            "items": reports,
        });
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Format reports as a table followed by a summary line.
    fn format_reports_table(&self, reports: &[ItemReport]) -> String {
        if reports.is_empty() {
            return self.colorize("No evidence found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Kind", "Source", "Checker", "Status", "Messages"]);

        for report in reports {
            let status = if !report.result.is_valid {
                self.colorize("FAIL", "red")
            } else if report.result.errors.is_empty() {
                self.colorize("OK", "green")
            } else {
                self.colorize("OK*", "yellow")
            };
            builder.push_record([
                report.id.clone(),
                report.kind.clone(),
                report.source.clone(),
                report.checker.clone(),
                status,
                report.result.errors.join("\n"),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", table, self.summary(reports))
    }

    /// Quiet mode: the IDs of failing items, one per line.
    fn format_reports_quiet(&self, reports: &[ItemReport]) -> String {
        let ids: Vec<&str> = reports
            .iter()
            .filter(|r| !r.result.is_valid)
            .map(|r| r.id.as_str())
            .collect();
        ids.join("\n")
    }

    /// One-line verdict over all reports.
    pub fn summary(&self, reports: &[ItemReport]) -> String {
        let failed = reports.iter().filter(|r| !r.result.is_valid).count();
        if failed == 0 {
            self.success(&format!("{} item(s) verified", reports.len()))
        } else {
            self.error(&format!(
                "{} of {} item(s) failed verification",
                failed,
                reports.len()
            ))
        }
    }

    /// Format a dispatch plan.
    pub fn format_plan(&self, entries: &[PlanEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| format!("{}\t{}", e.id, e.checker))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No evidence found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Kind", "Source", "Checker", "Network"]);
                for entry in entries {
                    builder.push_record([
                        entry.id.as_str(),
                        entry.kind.as_str(),
                        entry.source.as_str(),
                        entry.checker.as_str(),
                        if entry.network { "yes" } else { "no" },
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
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
