//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use prospect_domain::traits::AudioEntry;
use prospect_domain::Opportunity;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest context excerpt shown in a table cell
const TABLE_CONTEXT_CHARS: usize = 60;

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

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format opportunities output.
    pub fn format_opportunities(&self, opportunities: &[Opportunity]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_opportunities_json(opportunities),
            OutputFormat::Table => Ok(self.format_opportunities_table(opportunities)),
            OutputFormat::Quiet => Ok(opportunities
                .iter()
                .map(|o| o.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_opportunities_json(&self, opportunities: &[Opportunity]) -> Result<String> {
        let values: Vec<serde_json::Value> = opportunities
            .iter()
            .map(|o| {
                serde_json::json!({
                    "id": o.id.to_string(),
                    "label": o.label,
                    "recording_id": o.recording_id.as_ref().map(|r| r.to_string()),
                    "keyword": o.keyword,
                    "occurrence": o.occurrence,
                    "context_before": o.context_before,
                    "context_after": o.context_after,
                    "full_context": o.full_context,
                    "status": o.status,
                    "priority": o.priority,
                    "notes": o.notes,
                    "created_at": o.created_at
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&values)?)
    }

    fn format_opportunities_table(&self, opportunities: &[Opportunity]) -> String {
        if opportunities.is_empty() {
            return self.colorize("No opportunities found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Keyword", "#", "Status", "Priority", "Context"]);

        for opp in opportunities {
            builder.push_record([
                opp.id.to_string(),
                opp.keyword.clone(),
                opp.occurrence.to_string(),
                opp.status.clone(),
                opp.priority.clone(),
                truncate(&opp.full_context, TABLE_CONTEXT_CHARS),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format stored audio entries.
    pub fn format_audio(&self, entries: &[AudioEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = entries
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "filename": e.filename,
                            "content_hash": e.content_hash,
                            "size": e.size
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.filename.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No audio files stored.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Filename", "Size", "SHA-256"]);
                for entry in entries {
                    builder.push_record([
                        entry.filename.clone(),
                        entry.size.to_string(),
                        entry.content_hash.chars().take(12).collect(),
                    ]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
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
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Shorten `text` to at most `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
