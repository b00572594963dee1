// Review output for classified batches and stored source lists

use crate::model::{PersistedSourceEntry, SourceType};
use crate::pipeline::IngestReport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

pub fn render_ingest_report(
    report: &IngestReport,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(report),
        ReportFormat::Text => Ok(ingest_text(report)),
        ReportFormat::Markdown => Ok(ingest_markdown(report)),
    }
}

fn ingest_text(report: &IngestReport) -> String {
    let mut out = String::new();

    for candidate in &report.candidates {
        let marker = if candidate.is_duplicate_of_existing {
            "="
        } else if candidate.is_low_confidence() {
            "?"
        } else {
            "+"
        };
        out.push_str(&format!(
            "  {} {:<14} {}",
            marker,
            candidate.source_type.label(),
            candidate.display_name
        ));
        if candidate.is_duplicate_of_existing {
            out.push_str("  (already configured)");
        }
        out.push('\n');
        if let Some(ref note) = candidate.note {
            out.push_str(&format!("      {}\n", note));
        }
    }

    for line in &report.unrecognized {
        out.push_str(&format!("  - {:<14} {}\n", "Unrecognized", line));
    }

    out.push_str(&format!(
        "\n# Summary: {} sources, {} new, {} already configured, {} to verify, {} unrecognized\n",
        report.candidates.len(),
        report.candidates.len() - report.duplicate_count(),
        report.duplicate_count(),
        report.low_confidence_count(),
        report.unrecognized.len()
    ));

    out
}

fn ingest_markdown(report: &IngestReport) -> String {
    let mut out = String::new();
    out.push_str("| Type | Source | Status | Note |\n");
    out.push_str("|------|--------|--------|------|\n");

    for candidate in &report.candidates {
        let status = if candidate.is_duplicate_of_existing {
            "duplicate"
        } else {
            "new"
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            candidate.source_type.label(),
            candidate.display_name.replace('|', "\\|"),
            status,
            candidate.note.as_deref().unwrap_or("")
        ));
    }

    if !report.unrecognized.is_empty() {
        out.push_str("\n**Unrecognized lines:**\n\n");
        for line in &report.unrecognized {
            out.push_str(&format!("- `{}`\n", line));
        }
    }

    out
}

/// Every value an entry lists, whatever its type
fn entry_values(entry: &PersistedSourceEntry) -> Vec<String> {
    match entry.canonical_type() {
        Some(SourceType::Feed) => entry
            .config
            .feeds
            .iter()
            .map(|feed| {
                if feed.name.is_empty() {
                    feed.url.clone()
                } else {
                    format!("{} <{}>", feed.name, feed.url)
                }
            })
            .collect(),
        Some(source_type) => entry
            .values_for(source_type)
            .into_iter()
            .map(String::from)
            .collect(),
        None => Vec::new(),
    }
}

pub fn render_sources(
    sources: &[PersistedSourceEntry],
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    if format == ReportFormat::Json {
        return serde_json::to_string_pretty(sources);
    }

    let mut out = String::new();
    if format == ReportFormat::Markdown {
        out.push_str("| Type | Enabled | Values |\n");
        out.push_str("|------|---------|--------|\n");
    }

    for entry in sources {
        let type_label = entry
            .canonical_type()
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| entry.source_type.clone());
        let values = entry_values(entry).join(", ");

        match format {
            ReportFormat::Markdown => out.push_str(&format!(
                "| {} | {} | {} |\n",
                type_label,
                if entry.enabled { "yes" } else { "no" },
                values.replace('|', "\\|")
            )),
            _ => out.push_str(&format!(
                "  {} {:<14} {}\n",
                if entry.enabled { "●" } else { "○" },
                type_label,
                values
            )),
        }
    }

    Ok(out)
}
