use chrono::SecondsFormat;

use crate::error::LedgerResult;
use crate::record::{LedgerRecord, RecordDetail, format_points};

/// Output formats for a ledger dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// One row per record with the classic spreadsheet columns.
    Csv,
    /// Pretty-printed JSON array of records.
    Json,
    /// Markdown log.
    Markdown,
    /// Plain text log.
    Text,
}

impl ExportFormat {
    /// Parse a format name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "markdown" | "md" => Some(Self::Markdown),
            "text" | "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Render `records` in the requested format.
pub fn export(records: &[LedgerRecord], format: ExportFormat) -> LedgerResult<String> {
    match format {
        ExportFormat::Csv => export_csv(records),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        ExportFormat::Markdown => Ok(export_markdown(records)),
        ExportFormat::Text => Ok(export_text(records)),
    }
}

const CSV_HEADER: &str = "timestamp,ward,archetype,BI,EB,OQM,renown_gain,notoriety_gain,EI_breakdown,notes,complication";

/// Export as CSV. Columns that do not apply to a record hold `-`.
pub fn export_csv(records: &[LedgerRecord]) -> LedgerResult<String> {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for r in records {
        let timestamp = r.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
        let renown = format_points(r.renown_delta);
        let notoriety = format_points(r.notoriety_delta);

        let fields: Vec<String> = match &r.detail {
            RecordDetail::MissionResolved(m) => vec![
                timestamp,
                r.ward.clone(),
                m.archetype.clone(),
                m.base_impact.to_string(),
                m.effect_bucket.to_string(),
                m.ops_modifier.to_string(),
                renown,
                notoriety,
                serde_json::to_string(&m.exposure)?,
                m.notes.clone().unwrap_or_default(),
                String::new(),
            ],
            RecordDetail::Adjustment { reason } => vec![
                timestamp,
                r.ward.clone(),
                format!("Adjustment: {reason}"),
                "-".into(),
                "-".into(),
                "-".into(),
                renown,
                notoriety,
                "-".into(),
                "auto".into(),
                String::new(),
            ],
            RecordDetail::ComplicationDrawn(c) => vec![
                timestamp,
                r.ward.clone(),
                "Complication".into(),
                "-".into(),
                "-".into(),
                "-".into(),
                renown,
                notoriety,
                "-".into(),
                "-".into(),
                c.text.clone(),
            ],
        };

        let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    Ok(out)
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Export as a Markdown log.
pub fn export_markdown(records: &[LedgerRecord]) -> String {
    let mut out = String::from("# Night Owls Ledger\n\n");
    for r in records {
        let when = r.timestamp.format("%Y-%m-%d %H:%M");
        match &r.detail {
            RecordDetail::MissionResolved(m) => {
                out.push_str(&format!(
                    "**Mission** ({}, {}) {when}\n",
                    m.archetype, r.ward
                ));
                out.push_str(&format!(
                    "  BI {} + EB {} + OQM {} = **{}**; EI {} at heat x{}\n",
                    m.base_impact,
                    m.effect_bucket,
                    m.ops_modifier,
                    m.base_score,
                    m.exposure_index,
                    m.heat_multiplier
                ));
                out.push_str(&format!(
                    "  Renown {:+}, Notoriety {:+}\n",
                    r.renown_delta, r.notoriety_delta
                ));
                if let Some(notes) = &m.notes {
                    out.push_str(&format!("  > {notes}\n"));
                }
                out.push('\n');
            }
            RecordDetail::Adjustment { reason } => {
                out.push_str(&format!(
                    "**Adjustment** ({}): {reason} {when}\n  Renown {:+}, Notoriety {:+}\n\n",
                    r.ward, r.renown_delta, r.notoriety_delta
                ));
            }
            RecordDetail::ComplicationDrawn(c) => {
                out.push_str(&format!(
                    "*Complication* ({}, {} heat) {when}: {:02}/{:02} {}\n\n",
                    r.ward,
                    c.band,
                    c.index + 1,
                    c.option_count,
                    c.text
                ));
            }
        }
    }
    out
}

/// Export as a plain text log.
pub fn export_text(records: &[LedgerRecord]) -> String {
    let mut out = String::from("Night Owls Ledger\n=================\n\n");
    for r in records {
        let when = r.timestamp.format("%Y-%m-%d %H:%M");
        match &r.detail {
            RecordDetail::MissionResolved(m) => {
                out.push_str(&format!(
                    "[{when}] Mission ({}, {}): score {}, Renown {:+}, Notoriety {:+}\n",
                    m.archetype, r.ward, m.base_score, r.renown_delta, r.notoriety_delta
                ));
                if let Some(notes) = &m.notes {
                    out.push_str(&format!("  Notes: {notes}\n"));
                }
            }
            RecordDetail::Adjustment { reason } => {
                out.push_str(&format!(
                    "[{when}] Adjustment ({}): {reason}, Renown {:+}, Notoriety {:+}\n",
                    r.ward, r.renown_delta, r.notoriety_delta
                ));
            }
            RecordDetail::ComplicationDrawn(c) => {
                out.push_str(&format!(
                    "[{when}] Complication ({}, {} heat): {}\n",
                    r.ward, c.band, c.text
                ));
            }
        }
    }
    out
}
