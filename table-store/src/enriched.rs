//! Enriched incident table: written once after batch analysis, read back
//! by the matching strategies. One row per post, analysis columns appended
//! to the post columns.

use crate::{format_timestamp, open_table, parse_timestamp, require_columns};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};
use vialert_core::{EngineError, EnrichedRecord, IncidentCategory, Post, TableError, TimeSlot};

#[derive(Debug, Serialize, Deserialize)]
struct EnrichedRow {
    id: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    user: String,
    #[serde(default)]
    platform: String,
    #[serde(default)]
    likes: Option<u64>,
    #[serde(default)]
    comments_count: Option<u64>,
    #[serde(default)]
    video_views: Option<u64>,
    extracted_locations: String,
    incident_type: String,
    severity_score: f64,
    confidence_score: f64,
    word_count: usize,
    char_count: usize,
    entities_found: usize,
    time_slot: String,
    critical_time: String,
    alert_required: String,
}

impl EnrichedRow {
    fn from_record(record: &EnrichedRecord) -> Self {
        Self {
            id: record.post.id.clone(),
            text: record.post.text.clone(),
            timestamp: record.post.timestamp.map(format_timestamp),
            user: record.post.user.clone(),
            platform: record.post.platform.clone(),
            likes: Some(record.post.likes),
            comments_count: Some(record.post.comments_count),
            video_views: Some(record.post.video_views),
            extracted_locations: record.extracted_locations.clone(),
            incident_type: record.incident_type.label().to_string(),
            severity_score: record.severity_score,
            confidence_score: record.confidence_score,
            word_count: record.word_count,
            char_count: record.char_count,
            entities_found: record.entities_found,
            time_slot: record.time_slot.label().to_string(),
            critical_time: record.critical_time.to_string(),
            alert_required: record.alert_required.to_string(),
        }
    }

    fn into_record(self) -> EnrichedRecord {
        let incident_type = match IncidentCategory::from_label(&self.incident_type) {
            Some(category) => category,
            None => {
                warn!(
                    "Enriched row {}: unknown incident type '{}'",
                    self.id, self.incident_type
                );
                IncidentCategory::Unclassified
            }
        };
        let time_slot = match TimeSlot::from_label(&self.time_slot) {
            Some(slot) => slot,
            None => {
                warn!(
                    "Enriched row {}: unknown time slot '{}'",
                    self.id, self.time_slot
                );
                TimeSlot::Unspecified
            }
        };
        let timestamp = match self.timestamp.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let parsed = parse_timestamp(raw);
                if parsed.is_none() {
                    warn!("Enriched row {}: unparseable timestamp '{}'", self.id, raw);
                }
                parsed
            }
        };

        EnrichedRecord {
            post: Post {
                id: self.id,
                text: self.text.filter(|t| !t.trim().is_empty()),
                timestamp,
                user: self.user,
                platform: self.platform,
                likes: self.likes.unwrap_or(0),
                comments_count: self.comments_count.unwrap_or(0),
                video_views: self.video_views.unwrap_or(0),
            },
            extracted_locations: self.extracted_locations,
            incident_type,
            severity_score: self.severity_score,
            confidence_score: self.confidence_score,
            word_count: self.word_count,
            char_count: self.char_count,
            entities_found: self.entities_found,
            time_slot,
            critical_time: parse_flag(&self.critical_time),
            alert_required: parse_flag(&self.alert_required),
        }
    }
}

/// Pandas capitalizes its booleans, so the comparison ignores case.
fn parse_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

pub fn save_enriched(path: &Path, records: &[EnrichedRecord]) -> Result<(), EngineError> {
    let mut writer = csv::Writer::from_path(path).map_err(TableError::from)?;
    for record in records {
        writer
            .serialize(EnrichedRow::from_record(record))
            .map_err(TableError::from)?;
    }
    writer.flush()?;
    info!("Saved {} enriched records to {}", records.len(), path.display());
    Ok(())
}

/// Reads the enriched table back for matching. A header-only table is not
/// an error: zero incidents is a legitimate "nothing reported" state.
pub fn load_enriched(path: &Path) -> Result<Vec<EnrichedRecord>, EngineError> {
    let mut reader = open_table(path)?;
    let headers = reader.headers().map_err(TableError::from)?.clone();
    require_columns(
        &headers,
        "enriched_records",
        &[
            "id",
            "extracted_locations",
            "incident_type",
            "severity_score",
            "confidence_score",
            "word_count",
            "char_count",
            "entities_found",
            "time_slot",
            "critical_time",
            "alert_required",
        ],
    )?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<EnrichedRow>().enumerate() {
        let row = row.map_err(|e| TableError::MalformedRow {
            table: "enriched_records".to_string(),
            row: index as u64 + 1,
            reason: e.to_string(),
        })?;
        records.push(row.into_record());
    }

    info!(
        "Loaded {} enriched records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}
