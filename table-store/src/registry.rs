//! User and POI registry readers. List cells arrive either as
//! Python-style reprs (`"['deportes', 'salud']"`) or as plain delimited
//! text; both shapes parse to the same clean vectors.

use crate::{open_table, require_columns};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};
use vialert_core::{EngineError, PointOfInterest, TableError, User};

#[derive(Debug, Deserialize)]
struct UserRow {
    user_id: String,
    name: String,
    residential_zone: String,
    work_zone: String,
    interests: String,
    frequent_routes: String,
}

#[derive(Debug, Deserialize)]
struct PoiRow {
    poi_id: String,
    name: String,
    #[serde(rename = "type")]
    poi_type: String,
    zone: String,
    related_interests: String,
    nearby_routes: String,
    schedule: String,
    current_offer: String,
    #[serde(default)]
    description: Option<String>,
}

pub fn load_users(path: &Path) -> Result<Vec<User>, EngineError> {
    let mut reader = open_table(path)?;
    let headers = reader.headers().map_err(TableError::from)?.clone();
    require_columns(
        &headers,
        "users",
        &[
            "user_id",
            "name",
            "residential_zone",
            "work_zone",
            "interests",
            "frequent_routes",
        ],
    )?;

    let mut users = Vec::new();
    for (index, row) in reader.deserialize::<UserRow>().enumerate() {
        let row = row.map_err(|e| TableError::MalformedRow {
            table: "users".to_string(),
            row: index as u64 + 1,
            reason: e.to_string(),
        })?;
        users.push(User {
            user_id: row.user_id,
            name: row.name,
            residential_zone: row.residential_zone,
            work_zone: row.work_zone,
            interests: parse_list(&row.interests),
            frequent_routes: parse_list(&row.frequent_routes),
        });
    }

    if users.is_empty() {
        return Err(TableError::Empty {
            table: "users".to_string(),
        }
        .into());
    }
    info!("Loaded {} users from {}", users.len(), path.display());
    Ok(users)
}

/// Loads the POI registry. Rows with an empty zone, interest list or route
/// list are skipped with a warning; the loaded registry never contains
/// them.
pub fn load_pois(path: &Path) -> Result<Vec<PointOfInterest>, EngineError> {
    let mut reader = open_table(path)?;
    let headers = reader.headers().map_err(TableError::from)?.clone();
    require_columns(
        &headers,
        "points_of_interest",
        &[
            "poi_id",
            "name",
            "type",
            "zone",
            "related_interests",
            "nearby_routes",
            "schedule",
            "current_offer",
        ],
    )?;

    let mut pois = Vec::new();
    let mut skipped = 0usize;
    for (index, row) in reader.deserialize::<PoiRow>().enumerate() {
        let row = row.map_err(|e| TableError::MalformedRow {
            table: "points_of_interest".to_string(),
            row: index as u64 + 1,
            reason: e.to_string(),
        })?;

        let related_interests = parse_list(&row.related_interests);
        let nearby_routes = parse_list(&row.nearby_routes);
        if row.zone.trim().is_empty() || related_interests.is_empty() || nearby_routes.is_empty() {
            warn!(
                "Skipping POI row {} ({}): empty zone, interests or routes",
                index + 1,
                row.poi_id
            );
            skipped += 1;
            continue;
        }

        pois.push(PointOfInterest {
            poi_id: row.poi_id,
            name: row.name,
            poi_type: row.poi_type,
            zone: row.zone,
            related_interests,
            nearby_routes,
            schedule: row.schedule,
            current_offer: row.current_offer,
            description: row.description.filter(|d| !d.trim().is_empty()),
        });
    }

    if pois.is_empty() {
        return Err(TableError::Empty {
            table: "points_of_interest".to_string(),
        }
        .into());
    }
    info!(
        "Loaded {} POIs from {} ({} rejected)",
        pois.len(),
        path.display(),
        skipped
    );
    Ok(pois)
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(|c| c == ',' || c == ';')
        .map(|item| item.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
