//! Post table reader. Ingest scripts append many bookkeeping columns
//! (image URLs, follower counts, weekday flags); only the analysis
//! columns are mapped, the rest are ignored.

use crate::{open_table, parse_timestamp, require_columns};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};
use vialert_core::{EngineError, Post, TableError};

#[derive(Debug, Deserialize)]
struct PostRow {
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
}

pub fn load_posts(path: &Path) -> Result<Vec<Post>, EngineError> {
    let mut reader = open_table(path)?;
    let headers = reader.headers().map_err(TableError::from)?.clone();
    require_columns(&headers, "posts", &["id", "text"])?;

    let mut posts = Vec::new();
    for (index, row) in reader.deserialize::<PostRow>().enumerate() {
        let row = row.map_err(|e| TableError::MalformedRow {
            table: "posts".to_string(),
            row: index as u64 + 1,
            reason: e.to_string(),
        })?;

        let timestamp = match row.timestamp.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let parsed = parse_timestamp(raw);
                if parsed.is_none() {
                    warn!("Post {}: unparseable timestamp '{}'", row.id, raw);
                }
                parsed
            }
        };

        posts.push(Post {
            id: row.id,
            text: row.text.filter(|t| !t.trim().is_empty()),
            timestamp,
            user: row.user,
            platform: row.platform,
            likes: row.likes.unwrap_or(0),
            comments_count: row.comments_count.unwrap_or(0),
            video_views: row.video_views.unwrap_or(0),
        });
    }

    if posts.is_empty() {
        return Err(TableError::Empty {
            table: "posts".to_string(),
        }
        .into());
    }
    info!("Loaded {} posts from {}", posts.len(), path.display());
    Ok(posts)
}
