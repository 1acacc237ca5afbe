use serde::Serialize;
use std::collections::HashMap;
use vialert_core::EnrichedRecord;

const TOP_LOCATIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: u64,
}

/// Batch summary. Histogram entries are ordered by descending count with
/// ties in first-seen order, so serializing the same input twice yields
/// byte-identical output.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub total_posts: u64,
    pub incident_types: Vec<CountEntry>,
    pub severity_buckets: Vec<CountEntry>,
    pub time_slots: Vec<CountEntry>,
    pub posts_require_alert: u64,
    pub mean_word_count: f64,
    pub median_word_count: f64,
    pub top_locations: Vec<CountEntry>,
    pub failed_records: u64,
}

impl AggregateReport {
    pub fn from_records(records: &[EnrichedRecord], failed_records: u64) -> Self {
        let incident_types =
            count_ordered(records.iter().map(|r| r.incident_type.label().to_string()));
        let severity_buckets = count_ordered(
            records
                .iter()
                .map(|r| r.severity().bucket().label().to_string()),
        );
        let time_slots = count_ordered(records.iter().map(|r| r.time_slot.label().to_string()));

        let mut top_locations = count_ordered(records.iter().flat_map(|r| {
            r.extracted_locations
                .split(',')
                .map(str::trim)
                .filter(|loc| !loc.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        }));
        top_locations.truncate(TOP_LOCATIONS);

        let word_counts: Vec<usize> = records.iter().map(|r| r.word_count).collect();
        let mean_word_count = if word_counts.is_empty() {
            0.0
        } else {
            word_counts.iter().sum::<usize>() as f64 / word_counts.len() as f64
        };

        Self {
            total_posts: records.len() as u64,
            incident_types,
            severity_buckets,
            time_slots,
            posts_require_alert: records.iter().filter(|r| r.alert_required).count() as u64,
            mean_word_count,
            median_word_count: median(word_counts),
            top_locations,
            failed_records,
        }
    }

    /// Plain-text summary for the terminal.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Total de posts: {}\n", self.total_posts));
        out.push_str(&format!(
            "Posts que requieren alerta: {}\n",
            self.posts_require_alert
        ));
        out.push_str(&format!(
            "Filas con fallo de análisis: {}\n",
            self.failed_records
        ));
        out.push_str(&format!(
            "Palabras por post: media {:.1}, mediana {:.1}\n",
            self.mean_word_count, self.median_word_count
        ));

        out.push_str("\nTipos de incidente:\n");
        push_entries(&mut out, &self.incident_types);
        out.push_str("\nSeveridad:\n");
        push_entries(&mut out, &self.severity_buckets);
        out.push_str("\nFranjas horarias:\n");
        push_entries(&mut out, &self.time_slots);
        out.push_str("\nTop ubicaciones:\n");
        push_entries(&mut out, &self.top_locations);
        out
    }
}

fn push_entries(out: &mut String, entries: &[CountEntry]) {
    if entries.is_empty() {
        out.push_str("  (sin datos)\n");
        return;
    }
    for entry in entries {
        out.push_str(&format!("  - {}: {}\n", entry.label, entry.count));
    }
}

/// Counts labels preserving first-seen order for ties; a stable sort by
/// descending count does the rest.
fn count_ordered<I>(labels: I) -> Vec<CountEntry>
where
    I: IntoIterator<Item = String>,
{
    let mut entries: Vec<CountEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for label in labels {
        match index.get(&label) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(label.clone(), entries.len());
                entries.push(CountEntry { label, count: 1 });
            }
        }
    }
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

fn median(mut values: Vec<usize>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) as f64 / 2.0
    } else {
        values[mid] as f64
    }
}
