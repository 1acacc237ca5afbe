//! Per-post fusion: location extraction, classification, severity and
//! time enrichment combined into one [`AnalysisResult`].

use crate::classifier::IncidentClassifier;
use crate::config::AnalyzerConfig;
use crate::locations::LocationExtractor;
use crate::ner::EntityRecognizer;
use crate::severity::SeverityScorer;
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use tracing::debug;
use vialert_core::{AnalysisResult, Post, SeverityBucket, TimeSlot};

pub struct IncidentAnalyzer {
    config: AnalyzerConfig,
    recognizer: Option<Box<dyn EntityRecognizer>>,
}

impl IncidentAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            recognizer: None,
        }
    }

    pub fn with_recognizer(config: AnalyzerConfig, recognizer: Box<dyn EntityRecognizer>) -> Self {
        Self {
            config,
            recognizer: Some(recognizer),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn has_recognizer(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Analyzes one post. Missing text degrades every signal to its
    /// default; nothing here returns an error.
    pub fn analyze_post(&self, post: &Post) -> AnalysisResult {
        let text = post.text.as_deref();

        let extractor = match self.recognizer.as_deref() {
            Some(recognizer) => LocationExtractor::with_recognizer(&self.config, recognizer),
            None => LocationExtractor::new(&self.config),
        };
        let locations = match text {
            Some(t) => extractor.extract(t),
            None => Vec::new(),
        };

        let category = IncidentClassifier::new(&self.config).classify(text);
        let severity = SeverityScorer::new(&self.config).score(text);

        let word_count = text.map(|t| t.split_whitespace().count()).unwrap_or(0);
        let char_count = text.map(|t| t.chars().count()).unwrap_or(0);

        let (time_slot, critical_time) = match post.timestamp {
            Some(ts) => (classify_time_slot(ts.hour()), is_critical_time(&ts)),
            None => (TimeSlot::Unspecified, false),
        };

        let alert_required = severity.bucket() == SeverityBucket::Severe
            || text.is_some_and(|t| {
                let lowered = t.to_lowercase();
                self.config
                    .alert_override()
                    .iter()
                    .any(|term| lowered.contains(term.as_str()))
            });

        debug!(
            "Analyzed post {}: {} location(s), category '{}', severity {:.3}",
            post.id,
            locations.len(),
            category,
            severity.score
        );

        AnalysisResult {
            locations,
            category,
            severity,
            word_count,
            char_count,
            time_slot,
            critical_time,
            alert_required,
        }
    }
}

pub fn classify_time_slot(hour: u32) -> TimeSlot {
    match hour {
        5..=8 => TimeSlot::EarlyMorning,
        9..=11 => TimeSlot::MidMorning,
        12..=14 => TimeSlot::Midday,
        15..=17 => TimeSlot::Afternoon,
        18..=20 => TimeSlot::EarlyEvening,
        21..=23 => TimeSlot::Night,
        _ => TimeSlot::LateNight,
    }
}

/// High-incidence windows: commute peaks, lunchtime, late evening, plus
/// Mondays and the long weekend.
pub fn is_critical_time(timestamp: &NaiveDateTime) -> bool {
    let hour = timestamp.hour();
    let critical_hour = (6..9).contains(&hour)
        || (12..14).contains(&hour)
        || (16..20).contains(&hour)
        || hour >= 22
        || hour < 1;
    let critical_day = matches!(
        timestamp.weekday(),
        Weekday::Mon | Weekday::Fri | Weekday::Sat | Weekday::Sun
    );
    critical_hour || critical_day
}
