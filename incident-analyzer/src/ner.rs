//! Optional named-entity augmentation. The recognizer is a pluggable
//! capability: the extractor takes any implementation, or none at all,
//! and behaves identically except for the extra tagged mentions.

use regex::Regex;
use vialert_core::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Organization,
    Place,
    Misc,
}

#[derive(Debug, Clone)]
pub struct RecognizedEntity {
    pub text: String,
    pub label: EntityLabel,
    pub confidence: f64,
}

pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<RecognizedEntity>;
}

struct RecognizerRule {
    regex: Regex,
    label: EntityLabel,
    confidence: f64,
}

/// Regex-heuristic recognizer shipped as the built-in implementation.
/// A model-backed recognizer would slot into the same trait.
pub struct PatternRecognizer {
    rules: Vec<RecognizerRule>,
}

impl PatternRecognizer {
    pub fn new() -> Result<Self, ConfigError> {
        let specs: &[(&str, EntityLabel, f64)] = &[
            // Capitalized run after a direction preposition.
            (
                r"\b(?:en|hacia|desde|rumbo a)\s+(\p{Lu}\p{Ll}*(?:\s+(?:(?:de|del|la|los|las)\s+)?\p{Lu}\p{Ll}*)*)",
                EntityLabel::Place,
                0.85,
            ),
            // Traffic authorities; high confidence but not a place.
            (
                r"\b(AMET|DIGESETT|COE)\b",
                EntityLabel::Organization,
                0.95,
            ),
            // Hashtags carry place hints too rarely to trust.
            (r"#(\w+)", EntityLabel::Misc, 0.6),
        ];
        let mut rules = Vec::with_capacity(specs.len());
        for (pattern, label, confidence) in specs {
            let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
            rules.push(RecognizerRule {
                regex,
                label: *label,
                confidence: *confidence,
            });
        }
        Ok(Self { rules })
    }
}

impl EntityRecognizer for PatternRecognizer {
    fn recognize(&self, text: &str) -> Vec<RecognizedEntity> {
        let mut entities = Vec::new();
        for rule in &self.rules {
            for caps in rule.regex.captures_iter(text) {
                if let Some(span) = caps.get(1) {
                    entities.push(RecognizedEntity {
                        text: span.as_str().to_string(),
                        label: rule.label,
                        confidence: rule.confidence,
                    });
                }
            }
        }
        entities
    }
}
