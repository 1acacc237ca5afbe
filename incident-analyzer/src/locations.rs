//! Location extraction: lead-word patterns, the kilometer marker and the
//! gazetteer, fused into one duplicate-free mention list. Overlapping
//! mentions ("Avenida Duarte" and "Duarte") are kept on purpose; recall
//! wins over precision here.

use crate::config::{AnalyzerConfig, MentionSpan};
use crate::ner::{EntityLabel, EntityRecognizer};
use crate::text::{collapse_whitespace, title_case};
use std::collections::HashSet;
use vialert_core::{ExtractionMethod, LocationMention};

/// Entities below this confidence are ignored during augmentation.
const MIN_ENTITY_CONFIDENCE: f64 = 0.8;

pub struct LocationExtractor<'a> {
    config: &'a AnalyzerConfig,
    recognizer: Option<&'a dyn EntityRecognizer>,
}

impl<'a> LocationExtractor<'a> {
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self {
            config,
            recognizer: None,
        }
    }

    pub fn with_recognizer(
        config: &'a AnalyzerConfig,
        recognizer: &'a dyn EntityRecognizer,
    ) -> Self {
        Self {
            config,
            recognizer: Some(recognizer),
        }
    }

    /// Never fails; empty or uninformative text yields an empty list.
    pub fn extract(&self, text: &str) -> Vec<LocationMention> {
        let lowered = text.to_lowercase();
        let mut mentions: Vec<LocationMention> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for pattern in self.config.lead_patterns() {
            for caps in pattern.regex().captures_iter(&lowered) {
                let (Some(full), Some(phrase)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let cut = truncate_at_terminators(phrase.as_str(), pattern.terminators());
                let raw = match pattern.span() {
                    MentionSpan::WholeMatch => {
                        let trimmed = phrase.as_str().len() - cut.len();
                        &full.as_str()[..full.as_str().len() - trimmed]
                    }
                    MentionSpan::PhraseOnly => cut,
                };
                push_unique(
                    &mut mentions,
                    &mut seen,
                    title_case(&collapse_whitespace(raw)),
                    ExtractionMethod::Pattern,
                );
            }
        }

        // Only the first kilometer marker becomes a token.
        if let Some(caps) = self.config.km_regex().captures(&lowered) {
            if let Some(number) = caps.get(1) {
                push_unique(
                    &mut mentions,
                    &mut seen,
                    format!("Km {}", number.as_str()),
                    ExtractionMethod::KmMarker,
                );
            }
        }

        for name in self.config.gazetteer() {
            if lowered.contains(name.as_str()) {
                push_unique(
                    &mut mentions,
                    &mut seen,
                    title_case(name),
                    ExtractionMethod::Gazetteer,
                );
            }
        }

        if let Some(recognizer) = self.recognizer {
            for entity in recognizer.recognize(text) {
                if entity.confidence < MIN_ENTITY_CONFIDENCE {
                    continue;
                }
                if !matches!(entity.label, EntityLabel::Place | EntityLabel::Misc) {
                    continue;
                }
                push_unique(
                    &mut mentions,
                    &mut seen,
                    title_case(&collapse_whitespace(&entity.text)),
                    ExtractionMethod::Ner,
                );
            }
        }

        mentions
    }
}

fn push_unique(
    mentions: &mut Vec<LocationMention>,
    seen: &mut HashSet<String>,
    text: String,
    method: ExtractionMethod,
) {
    if text.is_empty() {
        return;
    }
    if seen.insert(text.clone()) {
        mentions.push(LocationMention { text, method });
    }
}

/// Cuts the captured phrase at the earliest terminator word. A terminator
/// is only honored after the first character, mirroring the lazy capture
/// that requires at least one character before stopping.
fn truncate_at_terminators<'t>(phrase: &'t str, terminators: &[String]) -> &'t str {
    let start = phrase.chars().next().map(char::len_utf8).unwrap_or(0);
    let mut cut = phrase.len();
    for term in terminators {
        if let Some(pos) = phrase[start..].find(term.as_str()) {
            cut = cut.min(start + pos);
        }
    }
    &phrase[..cut]
}
