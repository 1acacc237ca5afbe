use crate::config::AnalyzerConfig;
use vialert_core::SeverityScore;

const HIGH_WEIGHT: f64 = 3.0;
const MEDIUM_WEIGHT: f64 = 2.0;
const LOW_WEIGHT: f64 = 1.0;

/// Score and confidence reported when the text matches nothing: unknown,
/// assume mildly notable rather than safe.
const UNKNOWN_SCORE: f64 = 0.3;
const UNKNOWN_CONFIDENCE: f64 = 0.1;

pub struct SeverityScorer<'a> {
    config: &'a AnalyzerConfig,
}

impl<'a> SeverityScorer<'a> {
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Continuous severity in [0, 1]: the weighted share of the maximum
    /// keyword weight across the three buckets. Confidence grows with the
    /// number of distinct hits and saturates at ten.
    pub fn score(&self, text: Option<&str>) -> SeverityScore {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return SeverityScore::zero();
        };
        let lowered = text.to_lowercase();

        let high = count_hits(&lowered, self.config.high_severity());
        let medium = count_hits(&lowered, self.config.medium_severity());
        let low = count_hits(&lowered, self.config.urgency_markers());

        let total = high + medium + low;
        if total == 0 {
            return SeverityScore::new(UNKNOWN_SCORE, UNKNOWN_CONFIDENCE);
        }

        let weighted =
            HIGH_WEIGHT * high as f64 + MEDIUM_WEIGHT * medium as f64 + LOW_WEIGHT * low as f64;
        let score = (weighted / (HIGH_WEIGHT * total as f64)).clamp(0.0, 1.0);
        let confidence = (total as f64 / 10.0).min(1.0);
        SeverityScore::new(score, confidence)
    }
}

fn count_hits(lowered: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|kw| lowered.contains(kw.as_str()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vialert_core::SeverityBucket;

    fn scorer_config() -> AnalyzerConfig {
        AnalyzerConfig::new().unwrap()
    }

    #[test]
    fn test_missing_text_scores_zero() {
        let config = scorer_config();
        let scorer = SeverityScorer::new(&config);
        assert_eq!(scorer.score(None), SeverityScore::zero());
        assert_eq!(scorer.score(Some("  ")), SeverityScore::zero());
    }

    #[test]
    fn test_no_hits_defaults_to_mildly_notable() {
        let config = scorer_config();
        let scorer = SeverityScorer::new(&config);
        let score = scorer.score(Some("parada de guaguas sin novedades"));
        assert_eq!(score.score, 0.3);
        assert_eq!(score.confidence, 0.1);
        assert_eq!(score.bucket(), SeverityBucket::Low);
    }

    #[test]
    fn test_only_high_hits_saturate_score() {
        let config = scorer_config();
        let scorer = SeverityScorer::new(&config);
        let score = scorer.score(Some("fallecido tras rescate de emergencia"));
        // All hits carry the maximum weight, so the share is exactly 1.
        assert_eq!(score.score, 1.0);
        assert_eq!(score.bucket(), SeverityBucket::Severe);
    }

    #[test]
    fn test_only_urgency_hits_floor_score() {
        let config = scorer_config();
        let scorer = SeverityScorer::new(&config);
        let score = scorer.score(Some("cuidado, peligro en la vía"));
        assert!((score.score - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(score.bucket(), SeverityBucket::Moderate);
    }

    #[test]
    fn test_adding_high_keyword_never_decreases_score() {
        let config = scorer_config();
        let scorer = SeverityScorer::new(&config);
        let base = scorer.score(Some("choque con daños"));
        let plus_one = scorer.score(Some("choque con daños y heridos"));
        let plus_two = scorer.score(Some("choque con daños, heridos y un fallecido"));
        assert!(plus_one.score >= base.score);
        assert!(plus_two.score >= plus_one.score);
        assert!(plus_one.confidence >= base.confidence);
        assert!(plus_two.confidence >= plus_one.confidence);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let config = scorer_config();
        let scorer = SeverityScorer::new(&config);
        let once = scorer.score(Some("choque fuerte"));
        let thrice = scorer.score(Some("choque choque choque"));
        assert_eq!(once, thrice);
    }

    #[test]
    fn test_confidence_saturates_at_one() {
        let config = scorer_config();
        let scorer = SeverityScorer::new(&config);
        // Eleven distinct hits across the buckets.
        let text = "fallecido muerto fatal grave heridos víctima ambulancia \
                    hospital bomberos rescate emergencia";
        let score = scorer.score(Some(text));
        assert_eq!(score.confidence, 1.0);
        assert!(score.score <= 1.0);
    }

    #[test]
    fn test_emoji_urgency_marker() {
        let config = scorer_config();
        let scorer = SeverityScorer::new(&config);
        let with_siren = scorer.score(Some("🚨 volcado en la vía"));
        let without = scorer.score(Some("volcado en la vía"));
        assert!(with_siren.confidence > without.confidence);
        assert!(with_siren.score < without.score);
    }
}
