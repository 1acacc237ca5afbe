use crate::config::AnalyzerConfig;
use vialert_core::IncidentCategory;

pub struct IncidentClassifier<'a> {
    config: &'a AnalyzerConfig,
}

impl<'a> IncidentClassifier<'a> {
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Counts distinct keyword hits per category and keeps the strict
    /// maximum. Ties fall to the category declared first. No hits at all
    /// is `Other`; missing or empty text is `Unclassified`.
    pub fn classify(&self, text: Option<&str>) -> IncidentCategory {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return IncidentCategory::Unclassified;
        };
        let lowered = text.to_lowercase();

        let mut best = IncidentCategory::Other;
        let mut best_count = 0usize;
        for (category, keywords) in self.config.categories() {
            let count = keywords
                .iter()
                .filter(|kw| lowered.contains(kw.as_str()))
                .count();
            if count > best_count {
                best = *category;
                best_count = count;
            }
        }
        best
    }
}
