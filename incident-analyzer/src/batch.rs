//! Whole-table analysis. Records are independent, so the work fans out
//! across the rayon pool; collection preserves input order, which keeps
//! every first-seen tie-break in the report stable.

use crate::analyzer::IncidentAnalyzer;
use crate::report::AggregateReport;
use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use tracing::{info, warn};
use vialert_core::{AnalysisResult, EnrichedRecord, Post};

pub struct BatchOutput {
    pub records: Vec<EnrichedRecord>,
    pub report: AggregateReport,
}

impl IncidentAnalyzer {
    /// Analyzes every post, isolating per-record faults: a record whose
    /// analysis panics is downgraded to defaults and the batch continues.
    pub fn analyze_batch(&self, posts: &[Post]) -> BatchOutput {
        let started = Instant::now();

        let analyzed: Vec<(AnalysisResult, bool)> = posts
            .par_iter()
            .map(
                |post| match catch_unwind(AssertUnwindSafe(|| self.analyze_post(post))) {
                    Ok(analysis) => (analysis, false),
                    Err(_) => {
                        warn!(
                            "Analysis of post {} faulted; record downgraded to defaults",
                            post.id
                        );
                        (AnalysisResult::fallback(), true)
                    }
                },
            )
            .collect();

        let failed_records = analyzed.iter().filter(|(_, failed)| *failed).count() as u64;
        let records: Vec<EnrichedRecord> = posts
            .iter()
            .zip(&analyzed)
            .map(|(post, (analysis, _))| EnrichedRecord::from_analysis(post.clone(), analysis))
            .collect();

        let report = AggregateReport::from_records(&records, failed_records);
        info!(
            "Batch analysis finished: {} records, {} faulted, {} alerts in {:?}",
            records.len(),
            failed_records,
            report.posts_require_alert,
            started.elapsed()
        );

        BatchOutput { records, report }
    }
}
