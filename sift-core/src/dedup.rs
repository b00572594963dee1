use crate::classify::{Classifier, DEFAULT_CLASSIFIER};
use crate::model::{SourceCandidate, SourceType};
use std::collections::HashSet;
use tracing::debug;

impl Classifier {
    /// Classify every line and keep the first candidate per
    /// (type, lower-cased label), in order of first appearance.
    pub fn dedupe_batch<S: AsRef<str>>(&self, lines: &[S]) -> Vec<SourceCandidate> {
        dedupe_candidates(lines.iter().filter_map(|line| self.classify(line.as_ref())))
    }
}

/// Keep the first candidate per (type, lower-cased label)
pub(crate) fn dedupe_candidates(
    candidates: impl IntoIterator<Item = SourceCandidate>,
) -> Vec<SourceCandidate> {
    let mut seen: HashSet<(SourceType, String)> = HashSet::new();
    let mut kept = Vec::new();

    for candidate in candidates {
        let key = (candidate.source_type, candidate.display_name.to_lowercase());
        if seen.insert(key) {
            kept.push(candidate);
        } else {
            debug!(
                "Dropping repeated {} '{}' from batch",
                candidate.source_type, candidate.display_name
            );
        }
    }

    kept
}

/// Batch dedup with the built-in pattern set
pub fn dedupe_batch<S: AsRef<str>>(lines: &[S]) -> Vec<SourceCandidate> {
    DEFAULT_CLASSIFIER.dedupe_batch(lines)
}
