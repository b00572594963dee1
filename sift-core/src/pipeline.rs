use crate::classify::Classifier;
use crate::dedup::dedupe_candidates;
use crate::matcher::mark_duplicates;
use crate::merge::merge;
use crate::model::{PersistedSourceEntry, SourceCandidate};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outcome of running a pasted block through classification, batch dedup
/// and duplicate detection against a workspace snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub candidates: Vec<SourceCandidate>,
    /// Non-blank lines no rule recognized
    pub unrecognized: Vec<String>,
}

impl IngestReport {
    /// Candidates not already present in the workspace
    pub fn accepted(&self) -> Vec<SourceCandidate> {
        self.candidates
            .iter()
            .filter(|c| !c.is_duplicate_of_existing)
            .cloned()
            .collect()
    }

    pub fn duplicate_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| c.is_duplicate_of_existing)
            .count()
    }

    pub fn low_confidence_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_low_confidence()).count()
    }

    /// Existing entries with every accepted candidate appended
    pub fn merged_with(&self, existing: &[PersistedSourceEntry]) -> Vec<PersistedSourceEntry> {
        merge(existing, &self.accepted())
    }
}

/// Split pasted text into trimmed, non-blank lines
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

impl Classifier {
    pub fn ingest(&self, text: &str, existing: &[PersistedSourceEntry]) -> IngestReport {
        let lines = split_lines(text);
        let mut classified = Vec::with_capacity(lines.len());
        let mut unrecognized = Vec::new();
        for line in &lines {
            match self.classify(line) {
                Some(candidate) => classified.push(candidate),
                None => unrecognized.push(line.to_string()),
            }
        }

        let candidates = mark_duplicates(dedupe_candidates(classified), existing);

        info!(
            "Ingested {} lines: {} candidates, {} unrecognized",
            lines.len(),
            candidates.len(),
            unrecognized.len()
        );

        IngestReport {
            candidates,
            unrecognized,
        }
    }
}
