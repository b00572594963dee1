// End-to-end tests: pasted text through classification, dedup and matching

use sift_core::classify::{Classifier, Line, default_rules};
use sift_core::config::PatternConfig;
use sift_core::pipeline::split_lines;
use sift_core::{PersistedSourceEntry, Rule, SourceCandidate, SourceConfig, SourceType};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const PASTE: &str = "r/MachineLearning\nr/datascience\nhttps://blog.openai.com/feed\n@ylecun\n#AI";

fn existing_config() -> Vec<PersistedSourceEntry> {
    vec![
        PersistedSourceEntry::new(
            SourceType::Community,
            SourceConfig {
                communities: vec!["machinelearning".to_string()],
                ..Default::default()
            },
        ),
        PersistedSourceEntry::new(
            SourceType::Microblog,
            SourceConfig {
                handles: vec!["ylecun".to_string()],
                ..Default::default()
            },
        ),
    ]
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_paste_against_empty_config() {
    let report = Classifier::default().ingest(PASTE, &[]);

    assert_eq!(report.candidates.len(), 5);
    assert!(report.unrecognized.is_empty());

    let types: Vec<SourceType> = report.candidates.iter().map(|c| c.source_type).collect();
    assert_eq!(
        types,
        vec![
            SourceType::Community,
            SourceType::Community,
            SourceType::Feed,
            SourceType::Microblog,
            SourceType::Microblog,
        ]
    );
    assert_eq!(
        report.candidates[2].url.as_deref(),
        Some("https://blog.openai.com/feed")
    );
    assert_eq!(report.candidates[2].raw_value, "https://blog.openai.com/feed");
    assert!(!report.candidates[3].is_hashtag());
    assert!(report.candidates[4].is_hashtag());
    assert!(report.candidates.iter().all(|c| !c.is_duplicate_of_existing));
}

#[test]
fn test_paste_against_existing_config() {
    let classifier = Classifier::default();
    let report = classifier.ingest(PASTE, &existing_config());

    let flags: Vec<bool> = report
        .candidates
        .iter()
        .map(|c| c.is_duplicate_of_existing)
        .collect();
    assert_eq!(flags, vec![true, false, false, true, false]);
    assert_eq!(report.duplicate_count(), 2);
    assert_eq!(report.accepted().len(), 3);
}

#[test]
fn test_bare_domain_scenario() {
    let report = Classifier::default().ingest("openai.com", &[]);

    assert_eq!(report.candidates.len(), 1);
    let candidate = &report.candidates[0];
    assert_eq!(candidate.source_type, SourceType::Blog);
    assert_eq!(candidate.url.as_deref(), Some("https://openai.com"));
    assert!(candidate.note.is_some());
    assert_eq!(report.low_confidence_count(), 1);
}

#[test]
fn test_tracking_line_is_dropped_and_reported() {
    let text = "r/rust\nhttps://example.com/article?utm_source=twitter&utm_medium=social\n";
    let report = Classifier::default().ingest(text, &[]);

    assert_eq!(report.candidates.len(), 1);
    assert_eq!(report.candidates[0].source_type, SourceType::Community);
    assert_eq!(
        report.unrecognized,
        vec!["https://example.com/article?utm_source=twitter&utm_medium=social"]
    );
}

#[test]
fn test_merge_after_review_round_trip() {
    let classifier = Classifier::default();
    let existing = existing_config();

    let report = classifier.ingest(PASTE, &existing);
    let merged = report.merged_with(&existing);
    assert_eq!(merged.len(), existing.len() + report.accepted().len());

    // Pasting the same block again finds everything already configured
    let again = classifier.ingest(PASTE, &merged);
    assert_eq!(again.duplicate_count(), 5);
    assert!(again.accepted().is_empty());
}

// ============================================================================
// Line Splitting Tests
// ============================================================================

#[test]
fn test_split_lines_handles_crlf_and_blanks() {
    let lines = split_lines("r/rust\r\n\r\n  @ylecun  \n\t\n#ai");
    assert_eq!(lines, vec!["r/rust", "@ylecun", "#ai"]);
}

#[test]
fn test_empty_paste() {
    let report = Classifier::default().ingest("\n\n   \n", &[]);
    assert!(report.candidates.is_empty());
    assert!(report.unrecognized.is_empty());
}

#[test]
fn test_classifier_is_shareable_across_threads() {
    let classifier = std::sync::Arc::new(Classifier::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let classifier = classifier.clone();
            std::thread::spawn(move || classifier.ingest(PASTE, &[]).candidates.len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 5);
    }
}

// ============================================================================
// Rule Chain Tests
// ============================================================================

/// Counts the lines it sees and never claims one
struct CountingRule(Arc<AtomicUsize>);

impl Rule for CountingRule {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn apply(&self, _line: &Line<'_>, _patterns: &PatternConfig) -> Option<SourceCandidate> {
        self.0.fetch_add(1, Ordering::SeqCst);
        None
    }
}

#[test]
fn test_ingest_classifies_each_line_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut rules: Vec<Box<dyn Rule>> = vec![Box::new(CountingRule(calls.clone()))];
    rules.extend(default_rules());
    let classifier = Classifier::with_rules(PatternConfig::default(), rules);

    let report = classifier.ingest("r/rust\nnonsense\nr/rust\n\n", &[]);

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(report.candidates.len(), 1);
    assert_eq!(report.unrecognized, vec!["nonsense"]);
}
