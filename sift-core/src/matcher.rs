// Flags candidates that a workspace already has configured

use crate::model::{PersistedSourceEntry, SourceCandidate, SourceType};
use tracing::debug;

/// Bring a stored value to the same shape as `SourceCandidate::identity`
fn stored_identity(source_type: SourceType, value: &str) -> String {
    let value = value.trim();
    let value = match source_type {
        SourceType::Community => {
            let name = value.strip_prefix('/').unwrap_or(value);
            name.strip_prefix("r/").unwrap_or(name)
        }
        SourceType::Microblog => value.strip_prefix('@').unwrap_or(value),
        SourceType::Feed | SourceType::VideoChannel | SourceType::Blog => value,
    };
    value.to_lowercase()
}

fn is_configured(candidate: &SourceCandidate, existing: &[PersistedSourceEntry]) -> bool {
    let identity = candidate.identity().to_lowercase();
    existing
        .iter()
        .filter(|entry| entry.canonical_type() == Some(candidate.source_type))
        .flat_map(|entry| entry.values_for(candidate.source_type))
        .any(|value| stored_identity(candidate.source_type, value) == identity)
}

/// Set `is_duplicate_of_existing` on every candidate already present in
/// `existing`. Nothing is removed; the caller decides what to do with
/// flagged candidates.
pub fn mark_duplicates(
    candidates: Vec<SourceCandidate>,
    existing: &[PersistedSourceEntry],
) -> Vec<SourceCandidate> {
    candidates
        .into_iter()
        .map(|mut candidate| {
            candidate.is_duplicate_of_existing = is_configured(&candidate, existing);
            if candidate.is_duplicate_of_existing {
                debug!(
                    "{} '{}' is already configured",
                    candidate.source_type, candidate.display_name
                );
            }
            candidate
        })
        .collect()
}
