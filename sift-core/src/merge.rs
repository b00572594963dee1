// Turns accepted candidates into stored entries

use crate::model::{FeedDescriptor, PersistedSourceEntry, SourceCandidate, SourceConfig, SourceType};

/// Stored shape of a single candidate
pub fn to_entry(candidate: &SourceCandidate) -> PersistedSourceEntry {
    let endpoint = || {
        candidate
            .url
            .clone()
            .unwrap_or_else(|| candidate.raw_value.clone())
    };

    let config = match candidate.source_type {
        SourceType::Community => SourceConfig {
            communities: vec![candidate.identity().to_string()],
            ..Default::default()
        },
        SourceType::Feed => SourceConfig {
            feeds: vec![FeedDescriptor {
                url: endpoint(),
                name: candidate.display_name.clone(),
            }],
            ..Default::default()
        },
        SourceType::Microblog => SourceConfig {
            handles: vec![candidate.identity().to_string()],
            ..Default::default()
        },
        SourceType::VideoChannel => SourceConfig {
            channels: vec![candidate.identity().to_string()],
            ..Default::default()
        },
        SourceType::Blog => SourceConfig {
            urls: vec![endpoint()],
            ..Default::default()
        },
    };

    PersistedSourceEntry::new(candidate.source_type, config)
}

/// Append one entry per accepted candidate to a copy of `existing`.
///
/// Duplicate suppression is the caller's job; every candidate passed in is
/// appended.
pub fn merge(
    existing: &[PersistedSourceEntry],
    accepted: &[SourceCandidate],
) -> Vec<PersistedSourceEntry> {
    let mut merged = Vec::with_capacity(existing.len() + accepted.len());
    merged.extend_from_slice(existing);
    merged.extend(accepted.iter().map(to_entry));
    merged
}
