use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceType {
    Community,
    Feed,
    Microblog,
    VideoChannel,
    Blog,
}

/// Every tag a stored entry may carry. Older clients wrote microblog
/// sources as `twitter`; both spellings resolve to the same variant.
const TAG_TABLE: &[(&str, SourceType)] = &[
    ("community", SourceType::Community),
    ("feed", SourceType::Feed),
    ("microblog", SourceType::Microblog),
    ("twitter", SourceType::Microblog),
    ("videoChannel", SourceType::VideoChannel),
    ("blog", SourceType::Blog),
];

impl SourceType {
    pub const ALL: [SourceType; 5] = [
        SourceType::Community,
        SourceType::Feed,
        SourceType::Microblog,
        SourceType::VideoChannel,
        SourceType::Blog,
    ];

    /// Canonical tag written to storage
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Community => "community",
            SourceType::Feed => "feed",
            SourceType::Microblog => "microblog",
            SourceType::VideoChannel => "videoChannel",
            SourceType::Blog => "blog",
        }
    }

    /// Resolve a stored tag, canonical or legacy, to its variant
    pub fn from_tag(tag: &str) -> Option<Self> {
        TAG_TABLE
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(tag.trim()))
            .map(|(_, source_type)| *source_type)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceType::Community => "Community",
            SourceType::Feed => "RSS feed",
            SourceType::Microblog => "Microblog",
            SourceType::VideoChannel => "Video channel",
            SourceType::Blog => "Blog",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified line of user input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCandidate {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    /// The value as entered. URLs are kept exactly; communities lose their
    /// `r/` prefix and handles their `@`.
    pub raw_value: String,
    /// Identity used for equality, derived only from the input and the type
    pub normalized_value: String,
    pub display_name: String,
    /// Endpoint persisted for URL-based sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Caveat attached when the type was guessed
    pub note: Option<String>,
    #[serde(default)]
    pub is_duplicate_of_existing: bool,
}

impl SourceCandidate {
    pub fn new(
        source_type: SourceType,
        raw_value: impl Into<String>,
        normalized_value: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            source_type,
            raw_value: raw_value.into(),
            normalized_value: normalized_value.into(),
            display_name: display_name.into(),
            url: None,
            note: None,
            is_duplicate_of_existing: false,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_low_confidence(&self) -> bool {
        self.note.is_some()
    }

    pub fn is_hashtag(&self) -> bool {
        self.source_type == SourceType::Microblog && self.normalized_value.starts_with('#')
    }

    /// Key compared against stored entries. Handles drop their `@`;
    /// hashtags keep `#` so the two never collide.
    pub fn identity(&self) -> &str {
        match self.source_type {
            SourceType::Microblog => self
                .normalized_value
                .strip_prefix('@')
                .unwrap_or(&self.normalized_value),
            _ => &self.normalized_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDescriptor {
    pub url: String,
    #[serde(default)]
    pub name: String,
}

/// Type-specific payload of a stored entry. Fields this crate does not
/// know about are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub communities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feeds: Vec<FeedDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub handles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_enabled() -> bool {
    true
}

/// Durable form of a source, as stored in a workspace configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSourceEntry {
    /// Stored tag, kept verbatim so legacy spellings round-trip
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub config: SourceConfig,
}

impl PersistedSourceEntry {
    pub fn new(source_type: SourceType, config: SourceConfig) -> Self {
        Self {
            source_type: source_type.as_str().to_string(),
            enabled: true,
            config,
        }
    }

    pub fn canonical_type(&self) -> Option<SourceType> {
        SourceType::from_tag(&self.source_type)
    }

    /// Values listed under the field that belongs to `source_type`
    pub fn values_for(&self, source_type: SourceType) -> Vec<&str> {
        match source_type {
            SourceType::Community => self.config.communities.iter().map(String::as_str).collect(),
            SourceType::Feed => self.config.feeds.iter().map(|f| f.url.as_str()).collect(),
            SourceType::Microblog => self.config.handles.iter().map(String::as_str).collect(),
            SourceType::VideoChannel => self.config.channels.iter().map(String::as_str).collect(),
            SourceType::Blog => self.config.urls.iter().map(String::as_str).collect(),
        }
    }
}
