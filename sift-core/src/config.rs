// Pattern sets driving the ignore list and the URL rules of the classifier

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_PATTERNS_FILE: &str = "patterns.json";

/// Every list the classifier consults. Fields missing from a pattern file
/// fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Substrings anywhere in a URL that mark it as non-content
    pub ignore_markers: Vec<String>,
    /// Substrings of a host that mark CDN or static-asset servers
    pub ignore_hosts: Vec<String>,
    /// Path suffixes of binary, script and style resources
    pub ignore_extensions: Vec<String>,
    pub feed_markers: Vec<String>,
    pub feed_extensions: Vec<String>,
    pub blog_host_labels: Vec<String>,
    pub blog_path_segments: Vec<String>,
    pub blog_tld: String,
    /// Hosts of the video platform, without `www.`/`m.`
    pub video_hosts: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            ignore_markers: strings(&[
                "utm_", "fbclid=", "gclid=", "mc_cid=", "?ref=", "&ref=", "cookie", "privacy",
                "terms",
            ]),
            ignore_hosts: strings(&[
                "cdn.",
                "static.",
                "assets.",
                "cloudfront.net",
                "akamaihd.net",
                "googleusercontent.com",
                "gstatic.com",
            ]),
            ignore_extensions: strings(&[
                ".js", ".css", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".ico", ".woff",
                ".woff2", ".ttf", ".pdf", ".zip", ".mp3", ".mp4",
            ]),
            feed_markers: strings(&["/feed", "/rss", "/atom"]),
            feed_extensions: strings(&[".xml", ".rss", ".atom"]),
            blog_host_labels: strings(&["blog", "blogs"]),
            blog_path_segments: strings(&["blog", "news"]),
            blog_tld: "blog".to_string(),
            video_hosts: strings(&["youtube.com"]),
        }
    }
}

impl PatternConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let patterns = serde_json::from_str(&content)?;
        debug!("Loaded pattern config from {}", path.display());
        Ok(patterns)
    }

    /// Built-in defaults when `path` does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No pattern config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn is_video_host(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        let host = host
            .strip_prefix("www.")
            .or_else(|| host.strip_prefix("m."))
            .unwrap_or(&host);
        self.video_hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }
}
