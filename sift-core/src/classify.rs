// Line classifier: an ordered chain of rules, first match wins.
//
// Order is significant. A channel URL is also a generic URL and a feed URL
// may also look like a blog URL, so the narrower rules run first.

use crate::config::PatternConfig;
use crate::display::{GUESSED_BLOG_NOTE, GUESSED_FEED_NOTE, channel_label, clean_domain};
use crate::ignore::should_ignore;
use crate::model::{SourceCandidate, SourceType};
use crate::normalize::normalize_bare_domain;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::{debug, trace};
use url::Url;

static COMMUNITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/?r/([A-Za-z0-9_]+)$").unwrap());
static HANDLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@([A-Za-z0-9_]+)$").unwrap());
static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#([A-Za-z0-9_]+)$").unwrap());
static CHANNEL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^UC[A-Za-z0-9_-]{22}$").unwrap());

/// A trimmed input line and its bare-domain-promoted form
pub struct Line<'a> {
    pub raw: &'a str,
    pub text: Cow<'a, str>,
}

impl<'a> Line<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            text: normalize_bare_domain(raw),
        }
    }

    /// The line as an http(s) URL with a host, if it is one
    fn http_url(&self) -> Option<Url> {
        let lowered = self.text.to_ascii_lowercase();
        if !lowered.starts_with("http://") && !lowered.starts_with("https://") {
            return None;
        }
        let parsed = Url::parse(&self.text).ok()?;
        parsed.host_str()?;
        Some(parsed)
    }
}

pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, line: &Line<'_>, patterns: &PatternConfig) -> Option<SourceCandidate>;
}

/// `r/name` or `/r/name`
pub struct CommunityRule;

impl Rule for CommunityRule {
    fn name(&self) -> &'static str {
        "community"
    }

    fn apply(&self, line: &Line<'_>, _patterns: &PatternConfig) -> Option<SourceCandidate> {
        let caps = COMMUNITY_RE.captures(line.raw)?;
        let name = &caps[1];
        Some(SourceCandidate::new(
            SourceType::Community,
            name,
            name.to_lowercase(),
            format!("r/{}", name),
        ))
    }
}

/// `@handle` and `#hashtag`
pub struct MicroblogRule;

impl Rule for MicroblogRule {
    fn name(&self) -> &'static str {
        "microblog"
    }

    fn apply(&self, line: &Line<'_>, _patterns: &PatternConfig) -> Option<SourceCandidate> {
        // Handles are kept without `@`, hashtags keep `#`
        let raw = if let Some(caps) = HANDLE_RE.captures(line.raw) {
            caps.get(1)?.as_str()
        } else if HASHTAG_RE.is_match(line.raw) {
            line.raw
        } else {
            return None;
        };
        Some(SourceCandidate::new(
            SourceType::Microblog,
            raw,
            line.raw.to_lowercase(),
            line.raw,
        ))
    }
}

/// Bare 24-character channel id
pub struct ChannelIdRule;

impl Rule for ChannelIdRule {
    fn name(&self) -> &'static str {
        "channel-id"
    }

    fn apply(&self, line: &Line<'_>, _patterns: &PatternConfig) -> Option<SourceCandidate> {
        if !CHANNEL_ID_RE.is_match(line.raw) {
            return None;
        }
        Some(SourceCandidate::new(
            SourceType::VideoChannel,
            line.raw,
            line.raw,
            channel_label(line.raw),
        ))
    }
}

/// Video platform URL in one of the four channel shapes
pub struct ChannelUrlRule;

impl ChannelUrlRule {
    /// (identity, label) for the accepted path shapes
    fn channel_identity(segments: &[&str]) -> Option<(String, String)> {
        match segments {
            [handle, ..] if handle.len() > 1 && handle.starts_with('@') => {
                Some((handle.to_lowercase(), handle.to_string()))
            }
            ["channel", id, ..] if CHANNEL_ID_RE.is_match(id) => {
                Some((id.to_string(), channel_label(id)))
            }
            [prefix @ ("c" | "user"), name, ..] if !name.is_empty() => {
                let shape = format!("{}/{}", prefix, name);
                Some((shape.to_lowercase(), shape))
            }
            _ => None,
        }
    }
}

impl Rule for ChannelUrlRule {
    fn name(&self) -> &'static str {
        "channel-url"
    }

    fn apply(&self, line: &Line<'_>, patterns: &PatternConfig) -> Option<SourceCandidate> {
        let url = line.http_url()?;
        if !patterns.is_video_host(url.host_str()?) {
            return None;
        }
        let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
        let (identity, label) = Self::channel_identity(&segments)?;
        Some(
            SourceCandidate::new(SourceType::VideoChannel, line.raw, identity, label)
                .with_url(line.text.as_ref()),
        )
    }
}

/// URL with an explicit feed marker. The URL is kept exactly as given.
pub struct FeedUrlRule;

impl Rule for FeedUrlRule {
    fn name(&self) -> &'static str {
        "feed-url"
    }

    fn apply(&self, line: &Line<'_>, patterns: &PatternConfig) -> Option<SourceCandidate> {
        let url = line.http_url()?;
        if should_ignore(&line.text, patterns) {
            return None;
        }
        let path = url.path().to_lowercase();
        let has_marker = patterns
            .feed_markers
            .iter()
            .any(|m| path.contains(m.to_lowercase().as_str()));
        let has_extension = patterns
            .feed_extensions
            .iter()
            .any(|ext| path.ends_with(ext.to_lowercase().as_str()));
        if !has_marker && !has_extension {
            return None;
        }
        Some(url_candidate(SourceType::Feed, line, &line.text))
    }
}

/// Blog subdomain, `/blog` or `/news` in the path, or `.blog` TLD
pub struct BlogUrlRule;

impl Rule for BlogUrlRule {
    fn name(&self) -> &'static str {
        "blog-url"
    }

    fn apply(&self, line: &Line<'_>, patterns: &PatternConfig) -> Option<SourceCandidate> {
        let url = line.http_url()?;
        if should_ignore(&line.text, patterns) {
            return None;
        }
        let host = url.host_str()?.to_lowercase();
        let labels: Vec<&str> = host.split('.').collect();
        let (tld, subdomains) = labels.split_last()?;

        let blog_host = subdomains.iter().any(|label| {
            patterns
                .blog_host_labels
                .iter()
                .any(|b| b.eq_ignore_ascii_case(label))
        });
        let blog_tld = !subdomains.is_empty() && tld.eq_ignore_ascii_case(&patterns.blog_tld);
        let path = url.path().to_lowercase();
        let blog_path = patterns
            .blog_path_segments
            .iter()
            .any(|segment| path.contains(&format!("/{}", segment.to_lowercase())));

        if !(blog_host || blog_tld || blog_path) {
            return None;
        }
        Some(url_candidate(SourceType::Blog, line, &line.text))
    }
}

/// Last resort for any remaining URL. A bare homepage is guessed to be a
/// blog, anything with a path is guessed to be a feed.
pub struct FallbackUrlRule;

impl FallbackUrlRule {
    fn synthesize_feed_url(text: &str, url: &Url) -> String {
        if url.query().is_none() && url.fragment().is_none() {
            if text.ends_with('/') {
                format!("{}feed", text)
            } else {
                format!("{}/feed", text)
            }
        } else {
            let mut feed_url = url.clone();
            let path = format!("{}/feed", url.path().trim_end_matches('/'));
            feed_url.set_path(&path);
            feed_url.to_string()
        }
    }
}

impl Rule for FallbackUrlRule {
    fn name(&self) -> &'static str {
        "fallback-url"
    }

    fn apply(&self, line: &Line<'_>, patterns: &PatternConfig) -> Option<SourceCandidate> {
        let url = line.http_url()?;
        if should_ignore(&line.text, patterns) {
            return None;
        }
        if url.path() == "/" {
            Some(url_candidate(SourceType::Blog, line, &line.text).with_note(GUESSED_BLOG_NOTE))
        } else {
            let feed_url = Self::synthesize_feed_url(&line.text, &url);
            let mut candidate =
                url_candidate(SourceType::Feed, line, &feed_url).with_note(GUESSED_FEED_NOTE);
            candidate.display_name = clean_domain(&line.text);
            Some(candidate)
        }
    }
}

fn url_candidate(source_type: SourceType, line: &Line<'_>, endpoint: &str) -> SourceCandidate {
    SourceCandidate::new(
        source_type,
        line.raw,
        endpoint.to_lowercase(),
        clean_domain(endpoint),
    )
    .with_url(endpoint)
}

pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(CommunityRule),
        Box::new(MicroblogRule),
        Box::new(ChannelIdRule),
        Box::new(ChannelUrlRule),
        Box::new(FeedUrlRule),
        Box::new(BlogUrlRule),
        Box::new(FallbackUrlRule),
    ]
}

pub struct Classifier {
    patterns: PatternConfig,
    rules: Vec<Box<dyn Rule>>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(PatternConfig::default())
    }
}

impl Classifier {
    pub fn new(patterns: PatternConfig) -> Self {
        Self::with_rules(patterns, default_rules())
    }

    pub fn with_rules(patterns: PatternConfig, rules: Vec<Box<dyn Rule>>) -> Self {
        Self { patterns, rules }
    }

    pub fn patterns(&self) -> &PatternConfig {
        &self.patterns
    }

    pub fn should_ignore(&self, url: &str) -> bool {
        should_ignore(url, &self.patterns)
    }

    /// Classify one line. Blank or unrecognized input yields `None`.
    pub fn classify(&self, line: &str) -> Option<SourceCandidate> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let line = Line::new(trimmed);

        for rule in &self.rules {
            trace!("Trying rule {} on '{}'", rule.name(), trimmed);
            if let Some(candidate) = rule.apply(&line, &self.patterns) {
                debug!(
                    "'{}' classified as {} by rule {}",
                    trimmed,
                    candidate.source_type,
                    rule.name()
                );
                return Some(candidate);
            }
        }

        debug!("No rule matched '{}'", trimmed);
        None
    }
}

pub(crate) static DEFAULT_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(Classifier::default);

/// Classify with the built-in pattern set
pub fn classify(line: &str) -> Option<SourceCandidate> {
    DEFAULT_CLASSIFIER.classify(line)
}
