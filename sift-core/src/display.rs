// Human-facing labels and caveats for classified sources

use url::Url;

pub const GUESSED_FEED_NOTE: &str = "Auto-detected as RSS feed, please verify";
pub const GUESSED_BLOG_NOTE: &str = "Auto-detected as blog, please verify";

/// Short label for a site URL. Only ever shown to the user; identity
/// comparisons use the classifier's normalized value.
pub fn clean_domain(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return url.to_string();
    };
    let host = host.strip_prefix("www.").unwrap_or(host);
    let path = parsed.path().to_lowercase();

    if path.contains("/blog") {
        format!("{}/blog", host)
    } else if path.contains("/feed") {
        host.to_string()
    } else if let Some(segment) = parsed
        .path_segments()
        .and_then(|mut segments| segments.next())
        .filter(|segment| !segment.is_empty())
    {
        format!("{}/{}", host, segment)
    } else {
        host.to_string()
    }
}

pub fn channel_label(channel_id: &str) -> String {
    format!("Channel {}", channel_id)
}
