// Rejects URLs that point at tracking links, legal pages and static assets

use crate::config::PatternConfig;
use tracing::debug;
use url::Url;

pub fn should_ignore(url: &str, patterns: &PatternConfig) -> bool {
    let lowered = url.to_lowercase();

    if let Some(marker) = patterns
        .ignore_markers
        .iter()
        .find(|m| lowered.contains(m.to_lowercase().as_str()))
    {
        debug!("Ignoring {} (marker '{}')", url, marker);
        return true;
    }

    let (host, path) = match Url::parse(&lowered) {
        Ok(parsed) => (
            parsed.host_str().unwrap_or_default().to_string(),
            parsed.path().to_string(),
        ),
        // Unparseable: strip query and fragment by hand and check the suffix only
        Err(_) => (
            String::new(),
            lowered
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_string(),
        ),
    };

    if !host.is_empty()
        && let Some(marker) = patterns
            .ignore_hosts
            .iter()
            .find(|m| host.contains(m.to_lowercase().as_str()))
    {
        debug!("Ignoring {} (host marker '{}')", url, marker);
        return true;
    }

    if let Some(ext) = patterns
        .ignore_extensions
        .iter()
        .find(|ext| path.ends_with(ext.to_lowercase().as_str()))
    {
        debug!("Ignoring {} (extension '{}')", url, ext);
        return true;
    }

    false
}
