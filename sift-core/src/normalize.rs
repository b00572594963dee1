use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Dot-separated labels ending in an alphabetic TLD. No scheme, port,
/// path, whitespace or markup can get through.
static BARE_DOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z0-9_-]+\.)+[A-Za-z]{2,}$").unwrap());

/// Promote `openai.com` to `https://openai.com`. Anything else is returned
/// byte-for-byte.
pub fn normalize_bare_domain(line: &str) -> Cow<'_, str> {
    if !line.starts_with("http") && BARE_DOMAIN_RE.is_match(line) {
        Cow::Owned(format!("https://{}", line))
    } else {
        Cow::Borrowed(line)
    }
}
