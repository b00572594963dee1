// Tests for line classification

use sift_core::classify::Classifier;
use sift_core::config::PatternConfig;
use sift_core::display::{GUESSED_BLOG_NOTE, GUESSED_FEED_NOTE};
use sift_core::ignore::should_ignore;
use sift_core::{SourceType, classify};

// ============================================================================
// Community Tests
// ============================================================================

#[test]
fn test_community_with_and_without_leading_slash() {
    for input in ["r/MachineLearning", "/r/MachineLearning"] {
        let candidate = classify(input).unwrap();
        assert_eq!(candidate.source_type, SourceType::Community);
        assert_eq!(candidate.normalized_value, "machinelearning");
        assert_eq!(candidate.display_name, "r/MachineLearning");
        assert_eq!(candidate.raw_value, "MachineLearning");
        assert!(candidate.note.is_none());
        assert!(!candidate.is_duplicate_of_existing);
    }
}

#[test]
fn test_community_underscores_and_digits() {
    let candidate = classify("r/rust_gamedev2").unwrap();
    assert_eq!(candidate.normalized_value, "rust_gamedev2");
}

#[test]
fn test_community_rejects_extra_path() {
    // Not a community reference and not a URL either
    assert!(classify("r/rust/comments").is_none());
    assert!(classify("r/").is_none());
}

#[test]
fn test_surrounding_whitespace_is_trimmed() {
    let candidate = classify("   r/rust \t").unwrap();
    assert_eq!(candidate.raw_value, "rust");
    assert_eq!(candidate.normalized_value, "rust");
}

// ============================================================================
// Microblog Tests
// ============================================================================

#[test]
fn test_handle() {
    let candidate = classify("@ylecun").unwrap();
    assert_eq!(candidate.source_type, SourceType::Microblog);
    assert_eq!(candidate.normalized_value, "@ylecun");
    assert_eq!(candidate.display_name, "@ylecun");
    assert_eq!(candidate.raw_value, "ylecun");
    assert!(!candidate.is_hashtag());
}

#[test]
fn test_handle_raw_value_keeps_case() {
    let candidate = classify("@YLeCun").unwrap();
    assert_eq!(candidate.raw_value, "YLeCun");
    assert_eq!(candidate.normalized_value, "@ylecun");
}

#[test]
fn test_hashtag_keeps_sigil() {
    let candidate = classify("#AI").unwrap();
    assert_eq!(candidate.source_type, SourceType::Microblog);
    assert_eq!(candidate.normalized_value, "#ai");
    assert_eq!(candidate.raw_value, "#AI");
    assert!(candidate.is_hashtag());
}

#[test]
fn test_handle_and_hashtag_are_distinct_identities() {
    let handle = classify("@rust").unwrap();
    let hashtag = classify("#rust").unwrap();
    assert_ne!(handle.normalized_value, hashtag.normalized_value);
    assert_ne!(handle.identity(), hashtag.identity());
}

#[test]
fn test_handle_with_spaces_is_rejected() {
    assert!(classify("@two words").is_none());
    assert!(classify("#").is_none());
}

// ============================================================================
// Video Channel Tests
// ============================================================================

const CHANNEL_ID: &str = "UC_x5XG1OV2P6uZZ5FSM9Ttw";

#[test]
fn test_bare_channel_id() {
    let candidate = classify(CHANNEL_ID).unwrap();
    assert_eq!(candidate.source_type, SourceType::VideoChannel);
    assert_eq!(candidate.normalized_value, CHANNEL_ID);
    assert!(candidate.url.is_none());
}

#[test]
fn test_channel_id_wrong_length_is_not_a_channel() {
    assert!(classify("UC_x5XG1OV2P6uZZ5FSM9Tt").is_none());
}

#[test]
fn test_channel_url_shapes() {
    let cases = [
        ("https://www.youtube.com/@Fireship", "@fireship"),
        ("https://youtube.com/@Fireship/videos", "@fireship"),
        ("https://m.youtube.com/c/LexFridman", "c/lexfridman"),
        ("https://www.youtube.com/user/sentdex", "user/sentdex"),
        (
            "https://www.youtube.com/channel/UC_x5XG1OV2P6uZZ5FSM9Ttw",
            CHANNEL_ID,
        ),
    ];
    for (input, identity) in cases {
        let candidate = classify(input).unwrap();
        assert_eq!(candidate.source_type, SourceType::VideoChannel, "{input}");
        assert_eq!(candidate.normalized_value, identity, "{input}");
        assert_eq!(candidate.url.as_deref(), Some(input));
    }
}

#[test]
fn test_channel_url_and_bare_id_share_label() {
    let from_url = classify("https://www.youtube.com/channel/UC_x5XG1OV2P6uZZ5FSM9Ttw").unwrap();
    let from_id = classify(CHANNEL_ID).unwrap();
    assert_eq!(from_url.display_name, from_id.display_name);
    assert_eq!(from_url.identity(), from_id.identity());
}

#[test]
fn test_video_url_without_channel_shape_falls_through() {
    let candidate = classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
    assert_ne!(candidate.source_type, SourceType::VideoChannel);
    assert_eq!(candidate.source_type, SourceType::Feed);
    assert!(candidate.note.is_some());
}

// ============================================================================
// Feed Tests
// ============================================================================

#[test]
fn test_explicit_feed_url_is_preserved() {
    let input = "https://Blog.OpenAI.com/feed";
    let candidate = classify(input).unwrap();
    assert_eq!(candidate.source_type, SourceType::Feed);
    assert_eq!(candidate.raw_value, input);
    assert_eq!(candidate.url.as_deref(), Some(input));
    assert_eq!(candidate.normalized_value, "https://blog.openai.com/feed");
    assert!(candidate.note.is_none());
}

#[test]
fn test_feed_extensions() {
    for input in [
        "https://example.com/index.xml",
        "https://example.com/posts.rss",
        "https://example.com/atom",
    ] {
        assert_eq!(classify(input).unwrap().source_type, SourceType::Feed, "{input}");
    }
}

#[test]
fn test_feed_takes_precedence_over_blog() {
    let candidate = classify("https://example.com/blog/rss").unwrap();
    assert_eq!(candidate.source_type, SourceType::Feed);
    assert!(candidate.note.is_none());

    let candidate = classify("https://blog.example.com/rss").unwrap();
    assert_eq!(candidate.source_type, SourceType::Feed);
}

// ============================================================================
// Blog Tests
// ============================================================================

#[test]
fn test_blog_signals() {
    for input in [
        "https://blog.example.com/",
        "https://blogs.example.com/engineering",
        "https://example.com/blog",
        "https://example.com/company/news/2024",
        "https://anthropic.blog/",
    ] {
        let candidate = classify(input).unwrap();
        assert_eq!(candidate.source_type, SourceType::Blog, "{input}");
        assert!(candidate.note.is_none(), "{input}");
        assert_eq!(candidate.url.as_deref(), Some(input));
    }
}

#[test]
fn test_blog_marker_inside_longer_segment() {
    let candidate = classify("https://example.com/blog-posts/x").unwrap();
    assert_eq!(candidate.source_type, SourceType::Blog);
    assert!(candidate.note.is_none());
    assert_eq!(
        candidate.url.as_deref(),
        Some("https://example.com/blog-posts/x")
    );
    assert_eq!(candidate.display_name, "example.com/blog");

    let candidate = classify("https://example.com/newsroom").unwrap();
    assert_eq!(candidate.source_type, SourceType::Blog);
    assert_eq!(candidate.url.as_deref(), Some("https://example.com/newsroom"));
    assert_eq!(candidate.display_name, "example.com/newsroom");
}

#[test]
fn test_blog_label_uses_cleaned_domain() {
    let candidate = classify("https://www.example.com/blog/hello-world").unwrap();
    assert_eq!(candidate.display_name, "example.com/blog");
}

// ============================================================================
// Fallback Tests
// ============================================================================

#[test]
fn test_fallback_trivial_path_is_blog() {
    let candidate = classify("https://example.com/").unwrap();
    assert_eq!(candidate.source_type, SourceType::Blog);
    assert_eq!(candidate.note.as_deref(), Some(GUESSED_BLOG_NOTE));
    assert_eq!(candidate.url.as_deref(), Some("https://example.com/"));
}

#[test]
fn test_fallback_nontrivial_path_is_guessed_feed() {
    let candidate = classify("https://example.com/articles/today").unwrap();
    assert_eq!(candidate.source_type, SourceType::Feed);
    assert_eq!(candidate.note.as_deref(), Some(GUESSED_FEED_NOTE));
    assert_eq!(
        candidate.url.as_deref(),
        Some("https://example.com/articles/today/feed")
    );
    assert_eq!(candidate.raw_value, "https://example.com/articles/today");
    assert_eq!(candidate.display_name, "example.com/articles");
}

#[test]
fn test_fallback_trailing_slash_appends_feed_only() {
    let candidate = classify("https://example.com/articles/").unwrap();
    assert_eq!(
        candidate.url.as_deref(),
        Some("https://example.com/articles/feed")
    );
}

#[test]
fn test_bare_domain_is_promoted_then_guessed_blog() {
    let candidate = classify("openai.com").unwrap();
    assert_eq!(candidate.source_type, SourceType::Blog);
    assert_eq!(candidate.raw_value, "openai.com");
    assert_eq!(candidate.url.as_deref(), Some("https://openai.com"));
    assert_eq!(candidate.display_name, "openai.com");
    assert!(candidate.note.is_some());
}

// ============================================================================
// Rejection Tests
// ============================================================================

#[test]
fn test_blank_lines_yield_nothing() {
    assert!(classify("").is_none());
    assert!(classify("   \t ").is_none());
}

#[test]
fn test_free_text_yields_nothing() {
    assert!(classify("hello world").is_none());
    assert!(classify("localhost").is_none());
    assert!(classify("ftp://example.com/feed").is_none());
    assert!(classify("<script>alert(1)</script>").is_none());
    assert!(classify("javascript:alert(1)").is_none());
}

#[test]
fn test_malformed_url_falls_through_to_nothing() {
    assert!(classify("https://").is_none());
    assert!(classify("http://exa mple.com/feed").is_none());
}

#[test]
fn test_tracking_url_yields_nothing() {
    assert!(classify("https://example.com/post?utm_source=newsletter").is_none());
    assert!(classify("https://example.com/privacy").is_none());
    assert!(classify("https://cdn.example.com/feed").is_none());
    assert!(classify("https://example.com/static/app.css").is_none());
}

// ============================================================================
// Determinism Tests
// ============================================================================

#[test]
fn test_classification_is_idempotent() {
    for input in [
        "r/MachineLearning",
        "@ylecun",
        "#AI",
        CHANNEL_ID,
        "https://www.youtube.com/@Fireship",
        "https://blog.openai.com/feed",
        "https://example.com/blog",
        "https://example.com/articles/today",
        "openai.com",
    ] {
        assert_eq!(classify(input), classify(input), "{input}");
    }
}

// ============================================================================
// Pattern Injection Tests
// ============================================================================

#[test]
fn test_custom_feed_marker() {
    let mut patterns = PatternConfig::default();
    patterns.feed_markers.push("/podcast".to_string());
    let classifier = Classifier::new(patterns);

    let candidate = classifier.classify("https://example.com/podcast").unwrap();
    assert_eq!(candidate.source_type, SourceType::Feed);
    assert!(candidate.note.is_none());

    // The default set still guesses
    assert!(classify("https://example.com/podcast").unwrap().note.is_some());
}

#[test]
fn test_custom_ignore_marker() {
    let mut patterns = PatternConfig::default();
    patterns.ignore_hosts.push("medium.com".to_string());
    let classifier = Classifier::new(patterns);

    assert!(classifier.should_ignore("https://medium.com/@someone"));
    assert!(classifier.classify("https://medium.com/feed/@someone").is_none());
}

#[test]
fn test_should_ignore_defaults() {
    let patterns = PatternConfig::default();
    assert!(should_ignore("https://example.com/?utm_source=x", &patterns));
    assert!(should_ignore("https://example.com/?fbclid=abc", &patterns));
    assert!(should_ignore("https://example.com/cookie-policy", &patterns));
    assert!(should_ignore("https://example.com/terms-of-service", &patterns));
    assert!(should_ignore("https://d111111abcdef8.cloudfront.net/feed", &patterns));
    assert!(should_ignore("https://example.com/logo.PNG", &patterns));
    assert!(!should_ignore("https://example.com/feed", &patterns));
    assert!(!should_ignore("https://blog.openai.com/", &patterns));
}
