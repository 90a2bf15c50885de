//! Content Parser
//!
//! Extracts #hashtags, @mentions and links from post text and counts words.
//! Nothing in this module fails: absent or empty text yields empty results.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::formatter::format_post_content;

/// `#` followed by word characters
pub(crate) static HASHTAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([a-zA-Z0-9_]+)").expect("Invalid hashtag regex"));

/// `@` followed by word characters
pub(crate) static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([a-zA-Z0-9_]+)").expect("Invalid mention regex"));

static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"]+"#).expect("Invalid link regex"));

/// Extract #hashtags from content text
///
/// Returns the tags lower-cased and without `#`, in order of appearance.
/// Repeated tags are kept.
///
/// # Examples
/// ```
/// use feed_client::services::content_parser::extract_hashtags;
///
/// let tags = extract_hashtags("Week 1 of #Rust and #rust #async");
/// assert_eq!(tags, vec!["rust", "rust", "async"]);
/// ```
pub fn extract_hashtags(text: &str) -> Vec<String> {
    capture_lowercase(&HASHTAG_REGEX, text)
}

/// Extract @mentions from content text, same contract as [`extract_hashtags`]
pub fn extract_mentions(text: &str) -> Vec<String> {
    capture_lowercase(&MENTION_REGEX, text)
}

/// http(s) URLs in order of appearance, trailing punctuation stripped
pub fn extract_links(text: &str) -> Vec<String> {
    LINK_REGEX
        .find_iter(text)
        .map(|m| {
            m.as_str()
                .trim_end_matches(['.', ',', ';', ':', '!', '?', ')'])
                .to_string()
        })
        .collect()
}

fn capture_lowercase(regex: &Regex, text: &str) -> Vec<String> {
    regex
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_lowercase()))
        .collect()
}

/// Everything the composer and detail view show about a piece of text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedContent {
    pub original_content: String,
    pub formatted_content: String,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    /// Whitespace-delimited tokens
    pub word_count: usize,
    /// Characters of the raw text, not of the HTML
    pub character_count: usize,
}

pub fn process_post_content(text: &str) -> ProcessedContent {
    ProcessedContent {
        original_content: text.to_string(),
        formatted_content: format_post_content(text),
        hashtags: extract_hashtags(text),
        mentions: extract_mentions(text),
        word_count: text.split_whitespace().count(),
        character_count: text.chars().count(),
    }
}

/// [`process_post_content`] for text that may be absent
pub fn process_optional_content(text: Option<&str>) -> ProcessedContent {
    process_post_content(text.unwrap_or_default())
}
