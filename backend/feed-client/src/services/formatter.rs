//! Display formatting for posts: relative dates, annotated HTML, compact counts

use chrono::{DateTime, NaiveDateTime, Utc};

use super::content_parser::{HASHTAG_REGEX, MENTION_REGEX};
use crate::models::Post;

const MINUTE_MS: i64 = 60_000;

/// Parse an ISO-8601 timestamp; a missing offset is read as UTC
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Relative time bucket for a parsed timestamp
///
/// `<1m` → `now`, `<1h` → `{n}m`, `<24h` → `{n}h`, `<7d` → `{n}d`, else a
/// calendar date. Each bucket truncates, so exactly 60 minutes is `1h`.
/// Timestamps in the future read as `now`.
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_ms = (now - timestamp).num_milliseconds();
    if elapsed_ms < MINUTE_MS {
        return "now".to_string();
    }

    let minutes = elapsed_ms / MINUTE_MS;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 7 {
        return format!("{}d", days);
    }

    timestamp.format("%b %-d, %Y").to_string()
}

/// [`format_relative`] for an ISO-8601 string; unparsable input is returned unchanged
pub fn format_post_date(iso_timestamp: &str, now: DateTime<Utc>) -> String {
    match parse_timestamp(iso_timestamp) {
        Some(timestamp) => format_relative(timestamp, now),
        None => iso_timestamp.to_string(),
    }
}

/// Wrap hashtags and mentions in spans
///
/// The surrounding text is NOT escaped. Callers rendering the result as
/// markup must escape user text first or render through a layer that does.
pub fn format_post_content(text: &str) -> String {
    let tagged = HASHTAG_REGEX.replace_all(text, r#"<span class="hashtag">#${1}</span>"#);
    MENTION_REGEX
        .replace_all(&tagged, r#"<span class="mention">@${1}</span>"#)
        .into_owned()
}

/// `1.2K` / `3.4M` style counters
pub fn format_engagement_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Preview of at most `max_chars` characters followed by `...` when cut
pub fn truncate_content(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

pub fn is_post_edited(post: &Post) -> bool {
    post.updated_at > post.created_at
}
