//! Engagement scoring and priority ranking
//!
//! Weighted score: likes = 1, comments = 2, shares = 3 (higher-effort
//! interactions count more). Views never add to the total; they are only the
//! denominator of the engagement rate.
//!
//! Priority is a tunable heuristic for feed ordering:
//! - weighted score * 0.4
//! - linear time decay over 24 hours * 0.3
//! - +0.2 when the viewer follows the author
//! - +0.1 when a post hashtag matches one of the viewer's interests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Post, UserPreferences};

const LIKE_WEIGHT: u64 = 1;
const COMMENT_WEIGHT: u64 = 2;
const SHARE_WEIGHT: u64 = 3;

/// Engagement rate (percent) above which a post counts as high engagement
const HIGH_ENGAGEMENT_RATE: f64 = 5.0;
/// Engagement rate (percent) above which a post counts as viral
const VIRAL_RATE: f64 = 20.0;

const DAY_MS: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementScore {
    pub total_engagement: u64,
    /// Percent of views, two decimals
    pub engagement_rate: f64,
    pub weighted_score: u64,
    pub is_high_engagement: bool,
    pub is_viral: bool,
}

pub fn calculate_engagement_score(post: &Post) -> EngagementScore {
    let e = &post.engagement;
    let total_engagement = e.likes.saturating_add(e.comments).saturating_add(e.shares);

    let engagement_rate = if e.views > 0 {
        round2(total_engagement as f64 / e.views as f64 * 100.0)
    } else {
        0.0
    };

    // Counters come from the backend unbounded; saturate instead of overflowing
    let weighted_score = e
        .likes
        .saturating_mul(LIKE_WEIGHT)
        .saturating_add(e.comments.saturating_mul(COMMENT_WEIGHT))
        .saturating_add(e.shares.saturating_mul(SHARE_WEIGHT));

    EngagementScore {
        total_engagement,
        engagement_rate,
        weighted_score,
        is_high_engagement: engagement_rate > HIGH_ENGAGEMENT_RATE,
        is_viral: engagement_rate > VIRAL_RATE,
    }
}

/// 1.0 for a post created now, falling linearly to 0.0 at 24 hours
pub fn time_decay(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_ms = (now - created_at).num_milliseconds() as f64;
    (1.0 - age_ms / DAY_MS).clamp(0.0, 1.0)
}

/// Ranking score for a single post, higher is better
pub fn calculate_post_priority(post: &Post, preferences: &UserPreferences, now: DateTime<Utc>) -> f64 {
    let engagement = calculate_engagement_score(post);

    let followed_bonus = if preferences
        .followed_user_ids
        .iter()
        .any(|id| *id == post.author.user_id)
    {
        0.2
    } else {
        0.0
    };

    let interest_bonus = if post.hashtags.iter().any(|tag| {
        preferences
            .interests
            .iter()
            .any(|interest| interest.trim_start_matches('#').eq_ignore_ascii_case(tag))
    }) {
        0.1
    } else {
        0.0
    };

    engagement.weighted_score as f64 * 0.4
        + time_decay(post.created_at, now) * 0.3
        + followed_bonus
        + interest_bonus
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
