//! Raw payload to rendered card, without a network in between

use chrono::{TimeZone, Utc};
use feed_client::models::{ListPayload, RawPost};
use feed_client::services::filters::{filter_posts_by_hashtag, filter_posts_by_visibility, sort_posts_by_priority};
use feed_client::services::transform::{transform_post_for_feed, transform_post_for_profile, transform_posts};
use feed_client::{UserPreferences, UserRole, Viewer};
use serde_json::json;

fn payload() -> Vec<RawPost> {
    let list: ListPayload<RawPost> = serde_json::from_value(json!({
        "posts": [
            {
                "id": "public-old",
                "author": { "id": "u-1", "name": "Dana" },
                "content": { "text": "Week one recap #onboarding" },
                "engagement": { "likes": 40, "comments": 10, "shares": 2, "views": 400 },
                "createdAt": "2026-10-17T12:00:00Z"
            },
            {
                "id": "public-followed",
                "author": { "id": "u-2", "name": "Sam" },
                "content": "Pairing notes #Rust #onboarding",
                "engagement": { "likes": 1 },
                "createdAt": "2026-10-18T11:00:00Z"
            },
            {
                "id": "private-note",
                "author": { "id": "u-3", "name": "Lee" },
                "content": { "text": "Only for mentors #onboarding" },
                "visibility": { "type": "private", "audience": ["u-9"] },
                "createdAt": "2026-10-18T11:30:00Z"
            },
            {
                "id": "connections-only",
                "author": { "id": "u-4" },
                "content": { "text": "Team lunch" },
                "visibility": { "type": "connections" },
                "engagement": { "likes": -3 },
                "createdAt": "not a date"
            }
        ]
    }))
    .unwrap();
    list.into_parts().0
}

#[test]
fn test_guest_sees_only_public_posts() {
    let posts = transform_posts(&payload());
    assert_eq!(posts.len(), 4);

    let visible = filter_posts_by_visibility(&posts, &Viewer::guest());
    let ids: Vec<&str> = visible.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["public-old", "public-followed"]);
}

#[test]
fn test_audience_member_sees_private_post() {
    let posts = transform_posts(&payload());
    let viewer = Viewer::new("u-9", UserRole::Member);

    let visible = filter_posts_by_visibility(&posts, &viewer);
    assert_eq!(visible.len(), 4);

    let tagged = filter_posts_by_hashtag(&visible, "#Onboarding");
    assert_eq!(tagged.len(), 3);
}

#[test]
fn test_priority_prefers_followed_recent_posts() {
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
    let preferences = UserPreferences {
        followed_user_ids: vec!["u-2".to_string()],
        interests: vec!["rust".to_string()],
    };
    let mut posts = filter_posts_by_visibility(&transform_posts(&payload()), &Viewer::guest());

    sort_posts_by_priority(&mut posts, &preferences, now);

    // weighted score 66 outweighs recency and both bonuses
    assert_eq!(posts[0].id, "public-old");
    assert_eq!(posts[1].id, "public-followed");
}

#[test]
fn test_feed_card_for_author_and_guest() {
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
    let posts = transform_posts(&payload());
    let followed = &posts[1];

    let author_card = transform_post_for_feed(followed, &Viewer::new("u-2", UserRole::Member), now);
    assert_eq!(author_card.formatted_date, "1h");
    assert_eq!(followed.hashtags, vec!["rust", "onboarding"]);
    assert!(author_card.formatted_content.contains("<span class=\"hashtag\">#Rust</span>"));
    assert!(author_card.permissions.can_edit);
    assert!(author_card.permissions.can_delete);
    assert!(!author_card.is_edited);

    let guest_card = transform_post_for_feed(followed, &Viewer::guest(), now);
    assert!(!guest_card.permissions.can_interact);
    assert!(!guest_card.permissions.can_edit);
}

#[test]
fn test_malformed_fields_get_defaults() {
    let posts = transform_posts(&payload());
    let lunch = &posts[3];

    assert_eq!(lunch.author.name, "Unknown User");
    assert_eq!(lunch.engagement.likes, 0);
    assert_eq!(lunch.created_at.timestamp(), 0);

    let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
    let profile = transform_post_for_profile(lunch, now);
    assert_eq!(profile.total_engagement, 0);
}
