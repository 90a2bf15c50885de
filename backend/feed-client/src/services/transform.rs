//! Normalization of backend payloads and view-ready projections
//!
//! `transform_post` is the single place where missing fields get defaults.
//! It reads nothing but its input, so transforming the same payload twice
//! gives equal posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content_parser::{extract_hashtags, extract_mentions, process_post_content, ProcessedContent};
use super::engagement::{calculate_engagement_score, EngagementScore};
use super::formatter::{
    format_engagement_count, format_post_content, format_relative, is_post_edited, parse_timestamp,
    truncate_content,
};
use super::permissions::{can_user_delete, can_user_edit, can_user_interact};
use crate::models::{
    Author, Comment, CommentEngagement, Engagement, Post, PostContent, PostStatus, RawAuthor,
    RawComment, RawPost, UpdatePostRequest, Viewer, Visibility, VisibilityType,
};

pub const UNKNOWN_AUTHOR: &str = "Unknown User";

/// Preview length on profile cards
const PROFILE_PREVIEW_CHARS: usize = 150;

fn count(value: Option<i64>) -> u64 {
    value.unwrap_or(0).max(0) as u64
}

fn timestamp_or_epoch(value: Option<&str>) -> DateTime<Utc> {
    value.and_then(parse_timestamp).unwrap_or_default()
}

fn normalize_tags(tags: &[String], prefix: char) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.trim().trim_start_matches(prefix).to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn non_empty_id(id: Option<&String>) -> Option<String> {
    id.map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn transform_author(raw: Option<&RawAuthor>) -> Author {
    let raw = raw.cloned().unwrap_or_default();
    Author {
        user_id: raw.user_id.unwrap_or_default(),
        name: raw
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        title: raw.title.unwrap_or_default(),
        avatar: raw.avatar.unwrap_or_default(),
        verified: raw.verified.unwrap_or(false),
    }
}

/// Normalize a backend post; `None` for absent input or a payload without an id
pub fn transform_post(raw: Option<&RawPost>) -> Option<Post> {
    let raw = raw?;
    let id = non_empty_id(raw.id.as_ref())?;

    let content = raw
        .content
        .clone()
        .map(|c| c.into_structured())
        .unwrap_or_default();
    let text = content.text.unwrap_or_default();

    let engagement = raw.engagement.clone().unwrap_or_default();
    let visibility = raw.visibility.clone().unwrap_or_default();

    let hashtags = match &raw.hashtags {
        Some(tags) => normalize_tags(tags, '#'),
        None => extract_hashtags(&text),
    };
    let mentions = match &raw.mentions {
        Some(names) => normalize_tags(names, '@'),
        None => extract_mentions(&text),
    };

    let created_at = timestamp_or_epoch(raw.created_at.as_deref());
    let updated_at = raw
        .updated_at
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(created_at);

    Some(Post {
        id,
        author: transform_author(raw.author.as_ref()),
        content: PostContent {
            text,
            images: content.images.unwrap_or_default(),
            videos: content.videos.unwrap_or_default(),
            links: content.links.unwrap_or_default(),
        },
        engagement: Engagement {
            likes: count(engagement.likes),
            comments: count(engagement.comments),
            shares: count(engagement.shares),
            views: count(engagement.views),
        },
        visibility: Visibility {
            kind: VisibilityType::from_raw(visibility.kind.as_deref()),
            audience: visibility.audience.unwrap_or_default(),
        },
        hashtags,
        mentions,
        status: PostStatus::from_raw(raw.status.as_deref()),
        created_at,
        updated_at,
    })
}

/// Normalize a list, dropping entries that cannot be keyed
pub fn transform_posts(raw: &[RawPost]) -> Vec<Post> {
    raw.iter().filter_map(|p| transform_post(Some(p))).collect()
}

/// Normalize a backend comment; `post_id` falls back to the post it was fetched for
pub fn transform_comment(raw: Option<&RawComment>, post_id: &str) -> Option<Comment> {
    let raw = raw?;
    let id = non_empty_id(raw.id.as_ref())?;
    let engagement = raw.engagement.clone().unwrap_or_default();

    Some(Comment {
        id,
        post_id: non_empty_id(raw.post_id.as_ref()).unwrap_or_else(|| post_id.to_string()),
        author: transform_author(raw.author.as_ref()),
        content: raw.content.clone().unwrap_or_default(),
        engagement: CommentEngagement {
            likes: count(engagement.likes),
            replies: count(engagement.replies),
        },
        created_at: timestamp_or_epoch(raw.created_at.as_deref()),
    })
}

pub fn transform_comments(raw: &[RawComment], post_id: &str) -> Vec<Comment> {
    raw.iter()
        .filter_map(|c| transform_comment(Some(c), post_id))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementDisplay {
    pub likes: String,
    pub comments: String,
    pub shares: String,
    pub views: String,
}

impl From<&Engagement> for EngagementDisplay {
    fn from(e: &Engagement) -> Self {
        Self {
            likes: format_engagement_count(e.likes),
            comments: format_engagement_count(e.comments),
            shares: format_engagement_count(e.shares),
            views: format_engagement_count(e.views),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPermissions {
    pub can_interact: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl PostPermissions {
    pub fn for_viewer(post: &Post, viewer: &Viewer) -> Self {
        Self {
            can_interact: can_user_interact(post, viewer),
            can_edit: can_user_edit(post, viewer),
            can_delete: can_user_delete(post, viewer),
        }
    }
}

/// Card in the feed list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPostView {
    #[serde(flatten)]
    pub post: Post,
    pub formatted_date: String,
    pub formatted_content: String,
    pub engagement_display: EngagementDisplay,
    pub engagement_score: EngagementScore,
    pub permissions: PostPermissions,
    pub is_edited: bool,
}

pub fn transform_post_for_feed(post: &Post, viewer: &Viewer, now: DateTime<Utc>) -> FeedPostView {
    FeedPostView {
        post: post.clone(),
        formatted_date: format_relative(post.created_at, now),
        formatted_content: format_post_content(&post.content.text),
        engagement_display: EngagementDisplay::from(&post.engagement),
        engagement_score: calculate_engagement_score(post),
        permissions: PostPermissions::for_viewer(post, viewer),
        is_edited: is_post_edited(post),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub formatted_date: String,
    pub formatted_content: String,
}

/// Full post page: the feed card plus text statistics and comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailView {
    #[serde(flatten)]
    pub card: FeedPostView,
    pub processed_content: ProcessedContent,
    pub comments: Vec<CommentView>,
}

pub fn transform_post_for_detail(
    post: &Post,
    comments: &[Comment],
    viewer: &Viewer,
    now: DateTime<Utc>,
) -> PostDetailView {
    PostDetailView {
        card: transform_post_for_feed(post, viewer, now),
        processed_content: process_post_content(&post.content.text),
        comments: comments
            .iter()
            .map(|comment| CommentView {
                comment: comment.clone(),
                formatted_date: format_relative(comment.created_at, now),
                formatted_content: format_post_content(&comment.content),
            })
            .collect(),
    }
}

/// Compact entry on a profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePostView {
    pub id: String,
    pub preview: String,
    pub formatted_date: String,
    pub media_count: usize,
    pub total_engagement: u64,
    pub engagement_display: String,
    pub visibility: VisibilityType,
}

pub fn transform_post_for_profile(post: &Post, now: DateTime<Utc>) -> ProfilePostView {
    let score = calculate_engagement_score(post);
    ProfilePostView {
        id: post.id.clone(),
        preview: truncate_content(&post.content.text, PROFILE_PREVIEW_CHARS),
        formatted_date: format_relative(post.created_at, now),
        media_count: post.content.images.len() + post.content.videos.len(),
        total_engagement: score.total_engagement,
        engagement_display: format_engagement_count(score.total_engagement),
        visibility: post.visibility.kind,
    }
}

/// Editor state prefilled from an existing post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPostForm {
    pub id: String,
    pub text: String,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub links: Vec<String>,
    pub visibility: VisibilityType,
    pub audience: Vec<String>,
    pub hashtags: Vec<String>,
}

impl EditPostForm {
    /// Full replacement of every editable field
    pub fn into_update_request(self) -> UpdatePostRequest {
        UpdatePostRequest {
            text: Some(self.text),
            images: Some(self.images),
            videos: Some(self.videos),
            links: Some(self.links),
            visibility: Some(self.visibility),
            audience: Some(self.audience),
        }
    }
}

pub fn transform_post_for_edit(post: &Post) -> EditPostForm {
    EditPostForm {
        id: post.id.clone(),
        text: post.content.text.clone(),
        images: post.content.images.clone(),
        videos: post.content.videos.clone(),
        links: post.content.links.clone(),
        visibility: post.visibility.kind,
        audience: post.visibility.audience.clone(),
        hashtags: post.hashtags.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn raw_post(value: serde_json::Value) -> RawPost {
        serde_json::from_value(value).expect("valid raw post")
    }

    #[test]
    fn test_absent_input_yields_none() {
        assert!(transform_post(None).is_none());
        assert!(transform_post(Some(&RawPost::default())).is_none());
        assert!(transform_post(Some(&raw_post(json!({ "id": "  " })))).is_none());
    }

    #[test]
    fn test_defaults_for_minimal_payload() {
        let post = transform_post(Some(&raw_post(json!({ "id": "p1" })))).unwrap();

        assert_eq!(post.author.name, UNKNOWN_AUTHOR);
        assert_eq!(post.author.user_id, "");
        assert!(!post.author.verified);
        assert_eq!(post.engagement, Engagement::default());
        assert_eq!(post.visibility.kind, VisibilityType::Public);
        assert!(post.visibility.audience.is_empty());
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.created_at, DateTime::<Utc>::default());
        assert_eq!(post.updated_at, post.created_at);
    }

    #[test]
    fn test_full_payload() {
        let raw = raw_post(json!({
            "id": "p7",
            "author": { "userId": "u1", "name": "Ana", "title": "Coach", "avatar": "a.png", "verified": true },
            "content": { "text": "Day 3 of #Onboarding with @Kim", "images": ["1.png"] },
            "engagement": { "likes": 12, "comments": 3, "shares": -2, "views": 400 },
            "visibility": { "type": "connections", "audience": ["team-a"] },
            "status": "draft",
            "createdAt": "2026-10-18T10:00:00Z",
            "updatedAt": "2026-10-18T11:00:00Z"
        }));
        let post = transform_post(Some(&raw)).unwrap();

        assert_eq!(post.author.title, "Coach");
        assert!(post.author.verified);
        assert_eq!(post.content.images, vec!["1.png"]);
        assert_eq!(post.engagement.shares, 0);
        assert_eq!(post.visibility.kind, VisibilityType::Connections);
        assert_eq!(post.hashtags, vec!["onboarding"]);
        assert_eq!(post.mentions, vec!["kim"]);
        assert_eq!(post.status, PostStatus::Draft);
        assert!(is_post_edited(&post));
    }

    #[test]
    fn test_payload_tags_take_precedence_and_are_normalized() {
        let raw = raw_post(json!({
            "id": "p1",
            "content": "text with #ignored",
            "hashtags": ["#Rust", "Async"]
        }));
        let post = transform_post(Some(&raw)).unwrap();

        assert_eq!(post.hashtags, vec!["rust", "async"]);
        assert_eq!(post.content.text, "text with #ignored");
    }

    #[test]
    fn test_transform_is_pure() {
        let raw = raw_post(json!({
            "id": "p1",
            "content": { "text": "#a @b" },
            "engagement": { "likes": 1 }
        }));

        assert_eq!(transform_post(Some(&raw)), transform_post(Some(&raw)));
    }

    #[test]
    fn test_transform_posts_skips_unkeyed_entries() {
        let raws = vec![raw_post(json!({ "id": "a" })), RawPost::default(), raw_post(json!({ "id": "b" }))];
        let ids: Vec<String> = transform_posts(&raws).into_iter().map(|p| p.id).collect();

        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_transform_comment_defaults() {
        let raw: RawComment = serde_json::from_value(json!({ "_id": "c1", "content": "Nice" })).unwrap();
        let comment = transform_comment(Some(&raw), "p9").unwrap();

        assert_eq!(comment.post_id, "p9");
        assert_eq!(comment.author.name, UNKNOWN_AUTHOR);
        assert_eq!(comment.engagement, CommentEngagement::default());
        assert!(transform_comment(None, "p9").is_none());
    }

    #[test]
    fn test_feed_view() {
        let mut post = transform_post(Some(&raw_post(json!({
            "id": "p1",
            "author": { "userId": "owner" },
            "content": { "text": "Hello #team" },
            "engagement": { "likes": 1500, "views": 2_000_000 }
        }))))
        .unwrap();
        post.created_at = now() - Duration::minutes(5);
        post.updated_at = post.created_at;

        let view = transform_post_for_feed(&post, &Viewer::new("owner", UserRole::Member), now());

        assert_eq!(view.formatted_date, "5m");
        assert_eq!(view.engagement_display.likes, "1.5K");
        assert_eq!(view.engagement_display.views, "2.0M");
        assert!(view.formatted_content.contains(r#"<span class="hashtag">#team</span>"#));
        assert!(view.permissions.can_edit);
        assert!(!view.is_edited);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["formattedDate"], "5m");
    }

    #[test]
    fn test_detail_view_formats_comments() {
        let post = transform_post(Some(&raw_post(json!({ "id": "p1", "content": "one two three" })))).unwrap();
        let comment = Comment {
            id: "c1".into(),
            post_id: "p1".into(),
            author: Author::default(),
            content: "thanks @ana".into(),
            engagement: CommentEngagement::default(),
            created_at: now() - Duration::hours(2),
        };

        let detail = transform_post_for_detail(&post, &[comment], &Viewer::guest(), now());

        assert_eq!(detail.processed_content.word_count, 3);
        assert_eq!(detail.comments.len(), 1);
        assert_eq!(detail.comments[0].formatted_date, "2h");
        assert!(detail.comments[0].formatted_content.contains("mention"));
        assert!(!detail.card.permissions.can_interact);
    }

    #[test]
    fn test_profile_view_truncates() {
        let text = "word ".repeat(60);
        let post = transform_post(Some(&raw_post(json!({
            "id": "p1",
            "content": { "text": text, "images": ["a"], "videos": ["b"] },
            "engagement": { "likes": 900, "comments": 100 }
        }))))
        .unwrap();

        let view = transform_post_for_profile(&post, now());

        assert!(view.preview.ends_with("..."));
        assert!(view.preview.chars().count() <= PROFILE_PREVIEW_CHARS + 3);
        assert_eq!(view.media_count, 2);
        assert_eq!(view.engagement_display, "1.0K");
    }

    #[test]
    fn test_edit_form_round_trip_into_update() {
        let post = transform_post(Some(&raw_post(json!({
            "id": "p1",
            "content": { "text": "Draft #notes" },
            "visibility": { "type": "private", "audience": ["u2"] }
        }))))
        .unwrap();

        let form = transform_post_for_edit(&post);
        assert_eq!(form.hashtags, vec!["notes"]);

        let update = form.into_update_request();
        assert_eq!(update.text.as_deref(), Some("Draft #notes"));
        assert_eq!(update.visibility, Some(VisibilityType::Private));
        assert_eq!(update.audience, Some(vec!["u2".to_string()]));
    }

    #[test]
    fn test_optimistic_like() {
        let post = transform_post(Some(&raw_post(json!({ "id": "p1", "engagement": { "likes": 0 } })))).unwrap();

        assert_eq!(post.with_optimistic_like(true).engagement.likes, 1);
        assert_eq!(post.with_optimistic_like(false).engagement.likes, 0);
        assert_eq!(post.engagement.likes, 0);
    }
}
