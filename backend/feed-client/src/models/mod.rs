/// Data models for the feed client
///
/// This module defines structures for:
/// - Raw backend payloads (`RawPost`, `RawComment`): every field optional
/// - Normalized posts and comments: every field populated
/// - Requests sent to the backend
/// - The viewer and ranking preferences the UI gates and sorts with
mod raw;
mod requests;

pub use raw::{
    ItemPayload, ListPayload, RawAuthor, RawComment, RawCommentEngagement, RawContent,
    RawEngagement, RawPost, RawPostContent, RawReaction, RawVisibility,
};
pub use requests::{AddCommentRequest, CreatePostRequest, UpdatePostRequest};
pub(crate) use requests::ReactionRequest;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityType {
    #[default]
    Public,
    Connections,
    Private,
}

impl VisibilityType {
    /// Unknown or missing values fall back to `Public`
    pub fn from_raw(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("connections") => Self::Connections,
            Some("private") => Self::Private,
            _ => Self::Public,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Connections => "connections",
            Self::Private => "private",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Published,
    Draft,
    Archived,
}

impl PostStatus {
    /// Unknown or missing values fall back to `Published`
    pub fn from_raw(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("draft") => Self::Draft,
            Some("archived") => Self::Archived,
            _ => Self::Published,
        }
    }
}

/// Role of the signed-in user within the current tenant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Guest,
    #[default]
    Member,
    Moderator,
    Admin,
}

impl UserRole {
    /// Moderators and admins may act on posts they do not own
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Moderator | Self::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Member => "member",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown user role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guest" => Ok(Self::Guest),
            "member" | "user" | "participant" => Ok(Self::Member),
            "moderator" => Ok(Self::Moderator),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reaction sent with a like toggle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    #[default]
    Like,
    Love,
    Celebrate,
    Insightful,
    Support,
}

/// Denormalized author snapshot captured at fetch time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub user_id: String,
    pub name: String,
    pub title: String,
    pub avatar: String,
    pub verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostContent {
    pub text: String,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub views: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visibility {
    #[serde(rename = "type")]
    pub kind: VisibilityType,
    pub audience: Vec<String>,
}

/// Normalized post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author: Author,
    pub content: PostContent,
    pub engagement: Engagement,
    pub visibility: Visibility,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        !user_id.is_empty() && self.author.user_id == user_id
    }

    /// Copy with the like counter moved by one, for display until the next fetch
    pub fn with_optimistic_like(&self, liked: bool) -> Post {
        let mut post = self.clone();
        post.engagement.likes = if liked {
            post.engagement.likes.saturating_add(1)
        } else {
            post.engagement.likes.saturating_sub(1)
        };
        post
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEngagement {
    pub likes: u64,
    pub replies: u64,
}

/// Normalized comment, owned by exactly one post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author: Author,
    pub content: String,
    pub engagement: CommentEngagement,
    pub created_at: DateTime<Utc>,
}

/// Backend answer to a like toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionSummary {
    pub post_id: String,
    pub liked: bool,
    pub likes: u64,
    pub reaction_type: ReactionType,
}

/// Who is looking at the feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub user_id: String,
    pub role: UserRole,
}

impl Viewer {
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn guest() -> Self {
        Self::new("", UserRole::Guest)
    }

    pub fn is_signed_in(&self) -> bool {
        self.role != UserRole::Guest && !self.user_id.is_empty()
    }
}

/// Inputs to priority ranking
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub followed_user_ids: Vec<String>,
    pub interests: Vec<String>,
}

/// Query parameters forwarded verbatim to `GET /feed`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    params: Vec<(String, String)>,
}

impl FeedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn page(self, page: u32) -> Self {
        self.param("page", page)
    }

    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit)
    }

    pub fn hashtag(self, tag: &str) -> Self {
        self.param("hashtag", tag.trim_start_matches('#'))
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}
