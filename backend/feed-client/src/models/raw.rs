//! Backend payloads as they arrive over the wire
//!
//! Nothing here is trusted to be complete. `services::transform` performs the
//! single normalization pass into the fully populated models.

use campus_common::Pagination;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAuthor {
    #[serde(alias = "id", alias = "_id")]
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub avatar: Option<String>,
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPostContent {
    pub text: Option<String>,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub links: Option<Vec<String>>,
}

/// Older payloads send the post body as a bare string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawContent {
    Text(String),
    Structured(RawPostContent),
}

impl RawContent {
    pub fn into_structured(self) -> RawPostContent {
        match self {
            RawContent::Text(text) => RawPostContent {
                text: Some(text),
                ..Default::default()
            },
            RawContent::Structured(content) => content,
        }
    }
}

/// Counters may arrive negative from buggy producers; normalization clamps them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEngagement {
    pub likes: Option<i64>,
    pub comments: Option<i64>,
    pub shares: Option<i64>,
    pub views: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawVisibility {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub audience: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPost {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub author: Option<RawAuthor>,
    pub content: Option<RawContent>,
    pub engagement: Option<RawEngagement>,
    pub visibility: Option<RawVisibility>,
    pub hashtags: Option<Vec<String>>,
    pub mentions: Option<Vec<String>>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCommentEngagement {
    pub likes: Option<i64>,
    pub replies: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawComment {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub post_id: Option<String>,
    pub author: Option<RawAuthor>,
    pub content: Option<String>,
    pub engagement: Option<RawCommentEngagement>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawReaction {
    pub liked: Option<bool>,
    pub likes: Option<i64>,
    pub reaction_type: Option<String>,
}

/// List endpoints answer either with a bare array or with an envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "posts", alias = "comments", alias = "items")]
        data: Vec<T>,
        #[serde(default)]
        pagination: Option<Pagination>,
    },
}

impl<T> ListPayload<T> {
    pub fn into_parts(self) -> (Vec<T>, Option<Pagination>) {
        match self {
            ListPayload::Bare(items) => (items, None),
            ListPayload::Wrapped { data, pagination } => (data, pagination),
        }
    }
}

/// Single-item endpoints answer either with the item or with `{ "data": item }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItemPayload<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ItemPayload<T> {
    pub fn into_inner(self) -> T {
        match self {
            ItemPayload::Wrapped { data } => data,
            ItemPayload::Bare(item) => item,
        }
    }
}
