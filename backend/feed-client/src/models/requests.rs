//! Requests sent to the feed endpoints

use campus_common::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use validator::Validate;

use super::{ReactionType, VisibilityType};
use crate::services::content_parser::{extract_hashtags, extract_links, extract_mentions};

pub const MAX_POST_TEXT_CHARS: usize = 5000;
pub const MAX_COMMENT_CHARS: usize = 2000;

fn validation_error(err: validator::ValidationErrors) -> ApiError {
    ApiError::Validation(err.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(max = 5000, message = "post text is limited to 5000 characters"))]
    pub text: String,
    #[validate(length(max = 10, message = "at most 10 images per post"))]
    pub images: Vec<String>,
    #[validate(length(max = 4, message = "at most 4 videos per post"))]
    pub videos: Vec<String>,
    pub links: Vec<String>,
    pub visibility: VisibilityType,
    pub audience: Vec<String>,
}

impl CreatePostRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_visibility(mut self, visibility: VisibilityType, audience: Vec<String>) -> Self {
        self.visibility = visibility;
        self.audience = audience;
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Field limits plus the rule that a post needs text or media
    pub fn check(&self) -> Result<(), ApiError> {
        self.validate().map_err(validation_error)?;
        if self.text.trim().is_empty() && self.images.is_empty() && self.videos.is_empty() {
            return Err(ApiError::Validation("post must contain text or media".to_string()));
        }
        Ok(())
    }

    /// Wire body; hashtags, mentions and missing links are derived from the text
    pub fn to_body(&self) -> Value {
        let links = if self.links.is_empty() {
            extract_links(&self.text)
        } else {
            self.links.clone()
        };

        json!({
            "content": {
                "text": self.text,
                "images": self.images,
                "videos": self.videos,
                "links": links,
            },
            "visibility": {
                "type": self.visibility,
                "audience": self.audience,
            },
            "hashtags": extract_hashtags(&self.text),
            "mentions": extract_mentions(&self.text),
        })
    }
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(length(max = 5000, message = "post text is limited to 5000 characters"))]
    pub text: Option<String>,
    #[validate(length(max = 10, message = "at most 10 images per post"))]
    pub images: Option<Vec<String>>,
    #[validate(length(max = 4, message = "at most 4 videos per post"))]
    pub videos: Option<Vec<String>>,
    pub links: Option<Vec<String>>,
    pub visibility: Option<VisibilityType>,
    pub audience: Option<Vec<String>>,
}

impl UpdatePostRequest {
    pub fn check(&self) -> Result<(), ApiError> {
        self.validate().map_err(validation_error)
    }

    pub fn to_body(&self) -> Value {
        let mut content = Map::new();
        if let Some(text) = &self.text {
            content.insert("text".into(), json!(text));
        }
        if let Some(images) = &self.images {
            content.insert("images".into(), json!(images));
        }
        if let Some(videos) = &self.videos {
            content.insert("videos".into(), json!(videos));
        }
        if let Some(links) = &self.links {
            content.insert("links".into(), json!(links));
        }

        let mut body = Map::new();
        if !content.is_empty() {
            body.insert("content".into(), Value::Object(content));
        }

        let mut visibility = Map::new();
        if let Some(kind) = self.visibility {
            visibility.insert("type".into(), json!(kind));
        }
        if let Some(audience) = &self.audience {
            visibility.insert("audience".into(), json!(audience));
        }
        if !visibility.is_empty() {
            body.insert("visibility".into(), Value::Object(visibility));
        }

        if let Some(text) = &self.text {
            body.insert("hashtags".into(), json!(extract_hashtags(text)));
            body.insert("mentions".into(), json!(extract_mentions(text)));
        }

        Value::Object(body)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "comments must be 1-2000 characters"))]
    pub content: String,
}

impl AddCommentRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn check(&self) -> Result<(), ApiError> {
        self.validate().map_err(validation_error)?;
        if self.content.trim().is_empty() {
            return Err(ApiError::Validation("comment must not be blank".to_string()));
        }
        Ok(())
    }
}

/// Body of `POST /feed/{id}/like`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReactionRequest {
    pub reaction_type: ReactionType,
}
