//! Placeholder data served when a list fetch fails, so the UI always has
//! something to render

use chrono::{DateTime, Utc};

use crate::models::{Author, Comment, CommentEngagement, Engagement, Post, PostContent, PostStatus, Visibility};

pub const FALLBACK_POST_ID: &str = "fallback-1";
pub const FALLBACK_COMMENT_ID: &str = "fallback-comment-1";

fn system_author() -> Author {
    Author {
        user_id: "system".to_string(),
        name: "Campus".to_string(),
        title: "Learning team".to_string(),
        avatar: String::new(),
        verified: true,
    }
}

pub fn fallback_post(now: DateTime<Utc>) -> Post {
    Post {
        id: FALLBACK_POST_ID.to_string(),
        author: system_author(),
        content: PostContent {
            text: "Welcome to your learning feed! New posts will appear here once you are back online."
                .to_string(),
            ..Default::default()
        },
        engagement: Engagement::default(),
        visibility: Visibility::default(),
        hashtags: vec![],
        mentions: vec![],
        status: PostStatus::Published,
        created_at: now,
        updated_at: now,
    }
}

pub fn fallback_comment(post_id: &str, now: DateTime<Utc>) -> Comment {
    Comment {
        id: FALLBACK_COMMENT_ID.to_string(),
        post_id: post_id.to_string(),
        author: system_author(),
        content: "Comments are unavailable right now.".to_string(),
        engagement: CommentEngagement::default(),
        created_at: now,
    }
}
