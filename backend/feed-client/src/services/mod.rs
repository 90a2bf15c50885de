//! Pure feed-post processing: parsing, scoring, formatting, normalization,
//! permissions and list operations. Nothing here touches the network.

pub mod content_parser;
pub mod engagement;
pub mod filters;
pub mod formatter;
pub mod permissions;
pub mod transform;

pub use content_parser::{extract_hashtags, extract_links, extract_mentions, process_post_content, ProcessedContent};
pub use engagement::{calculate_engagement_score, calculate_post_priority, EngagementScore};
pub use filters::{
    filter_posts_by_date_range, filter_posts_by_engagement, filter_posts_by_hashtag,
    filter_posts_by_visibility, sort_posts_by_date, sort_posts_by_engagement, sort_posts_by_priority,
};
pub use formatter::{format_engagement_count, format_post_content, format_post_date, format_relative};
pub use permissions::{can_user_delete, can_user_edit, can_user_interact, PermissionDecision};
pub use transform::{transform_comment, transform_comments, transform_post, transform_posts};
