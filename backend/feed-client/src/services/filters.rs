//! Client-side selection and ordering over an in-memory list of posts
//!
//! Filters keep the input order. Sorts are stable, so ties keep the order the
//! backend returned.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use super::engagement::{calculate_engagement_score, calculate_post_priority};
use super::permissions::can_user_view;
use crate::models::{Post, UserPreferences, Viewer};

/// Posts the viewer is allowed to see
pub fn filter_posts_by_visibility(posts: &[Post], viewer: &Viewer) -> Vec<Post> {
    posts
        .iter()
        .filter(|post| can_user_view(post, viewer))
        .cloned()
        .collect()
}

/// Posts carrying `tag`, compared case-insensitively with or without `#`
pub fn filter_posts_by_hashtag(posts: &[Post], tag: &str) -> Vec<Post> {
    let wanted = tag.trim().trim_start_matches('#').to_lowercase();
    if wanted.is_empty() {
        return posts.to_vec();
    }
    posts
        .iter()
        .filter(|post| post.hashtags.iter().any(|t| *t == wanted))
        .cloned()
        .collect()
}

/// Posts created within `[start, end]`, both ends inclusive
pub fn filter_posts_by_date_range(posts: &[Post], start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Post> {
    posts
        .iter()
        .filter(|post| post.created_at >= start && post.created_at <= end)
        .cloned()
        .collect()
}

/// Posts whose likes + comments + shares reach `min_total`
pub fn filter_posts_by_engagement(posts: &[Post], min_total: u64) -> Vec<Post> {
    posts
        .iter()
        .filter(|post| calculate_engagement_score(post).total_engagement >= min_total)
        .cloned()
        .collect()
}

/// Highest weighted score first
pub fn sort_posts_by_engagement(posts: &mut [Post]) {
    posts.sort_by_cached_key(|post| std::cmp::Reverse(calculate_engagement_score(post).weighted_score));
}

/// Highest priority first
pub fn sort_posts_by_priority(posts: &mut Vec<Post>, preferences: &UserPreferences, now: DateTime<Utc>) {
    let mut scored: Vec<(Post, f64)> = posts
        .drain(..)
        .map(|post| {
            let score = calculate_post_priority(&post, preferences, now);
            (post, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    posts.extend(scored.into_iter().map(|(post, _)| post));
}

/// Newest first
pub fn sort_posts_by_date(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Engagement, PostContent, PostStatus, UserRole, Visibility, VisibilityType};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn create_test_post(id: &str, author: &str, kind: VisibilityType, likes: u64, age_hours: i64) -> Post {
        Post {
            id: id.to_string(),
            author: Author {
                user_id: author.to_string(),
                ..Default::default()
            },
            content: PostContent::default(),
            engagement: Engagement {
                likes,
                ..Default::default()
            },
            visibility: Visibility {
                kind,
                audience: vec![],
            },
            hashtags: vec![format!("tag{}", likes % 2)],
            mentions: vec![],
            status: PostStatus::Published,
            created_at: now() - Duration::hours(age_hours),
            updated_at: now() - Duration::hours(age_hours),
        }
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_private_post_of_other_user_is_hidden() {
        let posts = vec![
            create_test_post("public", "someone", VisibilityType::Public, 0, 1),
            create_test_post("private", "someone-else", VisibilityType::Private, 0, 1),
        ];

        let visible = filter_posts_by_visibility(&posts, &Viewer::new("viewer", UserRole::Member));

        assert_eq!(ids(&visible), vec!["public"]);
    }

    #[test]
    fn test_own_private_post_is_visible() {
        let posts = vec![create_test_post("mine", "viewer", VisibilityType::Private, 0, 1)];

        let visible = filter_posts_by_visibility(&posts, &Viewer::new("viewer", UserRole::Member));

        assert_eq!(ids(&visible), vec!["mine"]);
    }

    #[test]
    fn test_filter_by_hashtag() {
        let posts = vec![
            create_test_post("a", "u", VisibilityType::Public, 1, 1),
            create_test_post("b", "u", VisibilityType::Public, 2, 1),
            create_test_post("c", "u", VisibilityType::Public, 3, 1),
        ];

        assert_eq!(ids(&filter_posts_by_hashtag(&posts, "#TAG1")), vec!["a", "c"]);
        assert_eq!(ids(&filter_posts_by_hashtag(&posts, "")), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_filter_by_date_range_is_inclusive() {
        let posts = vec![
            create_test_post("old", "u", VisibilityType::Public, 0, 48),
            create_test_post("edge", "u", VisibilityType::Public, 0, 24),
            create_test_post("new", "u", VisibilityType::Public, 0, 1),
        ];

        let selected = filter_posts_by_date_range(&posts, now() - Duration::hours(24), now() - Duration::hours(1));

        assert_eq!(ids(&selected), vec!["edge", "new"]);
    }

    #[test]
    fn test_filter_by_engagement_floor() {
        let posts = vec![
            create_test_post("low", "u", VisibilityType::Public, 4, 1),
            create_test_post("high", "u", VisibilityType::Public, 5, 1),
        ];

        assert_eq!(ids(&filter_posts_by_engagement(&posts, 5)), vec!["high"]);
    }

    #[test]
    fn test_sort_by_engagement_is_stable() {
        let mut posts = vec![
            create_test_post("first-tie", "u", VisibilityType::Public, 5, 1),
            create_test_post("top", "u", VisibilityType::Public, 9, 1),
            create_test_post("second-tie", "u", VisibilityType::Public, 5, 1),
        ];

        sort_posts_by_engagement(&mut posts);

        assert_eq!(ids(&posts), vec!["top", "first-tie", "second-tie"]);
    }

    #[test]
    fn test_sort_by_priority_prefers_followed_authors() {
        let mut posts = vec![
            create_test_post("stranger", "u1", VisibilityType::Public, 0, 1),
            create_test_post("friend", "u2", VisibilityType::Public, 0, 1),
        ];
        let preferences = UserPreferences {
            followed_user_ids: vec!["u2".to_string()],
            interests: vec![],
        };

        sort_posts_by_priority(&mut posts, &preferences, now());

        assert_eq!(ids(&posts), vec!["friend", "stranger"]);
    }

    #[test]
    fn test_sort_by_date_newest_first() {
        let mut posts = vec![
            create_test_post("old", "u", VisibilityType::Public, 0, 10),
            create_test_post("new", "u", VisibilityType::Public, 0, 1),
        ];

        sort_posts_by_date(&mut posts);

        assert_eq!(ids(&posts), vec!["new", "old"]);
    }
}
