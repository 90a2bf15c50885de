use anyhow::Context;
use campus_cache::ResponseCache;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feed_client::config::{FeedClientConfig, LogConfig, LogFormat};
use feed_client::services::filters::{
    filter_posts_by_hashtag, filter_posts_by_visibility, sort_posts_by_priority,
};
use feed_client::services::transform::transform_post_for_feed;
use feed_client::{FeedApi, FeedQuery};

fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log.level.clone().into());

    match log.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = FeedClientConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config.log);

    info!(
        "Starting feed-client against {} as {} ({})",
        config.api.base_url,
        if config.viewer.is_signed_in() { config.viewer.user_id.as_str() } else { "guest" },
        config.viewer.role
    );

    let cache = Arc::new(ResponseCache::new(config.cache.ttl()));
    let api = FeedApi::from_config(&config, cache.clone()).context("Failed to build API client")?;

    let hashtag = std::env::args().nth(1);
    let mut query = FeedQuery::new();
    if let Some(tag) = &hashtag {
        query = query.hashtag(tag);
    }

    let response = api.get_posts(&query).await;
    if let Some(error) = &response.error {
        warn!("Feed request failed: {}", error);
    }

    let now = Utc::now();
    let mut posts = filter_posts_by_visibility(&response.data.unwrap_or_default(), &config.viewer);
    if let Some(tag) = &hashtag {
        posts = filter_posts_by_hashtag(&posts, tag);
    }
    sort_posts_by_priority(&mut posts, &config.preferences, now);

    for post in &posts {
        let view = transform_post_for_feed(post, &config.viewer, now);
        println!(
            "[{}] {} ({}) {}",
            view.formatted_date, view.post.author.name, view.post.id, view.post.content.text
        );
        println!(
            "    {} likes, {} comments, {} shares, score {}{}",
            view.engagement_display.likes,
            view.engagement_display.comments,
            view.engagement_display.shares,
            view.engagement_score.weighted_score,
            if view.engagement_score.is_viral { ", viral" } else { "" }
        );
    }

    let stats = cache.stats();
    info!(
        "Rendered {} posts (cache hits={}, misses={}, writes={})",
        posts.len(),
        stats.hits,
        stats.misses,
        stats.writes
    );

    Ok(())
}
