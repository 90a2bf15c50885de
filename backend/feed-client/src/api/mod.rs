//! Feed API wrappers over the `/feed` REST surface
//!
//! Every operation returns `ApiResponse<T>` and never an `Err`:
//! - reads consult the response cache first and go through the retry policy
//! - list reads fall back to a single placeholder item on failure
//! - mutations never retry and invalidate every cached feed entry on success

mod batch;
pub mod fallback;

pub use batch::{BatchOutcome, BatchSummary};

use campus_cache::{CacheKey, ResponseCache};
use campus_common::{ApiError, ApiResponse, Pagination, RestClient};
use chrono::Utc;
use resilience::{with_retry_if, RetryConfig};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::FeedClientConfig;
use crate::models::{
    AddCommentRequest, Comment, CreatePostRequest, FeedQuery, ItemPayload, ListPayload, Post,
    RawComment, RawPost, RawReaction, ReactionRequest, ReactionSummary, ReactionType,
    UpdatePostRequest,
};
use crate::services::transform::{transform_comment, transform_comments, transform_post, transform_posts};
use fallback::{fallback_comment, fallback_post};

/// Cached form of a list response
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedPage<T> {
    items: Vec<T>,
    pagination: Option<Pagination>,
}

/// Client for the feed endpoints
#[derive(Clone)]
pub struct FeedApi {
    client: RestClient,
    cache: Option<Arc<ResponseCache>>,
    retry: Option<RetryConfig>,
}

impl FeedApi {
    pub fn new(client: RestClient) -> Self {
        Self {
            client,
            cache: None,
            retry: None,
        }
    }

    /// Serve reads from `cache` and populate it on success
    pub fn with_cache(mut self, cache: Arc<ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Retry reads that fail with a retryable error
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Wire a client from configuration; the cache is shared with the caller
    pub fn from_config(config: &FeedClientConfig, cache: Arc<ResponseCache>) -> Result<Self, ApiError> {
        let client = RestClient::new(
            &config.api.base_url,
            Duration::from_secs(config.api.request_timeout_secs),
        )?
        .with_auth_token(config.api.auth_token.clone());

        let mut api = Self::new(client);
        if config.cache.enabled {
            api = api.with_cache(cache);
        }
        if config.api.retry_enabled {
            api = api.with_retry(resilience::network_retry());
        }
        Ok(api)
    }

    // ============= Reads =============

    /// `GET /feed` with the query forwarded verbatim
    pub async fn get_posts(&self, query: &FeedQuery) -> ApiResponse<Vec<Post>> {
        let key = CacheKey::feed_list(query.params().iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if let Some(page) = self.cache_get::<CachedPage<Post>>(&key) {
            return ApiResponse::ok_paginated(page.items, page.pagination);
        }

        match self.read::<ListPayload<RawPost>>("/feed", query.params()).await {
            Ok(payload) => {
                let (raw, pagination) = payload.into_parts();
                let posts = transform_posts(&raw);
                debug!("Fetched {} posts", posts.len());
                self.cache_put(
                    &key,
                    &CachedPage {
                        items: posts.clone(),
                        pagination: pagination.clone(),
                    },
                );
                ApiResponse::ok_paginated(posts, pagination)
            }
            Err(err) => {
                warn!("Failed to fetch feed, serving fallback: {}", err);
                ApiResponse::failure_with_fallback(&err, vec![fallback_post(Utc::now())])
            }
        }
    }

    /// `GET /feed/{id}`
    pub async fn get_post(&self, post_id: &str) -> ApiResponse<Post> {
        let key = CacheKey::post(post_id);
        if let Some(post) = self.cache_get::<Post>(&key) {
            return ApiResponse::ok(post);
        }

        let result = self
            .read::<ItemPayload<RawPost>>(&format!("/feed/{}", post_id), &[])
            .await
            .and_then(|payload| {
                transform_post(Some(&payload.into_inner()))
                    .ok_or_else(|| ApiError::NotFound(format!("post {}", post_id)))
            });

        match result {
            Ok(post) => {
                self.cache_put(&key, &post);
                ApiResponse::ok(post)
            }
            Err(err) => {
                warn!("Failed to fetch post {}: {}", post_id, err);
                ApiResponse::failure(&err)
            }
        }
    }

    /// `GET /feed/{id}/comments`
    pub async fn get_post_comments(&self, post_id: &str) -> ApiResponse<Vec<Comment>> {
        let key = CacheKey::post_comments(post_id);
        if let Some(page) = self.cache_get::<CachedPage<Comment>>(&key) {
            return ApiResponse::ok_paginated(page.items, page.pagination);
        }

        match self
            .read::<ListPayload<RawComment>>(&format!("/feed/{}/comments", post_id), &[])
            .await
        {
            Ok(payload) => {
                let (raw, pagination) = payload.into_parts();
                let comments = transform_comments(&raw, post_id);
                self.cache_put(
                    &key,
                    &CachedPage {
                        items: comments.clone(),
                        pagination: pagination.clone(),
                    },
                );
                ApiResponse::ok_paginated(comments, pagination)
            }
            Err(err) => {
                warn!("Failed to fetch comments for {}, serving fallback: {}", post_id, err);
                ApiResponse::failure_with_fallback(&err, vec![fallback_comment(post_id, Utc::now())])
            }
        }
    }

    // ============= Mutations =============

    /// `POST /feed`; invalid requests fail locally without a round trip
    pub async fn create_post(&self, request: &CreatePostRequest) -> ApiResponse<Post> {
        if let Err(err) = request.check() {
            debug!("Rejected post before sending: {}", err);
            return ApiResponse::failure(&err);
        }

        let result = self
            .client
            .post::<_, ItemPayload<RawPost>>("/feed", &request.to_body())
            .await
            .and_then(|payload| {
                transform_post(Some(&payload.into_inner()))
                    .ok_or_else(|| ApiError::Fetch("Backend returned a post without an id".to_string()))
            });

        match result {
            Ok(post) => {
                info!("Created post {}", post.id);
                self.invalidate_feed();
                ApiResponse::ok(post)
            }
            Err(err) => {
                warn!("Failed to create post: {}", err);
                ApiResponse::failure(&err)
            }
        }
    }

    /// `PUT /feed/{id}`
    pub async fn update_post(&self, post_id: &str, request: &UpdatePostRequest) -> ApiResponse<Post> {
        if let Err(err) = request.check() {
            debug!("Rejected update of {} before sending: {}", post_id, err);
            return ApiResponse::failure(&err);
        }

        let result = self
            .client
            .put::<_, ItemPayload<RawPost>>(&format!("/feed/{}", post_id), &request.to_body())
            .await
            .and_then(|payload| {
                transform_post(Some(&payload.into_inner()))
                    .ok_or_else(|| ApiError::Fetch("Backend returned a post without an id".to_string()))
            });

        match result {
            Ok(post) => {
                info!("Updated post {}", post.id);
                self.invalidate_feed();
                ApiResponse::ok(post)
            }
            Err(err) => {
                warn!("Failed to update post {}: {}", post_id, err);
                ApiResponse::failure(&err)
            }
        }
    }

    /// `DELETE /feed/{id}`; the data is the deleted id
    pub async fn delete_post(&self, post_id: &str) -> ApiResponse<String> {
        match self.client.delete(&format!("/feed/{}", post_id)).await {
            Ok(()) => {
                info!("Deleted post {}", post_id);
                self.invalidate_feed();
                ApiResponse::ok(post_id.to_string())
            }
            Err(err) => {
                warn!("Failed to delete post {}: {}", post_id, err);
                ApiResponse::failure(&err)
            }
        }
    }

    /// `POST /feed/{id}/like`
    pub async fn toggle_post_like(&self, post_id: &str, reaction: ReactionType) -> ApiResponse<ReactionSummary> {
        let body = ReactionRequest {
            reaction_type: reaction,
        };

        match self
            .client
            .post::<_, ItemPayload<RawReaction>>(&format!("/feed/{}/like", post_id), &body)
            .await
        {
            Ok(payload) => {
                let raw = payload.into_inner();
                let summary = ReactionSummary {
                    post_id: post_id.to_string(),
                    liked: raw.liked.unwrap_or(true),
                    likes: raw.likes.unwrap_or(0).max(0) as u64,
                    reaction_type: raw
                        .reaction_type
                        .and_then(|r| serde_json::from_value(serde_json::Value::String(r)).ok())
                        .unwrap_or(reaction),
                };
                info!("Toggled reaction on post {} (liked={})", post_id, summary.liked);
                self.invalidate_feed();
                ApiResponse::ok(summary)
            }
            Err(err) => {
                warn!("Failed to toggle reaction on post {}: {}", post_id, err);
                ApiResponse::failure(&err)
            }
        }
    }

    /// `POST /feed/{id}/comments`
    pub async fn add_post_comment(&self, post_id: &str, content: &str) -> ApiResponse<Comment> {
        let request = AddCommentRequest::new(content);
        if let Err(err) = request.check() {
            return ApiResponse::failure(&err);
        }

        let result = self
            .client
            .post::<_, ItemPayload<RawComment>>(&format!("/feed/{}/comments", post_id), &request)
            .await
            .and_then(|payload| {
                transform_comment(Some(&payload.into_inner()), post_id)
                    .ok_or_else(|| ApiError::Fetch("Backend returned a comment without an id".to_string()))
            });

        match result {
            Ok(comment) => {
                info!("Added comment {} to post {}", comment.id, post_id);
                self.invalidate_feed();
                ApiResponse::ok(comment)
            }
            Err(err) => {
                warn!("Failed to comment on post {}: {}", post_id, err);
                ApiResponse::failure(&err)
            }
        }
    }

    // ============= Helpers =============

    async fn read<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> Result<T, ApiError> {
        match &self.retry {
            Some(retry) => {
                with_retry_if(retry, || self.client.get::<T>(path, query), ApiError::is_retryable).await
            }
            None => self.client.get::<T>(path, query).await,
        }
    }

    fn cache_get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        match cache.get::<T>(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("Dropping unreadable cache entry {}: {}", key, err);
                cache.invalidate(key);
                None
            }
        }
    }

    fn cache_put<T: Serialize>(&self, key: &str, value: &T) {
        if let Some(cache) = &self.cache {
            if let Err(err) = cache.set_default(key, value) {
                warn!("Failed to cache {}: {}", key, err);
            }
        }
    }

    fn invalidate_feed(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_prefix(&CacheKey::feed_prefix());
        }
    }
}
