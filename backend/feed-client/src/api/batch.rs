//! Settle-all batch operations
//!
//! Every request in a batch runs concurrently and every outcome is kept,
//! in input order. One failure never cancels the others.

use campus_common::ApiResponse;
use futures::future::join_all;
use serde::Serialize;
use tracing::info;

use super::FeedApi;
use crate::models::{Post, ReactionSummary, ReactionType};

/// Result of one item of a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome<T> {
    pub id: String,
    pub response: ApiResponse<T>,
}

impl<T> BatchOutcome<T> {
    pub fn is_success(&self) -> bool {
        self.response.success
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn of<T>(outcomes: &[BatchOutcome<T>]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

impl FeedApi {
    /// Toggle `reaction` on every post in `post_ids`
    pub async fn batch_like_posts(
        &self,
        post_ids: &[String],
        reaction: ReactionType,
    ) -> Vec<BatchOutcome<ReactionSummary>> {
        let outcomes = join_all(post_ids.iter().map(|id| async move {
            BatchOutcome {
                id: id.clone(),
                response: self.toggle_post_like(id, reaction).await,
            }
        }))
        .await;
        log_summary("like", &outcomes);
        outcomes
    }

    /// Delete every post in `post_ids`
    pub async fn batch_delete_posts(&self, post_ids: &[String]) -> Vec<BatchOutcome<String>> {
        let outcomes = join_all(post_ids.iter().map(|id| async move {
            BatchOutcome {
                id: id.clone(),
                response: self.delete_post(id).await,
            }
        }))
        .await;
        log_summary("delete", &outcomes);
        outcomes
    }

    /// Fetch every post in `post_ids`
    pub async fn batch_get_posts(&self, post_ids: &[String]) -> Vec<BatchOutcome<Post>> {
        let outcomes = join_all(post_ids.iter().map(|id| async move {
            BatchOutcome {
                id: id.clone(),
                response: self.get_post(id).await,
            }
        }))
        .await;
        log_summary("get", &outcomes);
        outcomes
    }
}

fn log_summary<T>(operation: &str, outcomes: &[BatchOutcome<T>]) {
    let summary = BatchSummary::of(outcomes);
    info!(
        "Batch {} finished: {} succeeded, {} failed",
        operation, summary.succeeded, summary.failed
    );
}
