//! Response envelope shared by every feed client wrapper
//!
//! UI collaborators depend on this exact shape:
//! `{ success, data, error, pagination? }`, serialized camelCase.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Standard response format for client wrappers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            pagination: None,
        }
    }

    pub fn ok_paginated(data: T, pagination: Option<Pagination>) -> Self {
        Self {
            pagination,
            ..Self::ok(data)
        }
    }

    /// Failure without data
    pub fn failure(err: &ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.user_message()),
            pagination: None,
        }
    }

    /// Failure that still carries renderable data
    pub fn failure_with_fallback(err: &ApiError, fallback: T) -> Self {
        Self {
            data: Some(fallback),
            ..Self::failure(err)
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            pagination: self.pagination,
        }
    }
}

/// Pagination block returned by list endpoints
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let has_more = (page as u64) * (limit as u64) < total;
        Self {
            page,
            limit,
            total,
            has_more,
        }
    }
}
