//! UI gating for post actions
//!
//! These decisions only show or hide controls. The backend enforces the real
//! authorization on every request.

use serde::{Deserialize, Serialize};

use crate::models::{Post, Viewer, VisibilityType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    NotSignedIn,
    NotAuthor,
    NotInAudience,
    InsufficientRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum PermissionDecision {
    Allowed,
    Denied(DenialReason),
}

impl PermissionDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Whether the viewer may see the post at all
pub fn decide_view(post: &Post, viewer: &Viewer) -> PermissionDecision {
    if post.is_authored_by(&viewer.user_id) {
        return PermissionDecision::Allowed;
    }

    match post.visibility.kind {
        VisibilityType::Public => PermissionDecision::Allowed,
        VisibilityType::Connections if viewer.is_signed_in() => PermissionDecision::Allowed,
        VisibilityType::Connections => PermissionDecision::Denied(DenialReason::NotSignedIn),
        VisibilityType::Private => decide_private(post, viewer),
    }
}

/// Like, comment and share
pub fn decide_interaction(post: &Post, viewer: &Viewer) -> PermissionDecision {
    if !viewer.is_signed_in() {
        return PermissionDecision::Denied(DenialReason::NotSignedIn);
    }
    decide_view(post, viewer)
}

pub fn decide_edit(post: &Post, viewer: &Viewer) -> PermissionDecision {
    if !viewer.is_signed_in() {
        return PermissionDecision::Denied(DenialReason::NotSignedIn);
    }
    if post.is_authored_by(&viewer.user_id) {
        PermissionDecision::Allowed
    } else {
        PermissionDecision::Denied(DenialReason::NotAuthor)
    }
}

pub fn decide_delete(post: &Post, viewer: &Viewer) -> PermissionDecision {
    if !viewer.is_signed_in() {
        return PermissionDecision::Denied(DenialReason::NotSignedIn);
    }
    if post.is_authored_by(&viewer.user_id) || viewer.role.is_staff() {
        PermissionDecision::Allowed
    } else {
        PermissionDecision::Denied(DenialReason::InsufficientRole)
    }
}

pub fn can_user_view(post: &Post, viewer: &Viewer) -> bool {
    decide_view(post, viewer).is_allowed()
}

pub fn can_user_interact(post: &Post, viewer: &Viewer) -> bool {
    decide_interaction(post, viewer).is_allowed()
}

pub fn can_user_edit(post: &Post, viewer: &Viewer) -> bool {
    decide_edit(post, viewer).is_allowed()
}

pub fn can_user_delete(post: &Post, viewer: &Viewer) -> bool {
    decide_delete(post, viewer).is_allowed()
}

fn decide_private(post: &Post, viewer: &Viewer) -> PermissionDecision {
    if !viewer.is_signed_in() {
        return PermissionDecision::Denied(DenialReason::NotSignedIn);
    }
    if viewer.role.is_staff() || post.visibility.audience.iter().any(|id| *id == viewer.user_id) {
        PermissionDecision::Allowed
    } else {
        PermissionDecision::Denied(DenialReason::NotInAudience)
    }
}
