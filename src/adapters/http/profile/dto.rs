//! HTTP DTOs for profile endpoints.
//!
//! Profiles themselves travel in their domain shape; these types cover the
//! request and response envelopes around them.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{Scale, ScoredCategory};
use crate::domain::decision::{Category, Profile, Theme};
use crate::domain::foundation::{ErrorCode, ProfileId, Timestamp, ValidationError};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a profile.
///
/// Clients normally assign the id; one is generated when absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub last_modified: Option<Timestamp>,
    #[serde(default)]
    pub starred: bool,
    pub theme: Option<Theme>,
}

impl CreateProfileRequest {
    pub fn into_profile(self, now: Timestamp) -> Result<Profile, ValidationError> {
        let id = match self.id {
            Some(id) => ProfileId::parse(id)?,
            None => ProfileId::new(),
        };
        let mut profile = Profile::new(
            id,
            self.name,
            self.categories,
            self.last_modified.unwrap_or(now),
        );
        profile.starred = self.starred;
        profile.theme = self.theme;
        Ok(profile)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Scores and scale of one profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleResponse {
    pub categories: Vec<ScoredCategory>,
    pub scale: Scale,
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn not_found(id: &ProfileId) -> Self {
        Self::new(
            ErrorCode::ProfileNotFound,
            format!("Profile not found: {}", id),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
