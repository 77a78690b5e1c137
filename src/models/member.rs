//! Team member model matching the frontend Member interface.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A team member profile record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Relative path into the asset store, e.g. `uploads/image-....png`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields for creating a new member, collected from the multipart form.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewMember {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub bio: Option<String>,
}

/// Partial update for an existing member; omitted fields keep their prior values.
#[derive(Debug, Clone, Default, Validate)]
pub struct MemberPatch {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Role must not be empty"))]
    pub role: Option<String>,
    #[validate(email(message = "A valid email address is required"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub bio: Option<String>,
}
