//! Wire types exchanged with the BloodConnect backend.
//!
//! All bodies are JSON with camelCase field names.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::state::session::{Role, Session};

// =============================================================================
// AUTH
// =============================================================================

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Raw `/auth/login` body. The backend sends the same shape for success
/// (with identity fields) and rejection (with `message`).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Interpreted login answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginReply {
    Accepted(Session),
    Rejected { message: Option<String> },
}

impl TryFrom<LoginResponse> for LoginReply {
    type Error = ApiError;

    fn try_from(resp: LoginResponse) -> Result<Self, Self::Error> {
        if !resp.success {
            return Ok(Self::Rejected { message: resp.message });
        }
        match (resp.role, resp.user_id, resp.name) {
            (Some(role), Some(user_id), Some(name)) => Ok(Self::Accepted(Session::new(role, user_id, name))),
            _ => Err(ApiError::Malformed("login succeeded without role, userId and name".to_owned())),
        }
    }
}

// =============================================================================
// DONOR
// =============================================================================

/// Donor availability as the backend spells it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DonorStatus {
    Available,
    Unavailable,
    Busy,
}

impl DonorStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
            Self::Busy => "Busy",
        }
    }
}

impl std::fmt::Display for DonorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DonorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            "busy" => Ok(Self::Busy),
            other => Err(format!("unknown donor status '{other}' (expected available, unavailable or busy)")),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest<'a> {
    pub donor_id: &'a str,
    pub status: DonorStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptRequest<'a> {
    pub donor_id: &'a str,
    pub request_id: &'a str,
}

/// Editable donor profile fields. Unset fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl DonorPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorUpdateRequest<'a> {
    pub donor_id: &'a str,
    #[serde(flatten)]
    pub patch: &'a DonorPatch,
}

/// Summary shown on the donor dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorDashboard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub blood_group: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_donations: u32,
    #[serde(default)]
    pub badge_level: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub area: String,
}

// =============================================================================
// HEALTH
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub donors: u64,
    #[serde(default)]
    pub recipients: u64,
}
