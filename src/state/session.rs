//! Session identity records for the current browser profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! A `Session` is written after every login (real, demo or fallback) and read
//! back on startup. `PendingRegistration` is left behind by the registration
//! pages and only biases which identity a demo/fallback login picks.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

/// Identity used when the backend is unreachable and no registration hint matches.
pub const FALLBACK_USER_ID: &str = "FALLBACK-001";
pub const FALLBACK_NAME: &str = "Ahmed Khan";
pub const FALLBACK_ROLE: Role = Role::Donor;

/// Identity used in demo mode when no registration hint matches.
pub const DEMO_USER_ID: &str = "DEMO-001";
pub const DEMO_NAME: &str = "Demo User";

/// Which side of the donation a user is on.
///
/// Decoding is lenient: anything other than `"donor"` is a recipient, the same
/// rule the dashboard redirect applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Donor,
    Recipient,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Recipient => "recipient",
        }
    }

    /// Role implied by a bare email address in demo mode.
    #[must_use]
    pub fn guess_from_email(email: &str) -> Self {
        if email.contains("donor") { Self::Donor } else { Self::Recipient }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        if raw == "donor" { Self::Donor } else { Self::Recipient }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated (or locally synthesized) identity of the current user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub success: bool,
    pub role: Role,
    pub user_id: String,
    pub name: String,
}

impl Session {
    #[must_use]
    pub fn new(role: Role, user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { success: true, role, user_id: user_id.into(), name: name.into() }
    }

    /// Session fabricated in demo mode without contacting the backend.
    ///
    /// The email decides the role unless a matching registration hint names one.
    #[must_use]
    pub fn demo(email: &str, hint: Option<&PendingRegistration>) -> Self {
        let mut role = Role::guess_from_email(email);
        let mut name = DEMO_NAME.to_owned();
        if let Some(hint) = hint.filter(|h| h.matches(email)) {
            role = hint.role.unwrap_or(role);
            if let Some(hint_name) = hint.name.as_deref().filter(|n| !n.is_empty()) {
                name = hint_name.to_owned();
            }
        }
        Self::new(role, DEMO_USER_ID, name)
    }

    /// Session synthesized when the backend cannot be reached.
    #[must_use]
    pub fn fallback(email: &str, hint: Option<&PendingRegistration>) -> Self {
        let mut role = FALLBACK_ROLE;
        let mut name = FALLBACK_NAME.to_owned();
        if let Some(hint) = hint.filter(|h| h.matches(email)) {
            role = hint.role.unwrap_or(Role::Recipient);
            if let Some(hint_name) = hint.name.as_deref().filter(|n| !n.is_empty()) {
                name = hint_name.to_owned();
            }
        }
        Self::new(role, FALLBACK_USER_ID, name)
    }
}

/// Registration details saved by an earlier sign-up step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRegistration {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl PendingRegistration {
    /// Exact, case-sensitive email comparison.
    #[must_use]
    pub fn matches(&self, email: &str) -> bool {
        self.email == email
    }
}
