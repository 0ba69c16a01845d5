//! Donor dashboard actions.
//!
//! Each action is one request guarded by demo mode. The result is reported
//! to the user as a toast; none of them touch the current session.

#[cfg(test)]
#[path = "session_donor_test.rs"]
mod session_donor_test;

use super::SessionController;
use crate::net::error::ApiError;
use crate::net::types::{DonorDashboard, DonorPatch, DonorStatus};
use crate::util::toast::Toast;

pub const ACCEPT_DEMO_MESSAGE: &str = "Request Accepted (Demo)";
pub const ACCEPT_SUCCESS_MESSAGE: &str = "Life saved! Request completed.";
pub const ACCEPT_FAILED_MESSAGE: &str = "Failed to accept request";
pub const PROFILE_DEMO_MESSAGE: &str = "Profile updated (Demo)";
pub const PROFILE_SUCCESS_MESSAGE: &str = "Profile changes saved!";
pub const PROFILE_FAILED_MESSAGE: &str = "Failed to save profile";
pub const STATUS_FAILED_MESSAGE: &str = "Failed to update status on server";
pub const DASHBOARD_FAILED_MESSAGE: &str = "Failed to load dashboard";

#[must_use]
pub fn status_message(status: DonorStatus, demo: bool) -> String {
    if demo { format!("Status updated to {status} (Demo)") } else { format!("Status updated to {status}") }
}

impl SessionController {
    /// Set the donor's availability. Returns `true` if the change took effect.
    pub async fn update_donor_status(&self, donor_id: &str, status: DonorStatus) -> bool {
        if self.config.demo_mode {
            tracing::debug!(%donor_id, %status, "demo status update");
            self.page.show_toast(Toast::success(status_message(status, true)));
            return true;
        }
        let result = self.backend.update_donor_status(donor_id, status).await;
        self.report("update donor status", result, &status_message(status, false), STATUS_FAILED_MESSAGE)
    }

    /// Accept a blood request on behalf of the donor.
    pub async fn accept_request(&self, donor_id: &str, request_id: &str) -> bool {
        if self.config.demo_mode {
            self.page.show_toast(Toast::success(ACCEPT_DEMO_MESSAGE));
            return true;
        }
        let result = self.backend.accept_request(donor_id, request_id).await;
        self.report("accept request", result, ACCEPT_SUCCESS_MESSAGE, ACCEPT_FAILED_MESSAGE)
    }

    /// Save edited profile fields.
    pub async fn update_donor_info(&self, donor_id: &str, patch: &DonorPatch) -> bool {
        if self.config.demo_mode {
            self.page.show_toast(Toast::success(PROFILE_DEMO_MESSAGE));
            return true;
        }
        let result = self.backend.update_donor_info(donor_id, patch).await;
        self.report("update donor info", result, PROFILE_SUCCESS_MESSAGE, PROFILE_FAILED_MESSAGE)
    }

    /// Fetch the dashboard summary. Demo mode has no data to show.
    pub async fn donor_dashboard(&self, donor_id: &str) -> Option<DonorDashboard> {
        if self.config.demo_mode {
            tracing::debug!(%donor_id, "dashboard unavailable in demo mode");
            return None;
        }
        match self.backend.donor_dashboard(donor_id).await {
            Ok(dashboard) => Some(dashboard),
            Err(e) => {
                tracing::warn!(%donor_id, error = %e, "dashboard fetch failed");
                self.page.show_toast(Toast::error(DASHBOARD_FAILED_MESSAGE));
                None
            }
        }
    }

    fn report(&self, action: &str, result: Result<(), ApiError>, success: &str, failure: &str) -> bool {
        match result {
            Ok(()) => {
                self.page.show_toast(Toast::success(success));
                true
            }
            Err(e) => {
                tracing::warn!(action, error = %e, "donor action failed");
                self.page.show_toast(Toast::error(failure));
                false
            }
        }
    }
}
