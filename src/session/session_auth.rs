//! Login, logout and dashboard redirect.

#[cfg(test)]
#[path = "session_auth_test.rs"]
mod session_auth_test;

use super::{LoginOutcome, SessionController, SessionError};
use crate::net::types::LoginReply;
use crate::page::View;
use crate::state::session::{PendingRegistration, Role, Session};
use crate::util::toast::Toast;

pub const DEMO_LOGIN_MESSAGE: &str = "Logged in (Demo Mode)";
pub const FALLBACK_LOGIN_MESSAGE: &str = "Server down. Using local session";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// Dashboard page for a role.
#[must_use]
pub fn dashboard_for(role: Role) -> View {
    match role {
        Role::Donor => View::DonorDashboard,
        Role::Recipient => View::RecipientDashboard,
    }
}

impl SessionController {
    /// Sign in and navigate to the role's dashboard.
    ///
    /// An unreachable backend still signs the user in, with a local session
    /// reported as [`LoginOutcome::Degraded`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Rejected`] if the backend refused the
    /// credentials; the current session is left unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, SessionError> {
        let hint = self.storage.load::<PendingRegistration>().filter(|reg| reg.matches(email));

        if self.config.demo_mode {
            let session = Session::demo(email, hint.as_ref());
            self.establish(&session);
            self.page.show_toast(Toast::success(DEMO_LOGIN_MESSAGE));
            self.timer.sleep(self.config.demo_redirect_delay).await;
            self.redirect_to_dashboard()?;
            return Ok(LoginOutcome::Demo(session));
        }

        match self.backend.login(email, password).await {
            Ok(LoginReply::Accepted(session)) => {
                self.establish(&session);
                self.redirect_to_dashboard()?;
                Ok(LoginOutcome::Authenticated(session))
            }
            Ok(LoginReply::Rejected { message }) => {
                let message = message.filter(|m| !m.is_empty()).unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_owned());
                tracing::info!(%email, %message, "login rejected");
                self.page.show_toast(Toast::error(message.clone()));
                Err(SessionError::Rejected { message })
            }
            Err(reason) => {
                tracing::warn!(%email, error = %reason, "backend unavailable, using local session");
                let session = Session::fallback(email, hint.as_ref());
                self.establish(&session);
                self.page.show_toast(Toast::warning(FALLBACK_LOGIN_MESSAGE));
                self.timer.sleep(self.config.fallback_redirect_delay).await;
                self.redirect_to_dashboard()?;
                Ok(LoginOutcome::Degraded { session, reason })
            }
        }
    }

    /// Navigate to the dashboard for the current user's role.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoSession`] if nobody is signed in.
    pub fn redirect_to_dashboard(&self) -> Result<View, SessionError> {
        let role = self.current_user.borrow().as_ref().map(|s| s.role).ok_or(SessionError::NoSession)?;
        let view = dashboard_for(role);
        self.page.navigate(view);
        Ok(view)
    }

    /// Forget the session locally and return to the landing page.
    pub fn logout(&self) {
        self.storage.remove::<Session>();
        if let Some(session) = self.current_user.borrow_mut().take() {
            tracing::info!(user_id = %session.user_id, "logged out");
        }
        self.page.navigate(View::Landing);
    }
}
