//! Session controller: current user, login/logout, donor actions, language.
//!
//! ARCHITECTURE
//! ============
//! One `SessionController` per page. It owns the current-user and language
//! state and reaches the outside world only through injected capabilities:
//! typed storage, the backend, the page surface and a timer. Operations are
//! split by concern across `session_auth`, `session_donor` and
//! `session_lang`.
//!
//! State sits behind `RefCell`/`Cell` so browser event handlers can share one
//! `Rc<SessionController>`; no borrow is held across an `.await`.
//!
//! ERROR HANDLING
//! ==============
//! An unreachable backend never surfaces as an error. Login degrades to a
//! local session reported as [`LoginOutcome::Degraded`]; donor actions report
//! `false` and show an error toast. Only an explicit credential rejection is
//! an error for the caller.

pub mod session_auth;
pub mod session_donor;
pub mod session_lang;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::SessionConfig;
use crate::net::api::Backend;
use crate::net::error::ApiError;
use crate::page::Page;
use crate::state::prefs::Language;
use crate::state::session::Session;
use crate::util::storage::Storage;
use crate::util::timer::Timer;
use crate::util::toast::{Severity, Toast};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backend explicitly refused the credentials.
    #[error("login rejected: {message}")]
    Rejected { message: String },

    /// An operation needing a signed-in user ran without one.
    #[error("no active session")]
    NoSession,
}

/// How a login that produced a session got there.
#[derive(Debug)]
pub enum LoginOutcome {
    /// The backend accepted the credentials.
    Authenticated(Session),
    /// Demo mode fabricated the session without a request.
    Demo(Session),
    /// The backend was unreachable; the session exists only locally.
    Degraded { session: Session, reason: ApiError },
}

impl LoginOutcome {
    #[must_use]
    pub fn session(&self) -> &Session {
        match self {
            Self::Authenticated(session) | Self::Demo(session) | Self::Degraded { session, .. } => session,
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

pub struct SessionController {
    config: SessionConfig,
    storage: Storage,
    backend: Rc<dyn Backend>,
    page: Rc<dyn Page>,
    timer: Rc<dyn Timer>,
    current_user: RefCell<Option<Session>>,
    language: Cell<Language>,
}

impl SessionController {
    #[must_use]
    pub fn new(
        config: SessionConfig,
        storage: Storage,
        backend: Rc<dyn Backend>,
        page: Rc<dyn Page>,
        timer: Rc<dyn Timer>,
    ) -> Self {
        Self {
            config,
            storage,
            backend,
            page,
            timer,
            current_user: RefCell::new(None),
            language: Cell::new(Language::default()),
        }
    }

    /// Restore the saved session, start reveal animations and re-apply the
    /// saved language.
    pub fn initialize(&self) {
        let restored = self.storage.load::<Session>();
        if let Some(session) = &restored {
            tracing::info!(user_id = %session.user_id, role = %session.role, "restored session");
        }
        *self.current_user.borrow_mut() = restored;
        self.init_animations();
        if let Some(lang) = self.storage.load::<Language>() {
            self.toggle_lang(lang);
        }
    }

    pub fn init_animations(&self) {
        self.page.init_animations();
    }

    #[must_use]
    pub fn current_user(&self) -> Option<Session> {
        self.current_user.borrow().clone()
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language.get()
    }

    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.config.demo_mode
    }

    /// Show a transient notification.
    pub fn show_toast(&self, message: impl Into<String>, severity: Severity) {
        self.page.show_toast(Toast::new(message, severity));
    }

    fn establish(&self, session: &Session) {
        self.storage.save(session);
        *self.current_user.borrow_mut() = Some(session.clone());
        tracing::info!(user_id = %session.user_id, role = %session.role, "session established");
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub(crate) mod test_helpers {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::net::types::{DonorDashboard, DonorPatch, DonorStatus, LoginReply};
    use crate::page::memory::MemoryPage;
    use crate::util::storage::MemoryStore;
    use crate::util::timer::TokioTimer;

    /// Scripted answer to a login request.
    pub enum LoginScript {
        Accept(Session),
        Reject(Option<String>),
        Unreachable,
        Malformed,
    }

    /// Scripted answer to donor requests.
    #[derive(Clone, Copy)]
    pub enum DonorScript {
        Ok,
        Status(u16),
        Unreachable,
    }

    pub struct MockBackend {
        login: LoginScript,
        donor: DonorScript,
        pub calls: RefCell<Vec<String>>,
    }

    impl MockBackend {
        pub fn new(login: LoginScript, donor: DonorScript) -> Self {
            Self { login, donor, calls: RefCell::new(Vec::new()) }
        }

        pub fn login(script: LoginScript) -> Self {
            Self::new(script, DonorScript::Ok)
        }

        pub fn donor(script: DonorScript) -> Self {
            Self::new(LoginScript::Unreachable, script)
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn donor_result(&self) -> Result<(), ApiError> {
            match self.donor {
                DonorScript::Ok => Ok(()),
                DonorScript::Status(code) => Err(ApiError::Status(code)),
                DonorScript::Unreachable => Err(ApiError::Transport("connection refused".to_owned())),
            }
        }
    }

    #[async_trait::async_trait(?Send)]
    impl Backend for MockBackend {
        async fn login(&self, email: &str, _password: &str) -> Result<LoginReply, ApiError> {
            self.calls.borrow_mut().push(format!("login {email}"));
            match &self.login {
                LoginScript::Accept(session) => Ok(LoginReply::Accepted(session.clone())),
                LoginScript::Reject(message) => Ok(LoginReply::Rejected { message: message.clone() }),
                LoginScript::Unreachable => Err(ApiError::Transport("connection refused".to_owned())),
                LoginScript::Malformed => Err(ApiError::Malformed("expected value at line 1".to_owned())),
            }
        }

        async fn update_donor_status(&self, donor_id: &str, status: DonorStatus) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(format!("status {donor_id} {status}"));
            self.donor_result()
        }

        async fn accept_request(&self, donor_id: &str, request_id: &str) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(format!("accept {donor_id} {request_id}"));
            self.donor_result()
        }

        async fn update_donor_info(&self, donor_id: &str, patch: &DonorPatch) -> Result<(), ApiError> {
            let body = serde_json::to_string(patch).unwrap_or_default();
            self.calls.borrow_mut().push(format!("update {donor_id} {body}"));
            self.donor_result()
        }

        async fn donor_dashboard(&self, donor_id: &str) -> Result<DonorDashboard, ApiError> {
            self.calls.borrow_mut().push(format!("dashboard {donor_id}"));
            self.donor_result().map(|()| DonorDashboard {
                id: donor_id.to_owned(),
                name: "Sara".to_owned(),
                blood_group: "O+".to_owned(),
                status: "Available".to_owned(),
                total_donations: 2,
                badge_level: "Bronze".to_owned(),
                city: "Lahore".to_owned(),
                area: "Gulberg".to_owned(),
            })
        }
    }

    pub struct Fixture {
        pub controller: SessionController,
        pub page: Rc<MemoryPage>,
        pub store: Rc<MemoryStore>,
        pub backend: Rc<MockBackend>,
    }

    impl Fixture {
        pub fn stored(&self, key: &str) -> Option<String> {
            crate::util::storage::KeyValueStore::get(&*self.store, key)
        }
    }

    pub fn fixture(config: SessionConfig, store: MemoryStore, page: MemoryPage, backend: MockBackend) -> Fixture {
        let page = Rc::new(page);
        let store = Rc::new(store);
        let backend = Rc::new(backend);
        let controller = SessionController::new(
            config,
            Storage::new(store.clone()),
            backend.clone(),
            page.clone(),
            Rc::new(TokioTimer),
        );
        Fixture { controller, page, store, backend }
    }
}
