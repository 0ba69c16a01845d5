//! Browser entry points.
//!
//! SYSTEM CONTEXT
//! ==============
//! The static pages load the wasm module and call [`hydrate`] once the DOM is
//! ready. Inline handlers (`onclick="toggleLang('ur')"` and friends) call the
//! exported functions below, which all reach the same page-wide controller.
//!
//! ARCHITECTURE
//! ============
//! One `App` per page, held in a thread-local `Rc`. Async exports clone the
//! `Rc` out before awaiting so no thread-local borrow spans a suspension.

pub mod page;
pub mod realtime;
pub mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use crate::config::{ClientConfig, SessionConfig};
use crate::net::api::HttpBackend;
use crate::net::types::{DonorPatch, DonorStatus};
use crate::session::SessionController;
use crate::state::prefs::Language;
use crate::util::dark_mode::{REINIT_DELAY, ThemeToggle, is_toggle_shortcut};
use crate::util::storage::{KeyValueStore, MemoryStore, Storage};
use crate::util::timer::GlooTimer;
use crate::util::toast::Severity;
use page::BrowserPage;
use storage::LocalStorage;

struct App {
    session: SessionController,
    theme: ThemeToggle,
}

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

fn app() -> Result<Rc<App>, JsValue> {
    APP.with(|slot| slot.borrow().clone()).ok_or_else(|| JsValue::from_str("bloodconnect: hydrate() has not run"))
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn build() -> App {
    let config = ClientConfig::default();
    let store: Rc<dyn KeyValueStore> = match LocalStorage::open() {
        Ok(store) => Rc::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "falling back to in-memory storage");
            Rc::new(MemoryStore::new())
        }
    };
    let storage = Storage::new(store);
    let page = Rc::new(BrowserPage::new());
    let session = SessionController::new(
        SessionConfig::from(&config),
        storage.clone(),
        Rc::new(HttpBackend::new(config.api_base_url.clone())),
        page.clone(),
        Rc::new(GlooTimer),
    );
    App { session, theme: ThemeToggle::new(storage, page) }
}

fn install_shortcut(app: &Rc<App>) {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let app = app.clone();
    let handler = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |event: web_sys::KeyboardEvent| {
        if is_toggle_shortcut(event.alt_key(), &event.key()) {
            event.prevent_default();
            app.theme.toggle();
        }
    });
    if doc.add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref()).is_ok() {
        handler.forget();
    }
}

/// Set up logging, restore state and wire page-wide listeners.
#[wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let app = Rc::new(build());
    APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

    app.session.initialize();
    app.theme.initialize();
    let later = app.clone();
    let millis = u32::try_from(REINIT_DELAY.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::callback::Timeout::new(millis, move || later.theme.initialize()).forget();

    install_shortcut(&app);
    realtime::connect(Rc::new(BrowserPage::new()));
}

/// # Errors
///
/// Rejects with the server's message when the credentials were refused.
#[wasm_bindgen]
pub async fn login(email: String, password: String) -> Result<(), JsValue> {
    let app = app()?;
    app.session.login(&email, &password).await.map(|_| ()).map_err(to_js)
}

/// # Errors
///
/// Fails only if the page was not hydrated.
#[wasm_bindgen]
pub fn logout() -> Result<(), JsValue> {
    app()?.session.logout();
    Ok(())
}

/// # Errors
///
/// Fails for an unknown language code.
#[wasm_bindgen(js_name = toggleLang)]
pub fn toggle_lang(lang: String) -> Result<(), JsValue> {
    let lang: Language = lang.parse().map_err(to_js)?;
    app()?.session.toggle_lang(lang);
    Ok(())
}

/// # Errors
///
/// Fails only if the page was not hydrated.
#[wasm_bindgen(js_name = toggleDarkMode)]
pub fn toggle_dark_mode() -> Result<(), JsValue> {
    app()?.theme.toggle();
    Ok(())
}

/// # Errors
///
/// Fails only if the page was not hydrated.
#[wasm_bindgen(js_name = showToast)]
pub fn show_toast(message: String, kind: Option<String>) -> Result<(), JsValue> {
    let severity = match kind.as_deref() {
        Some("success") => Severity::Success,
        Some("warning") => Severity::Warning,
        Some("error") => Severity::Error,
        _ => Severity::Info,
    };
    app()?.session.show_toast(message, severity);
    Ok(())
}

/// # Errors
///
/// Fails for an unknown status value.
#[wasm_bindgen(js_name = updateDonorStatus)]
pub async fn update_donor_status(donor_id: String, status: String) -> Result<bool, JsValue> {
    let status: DonorStatus = status.parse().map_err(to_js)?;
    let app = app()?;
    Ok(app.session.update_donor_status(&donor_id, status).await)
}

/// # Errors
///
/// Fails only if the page was not hydrated.
#[wasm_bindgen(js_name = acceptRequest)]
pub async fn accept_request(donor_id: String, request_id: String) -> Result<bool, JsValue> {
    let app = app()?;
    Ok(app.session.accept_request(&donor_id, &request_id).await)
}

/// # Errors
///
/// Fails if `patch` is not an object of profile fields.
#[wasm_bindgen(js_name = updateDonorInfo)]
pub async fn update_donor_info(donor_id: String, patch: JsValue) -> Result<bool, JsValue> {
    let raw: String = js_sys::JSON::stringify(&patch)?.into();
    let patch: DonorPatch = serde_json::from_str(&raw).map_err(to_js)?;
    let app = app()?;
    Ok(app.session.update_donor_info(&donor_id, &patch).await)
}
