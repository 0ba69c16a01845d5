//! DOM implementation of the page hooks.
//!
//! Elements are looked up on every call rather than cached: pages are static
//! HTML and the controller only runs a handful of updates per interaction.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::page::{Page, ThemeSurface, View};
use crate::state::prefs::Language;
use crate::util::dark_mode::{DARK_CLASS, THEME_ICON_ID};
use crate::util::reveal::{REVEAL_ACTIVE_CLASS, REVEAL_CLASS, REVEAL_THRESHOLD, RevealTracker};
use crate::util::toast::{TOAST_LIFETIME, Toast};

const TEXT_KEY_ATTR: &str = "data-key";
const REVEAL_ID_ATTR: &str = "data-reveal-id";
const ACTIVE_CLASS: &str = "active";

fn button_id(lang: Language) -> &'static str {
    match lang {
        Language::En => "btnEn",
        Language::Ur => "btnUr",
    }
}

fn elements(doc: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).filter_map(|node| node.dyn_into::<Element>().ok()).collect()
}

#[derive(Default)]
pub struct BrowserPage {
    reveal: Rc<RefCell<RevealTracker<u32>>>,
    next_reveal_id: Cell<u32>,
}

impl BrowserPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn document() -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }
}

impl Page for BrowserPage {
    fn navigate(&self, view: View) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(view.path()) {
            tracing::warn!(path = view.path(), error = ?e, "navigation failed");
        }
    }

    fn show_toast(&self, toast: Toast) {
        let Some(doc) = Self::document() else {
            return;
        };
        let (Ok(el), Some(body)) = (doc.create_element("div"), doc.body()) else {
            return;
        };
        el.set_class_name(&toast.css_class());
        el.set_text_content(Some(&toast.message));
        if body.append_child(&el).is_err() {
            return;
        }
        let millis = u32::try_from(TOAST_LIFETIME.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::callback::Timeout::new(millis, move || el.remove()).forget();
    }

    fn text_keys(&self) -> Vec<String> {
        let Some(doc) = Self::document() else {
            return Vec::new();
        };
        elements(&doc, &format!("[{TEXT_KEY_ATTR}]")).iter().filter_map(|el| el.get_attribute(TEXT_KEY_ATTR)).collect()
    }

    fn set_text(&self, key: &str, text: &str) {
        let Some(doc) = Self::document() else {
            return;
        };
        for el in elements(&doc, &format!("[{TEXT_KEY_ATTR}=\"{key}\"]")) {
            el.set_text_content(Some(text));
        }
    }

    fn set_language_active(&self, lang: Language, active: bool) {
        let Some(button) = Self::document().and_then(|doc| doc.get_element_by_id(button_id(lang))) else {
            return;
        };
        let _ = button.class_list().toggle_with_force(ACTIVE_CLASS, active);
    }

    fn init_animations(&self) {
        let Some(doc) = Self::document() else {
            return;
        };

        let tracker = self.reveal.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter().filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok()) {
                    let target = entry.target();
                    let Some(id) = target.get_attribute(REVEAL_ID_ATTR).and_then(|raw| raw.parse::<u32>().ok())
                    else {
                        continue;
                    };
                    if tracker.borrow_mut().record(&id, entry.is_intersecting()) {
                        let _ = target.class_list().add_1(REVEAL_ACTIVE_CLASS);
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&wasm_bindgen::JsValue::from_f64(REVEAL_THRESHOLD));
        let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                tracing::warn!(error = ?e, "IntersectionObserver unavailable");
                return;
            }
        };
        // observer lives as long as the page
        callback.forget();

        let mut tracker = self.reveal.borrow_mut();
        for el in elements(&doc, &format!(".{REVEAL_CLASS}")) {
            if el.class_list().contains(REVEAL_ACTIVE_CLASS) {
                continue;
            }
            let id = match el.get_attribute(REVEAL_ID_ATTR).and_then(|raw| raw.parse::<u32>().ok()) {
                Some(id) => id,
                None => {
                    let id = self.next_reveal_id.get();
                    self.next_reveal_id.set(id.saturating_add(1));
                    if el.set_attribute(REVEAL_ID_ATTR, &id.to_string()).is_err() {
                        continue;
                    }
                    id
                }
            };
            tracker.observe(id);
            observer.observe(&el);
        }
        tracing::debug!(observed = tracker.observed_count(), "reveal observers registered");
    }
}

impl ThemeSurface for BrowserPage {
    fn has_dark_class(&self) -> bool {
        Self::document().and_then(|doc| doc.body()).is_some_and(|body| body.class_list().contains(DARK_CLASS))
    }

    fn set_dark_class(&self, enabled: bool) {
        if let Some(body) = Self::document().and_then(|doc| doc.body()) {
            let _ = body.class_list().toggle_with_force(DARK_CLASS, enabled);
        }
    }

    fn set_theme_icon(&self, glyph: &str) {
        if let Some(icon) = Self::document().and_then(|doc| doc.get_element_by_id(THEME_ICON_ID)) {
            icon.set_text_content(Some(glyph));
        }
    }
}
