//! Headless page that records everything the controllers do to it.
//!
//! Used to drive the controllers without a browser. Elements are declared up
//! front with the builder methods; the accessors expose what a user would see.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{Page, ThemeSurface, View};
use crate::state::prefs::Language;
use crate::util::reveal::{REVEAL_THRESHOLD, RevealTracker};
use crate::util::toast::Toast;

#[derive(Clone, Debug, PartialEq, Eq)]
struct TextElement {
    key: String,
    text: String,
}

#[derive(Debug, Default)]
pub struct MemoryPage {
    texts: RefCell<Vec<TextElement>>,
    language_buttons: RefCell<Option<HashMap<Language, bool>>>,
    toasts: RefCell<Vec<Toast>>,
    navigations: RefCell<Vec<View>>,
    reveal_elements: Vec<String>,
    reveal: RefCell<RevealTracker<String>>,
    dark: Cell<bool>,
    theme_icon: RefCell<Option<String>>,
}

impl MemoryPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element tagged with `data-key="{key}"` showing `text`.
    #[must_use]
    pub fn with_text(self, key: &str, text: &str) -> Self {
        self.texts.borrow_mut().push(TextElement { key: key.to_owned(), text: text.to_owned() });
        self
    }

    /// Add the `#btnEn` / `#btnUr` toggle buttons, English active.
    #[must_use]
    pub fn with_language_buttons(self) -> Self {
        *self.language_buttons.borrow_mut() = Some(HashMap::from([(Language::En, true), (Language::Ur, false)]));
        self
    }

    /// Add a `.reveal` element identified by `id`.
    #[must_use]
    pub fn with_reveal(mut self, id: &str) -> Self {
        self.reveal_elements.push(id.to_owned());
        self
    }

    /// Add the `#theme-icon` element showing `glyph`.
    #[must_use]
    pub fn with_theme_icon(self, glyph: &str) -> Self {
        *self.theme_icon.borrow_mut() = Some(glyph.to_owned());
        self
    }

    /// Current text of every element tagged with `key`, in document order.
    #[must_use]
    pub fn texts_for(&self, key: &str) -> Vec<String> {
        self.texts.borrow().iter().filter(|el| el.key == key).map(|el| el.text.clone()).collect()
    }

    /// Text of the first element tagged with `key`.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.texts_for(key).into_iter().next()
    }

    /// Active state of a language button; `None` when the page has no buttons.
    #[must_use]
    pub fn language_active(&self, lang: Language) -> Option<bool> {
        self.language_buttons.borrow().as_ref().and_then(|buttons| buttons.get(&lang).copied())
    }

    /// Every toast shown so far, oldest first.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    #[must_use]
    pub fn last_toast(&self) -> Option<Toast> {
        self.toasts.borrow().last().cloned()
    }

    /// Every navigation so far, oldest first.
    #[must_use]
    pub fn navigations(&self) -> Vec<View> {
        self.navigations.borrow().clone()
    }

    #[must_use]
    pub fn last_navigation(&self) -> Option<View> {
        self.navigations.borrow().last().copied()
    }

    /// Simulate `id` scrolling to `visible_ratio` of its area on screen.
    ///
    /// Returns `true` if this report revealed the element.
    pub fn scroll(&self, id: &str, visible_ratio: f64) -> bool {
        let intersecting = visible_ratio >= REVEAL_THRESHOLD;
        self.reveal.borrow_mut().record(&id.to_owned(), intersecting)
    }

    #[must_use]
    pub fn is_revealed(&self, id: &str) -> bool {
        self.reveal.borrow().is_revealed(&id.to_owned())
    }

    #[must_use]
    pub fn theme_icon(&self) -> Option<String> {
        self.theme_icon.borrow().clone()
    }
}

impl Page for MemoryPage {
    fn navigate(&self, view: View) {
        self.navigations.borrow_mut().push(view);
    }

    fn show_toast(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }

    fn text_keys(&self) -> Vec<String> {
        self.texts.borrow().iter().map(|el| el.key.clone()).collect()
    }

    fn set_text(&self, key: &str, text: &str) {
        for el in self.texts.borrow_mut().iter_mut().filter(|el| el.key == key) {
            text.clone_into(&mut el.text);
        }
    }

    fn set_language_active(&self, lang: Language, active: bool) {
        if let Some(buttons) = self.language_buttons.borrow_mut().as_mut() {
            buttons.insert(lang, active);
        }
    }

    fn init_animations(&self) {
        let mut tracker = self.reveal.borrow_mut();
        for id in &self.reveal_elements {
            tracker.observe(id.clone());
        }
    }
}

impl ThemeSurface for MemoryPage {
    fn has_dark_class(&self) -> bool {
        self.dark.get()
    }

    fn set_dark_class(&self, enabled: bool) {
        self.dark.set(enabled);
    }

    fn set_theme_icon(&self, glyph: &str) {
        if let Some(icon) = self.theme_icon.borrow_mut().as_mut() {
            glyph.clone_into(icon);
        }
    }
}
