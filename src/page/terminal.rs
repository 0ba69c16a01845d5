//! Terminal rendering of the page hooks for the CLI.
//!
//! Toasts go to stderr with a severity tag, navigation prints the target page,
//! and the translation hooks print each translated label. The "page" exposes
//! one text element per English dictionary key, so switching language shows
//! which labels each table covers.

use super::{Page, ThemeSurface, View};
use crate::state::prefs::{Language, Theme};
use crate::util::i18n;
use crate::util::toast::{Severity, Toast};

#[derive(Debug, Default)]
pub struct TerminalPage {
    dark: std::cell::Cell<bool>,
}

impl TerminalPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Page for TerminalPage {
    fn navigate(&self, view: View) {
        tracing::debug!(path = view.path(), "navigate");
        println!("-> {}", view.path());
    }

    fn show_toast(&self, toast: Toast) {
        let tag = match toast.severity {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Warning => "warn",
            Severity::Error => "error",
        };
        eprintln!("[{tag}] {}", toast.message);
    }

    fn text_keys(&self) -> Vec<String> {
        i18n::keys(Language::En).map(str::to_owned).collect()
    }

    fn set_text(&self, key: &str, text: &str) {
        println!("{key}: {text}");
    }

    fn set_language_active(&self, lang: Language, active: bool) {
        if active {
            println!("language: {}", lang.code());
        }
    }

    fn init_animations(&self) {}
}

impl ThemeSurface for TerminalPage {
    fn has_dark_class(&self) -> bool {
        self.dark.get()
    }

    fn set_dark_class(&self, enabled: bool) {
        self.dark.set(enabled);
    }

    fn set_theme_icon(&self, glyph: &str) {
        let theme = if self.dark.get() { Theme::Dark } else { Theme::Light };
        println!("theme: {} {glyph}", theme.as_str());
    }
}
