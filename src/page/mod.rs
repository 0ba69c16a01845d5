//! Page surfaces the controllers render into.
//!
//! SYSTEM CONTEXT
//! ==============
//! The static HTML pages own layout; controllers only touch a narrow set of
//! hooks: `data-key` text, the two language buttons, toasts, reveal elements,
//! the body theme class and navigation between pages. Each host provides its
//! own implementation: the browser DOM (`web::page::BrowserPage`), a terminal for
//! the CLI, and an in-memory page for tests.

pub mod memory;
#[cfg(feature = "native")]
pub mod terminal;

use crate::state::prefs::Language;
use crate::util::toast::Toast;

/// Pages the controller navigates between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Landing,
    DonorDashboard,
    RecipientDashboard,
}

impl View {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Landing => "index.html",
            Self::DonorDashboard => "dashboard-donor.html",
            Self::RecipientDashboard => "dashboard-recipient.html",
        }
    }
}

/// DOM hooks used by the session controller.
pub trait Page {
    fn navigate(&self, view: View);

    /// Append a toast; the page removes it after `TOAST_LIFETIME`.
    fn show_toast(&self, toast: Toast);

    /// Text keys of every element tagged for translation.
    fn text_keys(&self) -> Vec<String>;

    /// Replace the visible text of every element tagged with `key`.
    fn set_text(&self, key: &str, text: &str);

    /// Set the active state of a language toggle button, if present.
    fn set_language_active(&self, lang: Language, active: bool);

    /// Start observing `.reveal` elements for the one-shot reveal effect.
    fn init_animations(&self);
}

/// Body class and icon hooks used by the theme toggle.
pub trait ThemeSurface {
    fn has_dark_class(&self) -> bool;
    fn set_dark_class(&self, enabled: bool);
    fn set_theme_icon(&self, glyph: &str);
}
