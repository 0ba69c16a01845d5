//! Dark mode initialization and toggle.
//!
//! Reads the saved preference from storage and applies the `.dark-mode` class
//! to the `<body>` element. Toggle flips the class, writes the new preference
//! back and swaps the `#theme-icon` glyph.
//!
//! TRADE-OFFS
//! ==========
//! Browser pages call `initialize` on load and again shortly after, in case
//! the body was not parsed yet on the first call. Initialization only ever
//! adds the class, so running it twice is harmless.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use std::rc::Rc;
use std::time::Duration;

use super::storage::Storage;
use crate::page::ThemeSurface;
use crate::state::prefs::Theme;

pub const DARK_CLASS: &str = "dark-mode";
pub const THEME_ICON_ID: &str = "theme-icon";
/// Shown while light: clicking switches to dark.
pub const MOON_GLYPH: &str = "🌙";
/// Shown while dark: clicking switches to light.
pub const SUN_GLYPH: &str = "☀️";
/// Delay before the second initialization pass.
pub const REINIT_DELAY: Duration = Duration::from_millis(100);

/// Icon for the toggle button while `theme` is active.
#[must_use]
pub fn icon_for(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => MOON_GLYPH,
        Theme::Dark => SUN_GLYPH,
    }
}

/// True for the Alt+D toggle shortcut.
#[must_use]
pub fn is_toggle_shortcut(alt: bool, key: &str) -> bool {
    alt && key == "d"
}

pub struct ThemeToggle {
    storage: Storage,
    surface: Rc<dyn ThemeSurface>,
}

impl ThemeToggle {
    #[must_use]
    pub fn new(storage: Storage, surface: Rc<dyn ThemeSurface>) -> Self {
        Self { storage, surface }
    }

    /// Saved preference, `Light` when nothing usable is stored.
    #[must_use]
    pub fn read_preference(&self) -> Theme {
        self.storage.load::<Theme>().unwrap_or_default()
    }

    /// Apply a saved dark preference to the page.
    pub fn initialize(&self) {
        if self.read_preference() == Theme::Dark {
            self.surface.set_dark_class(true);
            self.surface.set_theme_icon(icon_for(Theme::Dark));
        }
    }

    /// Theme currently shown, judged by the body class.
    #[must_use]
    pub fn current(&self) -> Theme {
        if self.surface.has_dark_class() { Theme::Dark } else { Theme::Light }
    }

    /// Flip the theme and persist the result.
    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.surface.set_dark_class(next == Theme::Dark);
        self.storage.save(&next);
        self.surface.set_theme_icon(icon_for(next));
        tracing::debug!(theme = next.as_str(), "theme toggled");
        next
    }
}
