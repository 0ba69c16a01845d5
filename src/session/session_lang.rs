//! Page language switching.

#[cfg(test)]
#[path = "session_lang_test.rs"]
mod session_lang_test;

use std::collections::BTreeSet;

use super::SessionController;
use crate::state::prefs::Language;
use crate::util::i18n;

impl SessionController {
    /// Switch the page to `lang` and remember the choice.
    ///
    /// Elements whose key has no entry in the target table keep their text.
    pub fn toggle_lang(&self, lang: Language) {
        self.language.set(lang);

        let keys: BTreeSet<String> = self.page.text_keys().into_iter().collect();
        let mut replaced = 0usize;
        for key in &keys {
            if let Some(text) = i18n::translate(lang, key) {
                self.page.set_text(key, text);
                replaced += 1;
            }
        }

        for candidate in Language::ALL {
            self.page.set_language_active(candidate, candidate == lang);
        }
        self.storage.save(&lang);
        tracing::debug!(lang = lang.code(), keys = keys.len(), replaced, "language applied");
    }
}
