//! Utility helpers shared across the controllers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate storage, timing and presentation rules from the
//! controller logic so each host (browser, CLI, tests) can reuse them.

pub mod dark_mode;
#[cfg(feature = "native")]
pub mod file_store;
pub mod i18n;
pub mod reveal;
pub mod storage;
pub mod timer;
pub mod toast;
