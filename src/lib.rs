//! # bloodconnect
//!
//! Client-side controller for the BloodConnect blood donation platform:
//! the signed-in session, donor dashboard actions, toast notifications,
//! English/Urdu page text, the dark-mode theme and scroll reveal effects.
//!
//! The controller logic is host-agnostic and talks to the outside world
//! through capability traits (`KeyValueStore`, `Backend`, `Page`,
//! `ThemeSurface`, `Timer`). The `hydrate` feature wires them to the browser
//! (`web` module); the default `native` feature provides the
//! `bloodconnect` CLI with a JSON file store and a terminal page.

pub mod config;
pub mod net;
pub mod page;
pub mod session;
pub mod state;
pub mod util;
#[cfg(feature = "hydrate")]
pub mod web;
