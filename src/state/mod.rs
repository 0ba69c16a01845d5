//! Client-side state records.
//!
//! DESIGN
//! ======
//! Session identity and display preferences are independent records with
//! separate lifecycles, so they live in separate modules and never reference
//! each other.

pub mod prefs;
pub mod session;
