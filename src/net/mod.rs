//! Networking: backend REST client, wire types and the real-time channel.

pub mod api;
pub mod error;
pub mod realtime;
pub mod types;
