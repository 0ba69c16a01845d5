//! Client configuration parsed from environment variables.
//!
//! Browser builds use [`ClientConfig::default`]; the CLI reads
//! `BLOODCONNECT_*` variables and lets flags override them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use crate::net::api::DEFAULT_API_BASE_URL;
use crate::net::realtime::{host_of, realtime_url};

pub const DEFAULT_STORAGE_PATH: &str = ".bloodconnect.json";
pub const DEMO_REDIRECT_DELAY: Duration = Duration::from_secs(1);
pub const FALLBACK_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub ws_url: String,
    pub demo_mode: bool,
    pub storage_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_api(DEFAULT_API_BASE_URL)
    }
}

impl ClientConfig {
    /// Config pointing at `api_base_url`, with the WebSocket endpoint on the same host.
    #[must_use]
    pub fn for_api(api_base_url: &str) -> Self {
        let api_base_url = api_base_url.trim_end_matches('/').to_owned();
        let ws_url = realtime_url(host_of(&api_base_url).as_deref().unwrap_or("localhost"));
        Self { api_base_url, ws_url, demo_mode: false, storage_path: PathBuf::from(DEFAULT_STORAGE_PATH) }
    }

    /// Build config from process environment variables.
    ///
    /// Optional:
    /// - `BLOODCONNECT_API_BASE_URL`: default `http://localhost:18080/api`
    /// - `BLOODCONNECT_WS_URL`: default `ws://<api host>/ws`
    /// - `BLOODCONNECT_DEMO_MODE`: `true`/`false`/`1`/`0`, default false
    /// - `BLOODCONNECT_STORAGE_PATH`: default `.bloodconnect.json`
    ///
    /// # Errors
    ///
    /// Returns an error if `BLOODCONNECT_DEMO_MODE` is not a boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `BLOODCONNECT_DEMO_MODE` is not a boolean.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("BLOODCONNECT_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let mut config = Self::for_api(&api_base_url);
        if let Some(ws_url) = lookup("BLOODCONNECT_WS_URL") {
            config.ws_url = ws_url;
        }
        if let Some(raw) = lookup("BLOODCONNECT_DEMO_MODE") {
            config.demo_mode = parse_bool(&raw)
                .ok_or(ConfigError::Invalid { var: "BLOODCONNECT_DEMO_MODE", value: raw.clone() })?;
        }
        if let Some(path) = lookup("BLOODCONNECT_STORAGE_PATH") {
            config.storage_path = PathBuf::from(path);
        }
        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Operating settings of the session controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Fabricate sessions and simulate backend success without any requests.
    pub demo_mode: bool,
    pub demo_redirect_delay: Duration,
    pub fallback_redirect_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            demo_mode: false,
            demo_redirect_delay: DEMO_REDIRECT_DELAY,
            fallback_redirect_delay: FALLBACK_REDIRECT_DELAY,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn demo() -> Self {
        Self { demo_mode: true, ..Self::default() }
    }
}

impl From<&ClientConfig> for SessionConfig {
    fn from(config: &ClientConfig) -> Self {
        Self { demo_mode: config.demo_mode, ..Self::default() }
    }
}
