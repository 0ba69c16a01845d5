//! REST client for the BloodConnect backend.
//!
//! The [`Backend`] trait is the seam the session controller talks through;
//! [`HttpBackend`] implements it with `reqwest`, which uses `fetch` when built
//! for the browser.
//!
//! ERROR HANDLING
//! ==============
//! Connection and decode failures surface as transport errors so callers can
//! degrade instead of failing. Explicit non-2xx answers surface as
//! `ApiError::Status`, except on login, where the backend's JSON body carries
//! the rejection and is interpreted whatever the status code.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;

use super::error::ApiError;
use super::types::{
    AcceptRequest, DonorDashboard, DonorPatch, DonorStatus, DonorUpdateRequest, Health, LoginReply, LoginRequest,
    LoginResponse, StatusRequest,
};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:18080/api";

pub const LOGIN_PATH: &str = "/auth/login";
pub const DONOR_STATUS_PATH: &str = "/donor/status";
pub const ACCEPT_REQUEST_PATH: &str = "/donor/accept-request";
pub const DONOR_UPDATE_PATH: &str = "/donor/update";
pub const HEALTH_PATH: &str = "/health";

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn donor_dashboard_path(donor_id: &str) -> String {
    format!("/donor/dashboard/{donor_id}")
}

/// Backend operations the controller depends on.
#[async_trait::async_trait(?Send)]
pub trait Backend {
    /// Check credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if no interpretable answer came back.
    async fn login(&self, email: &str, password: &str) -> Result<LoginReply, ApiError>;

    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    async fn update_donor_status(&self, donor_id: &str, status: DonorStatus) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    async fn accept_request(&self, donor_id: &str, request_id: &str) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    async fn update_donor_info(&self, donor_id: &str, patch: &DonorPatch) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status or an
    /// unreadable body.
    async fn donor_dashboard(&self, donor_id: &str) -> Result<DonorDashboard, ApiError>;
}

/// [`Backend`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn post_ok<T: Serialize>(&self, path: &str, body: &T) -> Result<(), ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let resp = self.client.post(&url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "backend refused request");
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(())
    }

    /// Backend liveness and record counts from `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status or an
    /// unreadable body.
    pub async fn health(&self) -> Result<Health, ApiError> {
        let resp = self.client.get(self.url(HEALTH_PATH)).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }
        Ok(resp.json::<Health>().await?)
    }
}

#[async_trait::async_trait(?Send)]
impl Backend for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginReply, ApiError> {
        let url = self.url(LOGIN_PATH);
        tracing::debug!(%url, "POST");
        let resp = self.client.post(&url).json(&LoginRequest { email, password }).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        let parsed: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::Malformed(format!("login response (status {status}): {e}")))?;
        LoginReply::try_from(parsed)
    }

    async fn update_donor_status(&self, donor_id: &str, status: DonorStatus) -> Result<(), ApiError> {
        self.post_ok(DONOR_STATUS_PATH, &StatusRequest { donor_id, status }).await
    }

    async fn accept_request(&self, donor_id: &str, request_id: &str) -> Result<(), ApiError> {
        self.post_ok(ACCEPT_REQUEST_PATH, &AcceptRequest { donor_id, request_id }).await
    }

    async fn update_donor_info(&self, donor_id: &str, patch: &DonorPatch) -> Result<(), ApiError> {
        self.post_ok(DONOR_UPDATE_PATH, &DonorUpdateRequest { donor_id, patch }).await
    }

    async fn donor_dashboard(&self, donor_id: &str) -> Result<DonorDashboard, ApiError> {
        let resp = self.client.get(self.url(&donor_dashboard_path(donor_id))).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }
        Ok(resp.json::<DonorDashboard>().await?)
    }
}
