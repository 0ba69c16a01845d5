//! Backend call failures.

/// Errors produced by backend requests.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, reset).
    #[error("backend unreachable: {0}")]
    Transport(String),

    /// A response arrived but its body could not be understood.
    #[error("malformed backend response: {0}")]
    Malformed(String),

    /// The backend answered with a non-success HTTP status.
    #[error("backend returned status {0}")]
    Status(u16),
}

impl ApiError {
    /// True when the backend is effectively unavailable: nothing usable came
    /// back, as opposed to an explicit non-success answer.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Malformed(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() { Self::Malformed(e.to_string()) } else { Self::Transport(e.to_string()) }
    }
}
