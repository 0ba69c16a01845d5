//! Real-time update channel.
//!
//! The backend pushes notifications over `ws://<host>/ws`. Payloads are not
//! interpreted: every inbound message raises the same "updates active" toast
//! and is logged for debugging.

#[cfg(test)]
#[path = "realtime_test.rs"]
mod realtime_test;

use crate::util::toast::Toast;

pub const UPDATES_ACTIVE_MESSAGE: &str = "Real-time updates active";

/// WebSocket endpoint on `host` (`host[:port]`).
#[must_use]
pub fn realtime_url(host: &str) -> String {
    format!("ws://{host}/ws")
}

/// `host[:port]` of an HTTP base URL, used to derive the WebSocket endpoint.
#[must_use]
pub fn host_of(base_url: &str) -> Option<String> {
    let url = reqwest::Url::parse(base_url).ok()?;
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    })
}

/// Toast raised for each inbound message.
#[must_use]
pub fn update_toast() -> Toast {
    Toast::success(UPDATES_ACTIVE_MESSAGE)
}

#[cfg(feature = "native")]
#[derive(Debug, thiserror::Error)]
pub enum RealtimeError {
    #[error("websocket connect failed: {0}")]
    Connect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket stream failed: {0}")]
    Stream(Box<tokio_tungstenite::tungstenite::Error>),
}

/// Listen on `url` until the server closes, raising a toast per message.
///
/// Returns the number of messages received.
///
/// # Errors
///
/// Returns an error if the connection cannot be opened or breaks.
#[cfg(feature = "native")]
pub async fn watch(url: &str, page: &dyn crate::page::Page) -> Result<usize, RealtimeError> {
    use futures_util::StreamExt;
    use tokio_tungstenite::tungstenite::Message;

    let (mut stream, _) =
        tokio_tungstenite::connect_async(url).await.map_err(|e| RealtimeError::Connect(Box::new(e)))?;
    tracing::info!(%url, "websocket connected");

    let mut received = 0_usize;
    while let Some(frame) = stream.next().await {
        match frame.map_err(|e| RealtimeError::Stream(Box::new(e)))? {
            Message::Text(text) => {
                tracing::debug!(data = %text.as_str(), "update");
            }
            Message::Binary(bytes) => {
                tracing::debug!(len = bytes.len(), "binary update");
            }
            Message::Close(_) => break,
            _ => continue,
        }
        received += 1;
        page.show_toast(update_toast());
    }
    tracing::info!(%url, received, "websocket closed");
    Ok(received)
}
