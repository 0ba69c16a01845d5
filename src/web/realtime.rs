//! Browser WebSocket listener for real-time updates.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{MessageEvent, WebSocket};

use crate::net::realtime::{realtime_url, update_toast};
use crate::page::Page;

/// Connect to `ws://<page host>/ws`; every message raises the updates toast.
pub fn connect(page: Rc<dyn Page>) {
    let Some(host) = web_sys::window().and_then(|w| w.location().host().ok()) else {
        return;
    };
    let url = realtime_url(&host);
    let socket = match WebSocket::new(&url) {
        Ok(socket) => socket,
        Err(e) => {
            tracing::warn!(%url, error = ?e, "websocket unavailable");
            return;
        }
    };

    let onopen = Closure::<dyn FnMut()>::new(move || tracing::info!("websocket connected"));
    socket.set_onopen(Some(onopen.as_ref().unchecked_ref()));
    onopen.forget();

    let onmessage = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        tracing::debug!(data = ?event.data().as_string(), "update");
        page.show_toast(update_toast());
    });
    socket.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();
}
