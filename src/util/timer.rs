//! Delays between a session change and the redirect that follows it.
//!
//! Browser builds sleep on `setTimeout` via `gloo-timers`; native builds use
//! the tokio clock, which tests pause and advance deterministically.

use std::time::Duration;

#[async_trait::async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

#[cfg(feature = "native")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioTimer;

#[cfg(feature = "native")]
#[async_trait::async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTimer;

#[cfg(feature = "hydrate")]
#[async_trait::async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
}
