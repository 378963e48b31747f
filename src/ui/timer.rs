//! Frame and debounce delays for the renderers Dioxus targets.
//!
//! Desktop and mobile run on tokio. The browser has no tokio reactor, so the
//! web build waits on `setTimeout` through gloo-timers instead.

use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}
