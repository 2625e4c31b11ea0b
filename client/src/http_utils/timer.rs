//! Timers that work both natively and in the browser.

use std::future::Future;
use std::pin::pin;

use futures::future::{Either, select};

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms.min(u32::MAX as u64) as u32).await;
}

/// Runs `fut` to completion, or gives up after `timeout_ms` and returns `None`.
pub async fn with_timeout<F: Future>(fut: F, timeout_ms: Option<u64>) -> Option<F::Output> {
    let Some(timeout_ms) = timeout_ms else {
        return Some(fut.await);
    };
    let fut = pin!(fut);
    let timer = pin!(sleep_ms(timeout_ms));
    match select(fut, timer).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(_) => None,
    }
}
