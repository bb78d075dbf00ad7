//! Per-request deadline.
//!
//! The backend contract has no cancellation story; without a deadline a hung
//! request would leave a screen in its loading state forever. Native builds
//! get this from reqwest's client-level timeout; wasm builds race the request
//! against a JS timer because the fetch backend exposes no timeout of its own.

use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[cfg(not(target_arch = "wasm32"))]
pub async fn with_deadline<T>(
    fut: impl core::future::Future<Output = crate::ApiResult<T>>,
) -> crate::ApiResult<T> {
    // reqwest's client timeout already bounds the request on native targets.
    fut.await
}

#[cfg(target_arch = "wasm32")]
pub async fn with_deadline<T>(
    fut: impl core::future::Future<Output = crate::ApiResult<T>>,
) -> crate::ApiResult<T> {
    use futures::future::{select, Either};
    use futures::pin_mut;

    let timer = sleep(REQUEST_TIMEOUT.as_millis() as i32);
    pin_mut!(fut);
    pin_mut!(timer);

    match select(fut, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(crate::ApiError::Timeout),
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = setTimeout)]
    fn set_timeout(handler: &js_sys::Function, timeout: i32) -> i32;
}

#[cfg(target_arch = "wasm32")]
async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        set_timeout(&resolve, ms);
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}
