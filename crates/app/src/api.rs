//! API client construction and shared failure handling.

use protocolos_client::{ApiClient, ApiError};
use wasm_bindgen::JsValue;

use crate::notify::Notifier;
use crate::session::{force_logout, SessionContext};

/// Base URL of the backend, overridable with a `window.API_URL` global set by
/// the hosting page.
pub fn api_base_url() -> String {
    web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("API_URL")).ok())
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| protocolos_client::DEFAULT_API_URL.to_string())
}

/// A client carrying the current session's bearer token, if any.
pub fn api_client(session: SessionContext) -> ApiClient {
    match session.get_untracked() {
        Some(current) => ApiClient::with_token(api_base_url(), current.token),
        None => ApiClient::new(api_base_url()),
    }
}

/// Shared failure rule: a rejected token clears the session and redirects,
/// everything else degrades to a notification. Nothing is retried.
pub fn report_failure(notifier: Notifier, err: &ApiError, message: &str) {
    tracing::warn!(%err, "{message}");
    if err.is_unauthorized() {
        force_logout();
    } else {
        notifier.error(message);
    }
}
