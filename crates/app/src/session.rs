//! The single reactive session holder.
//!
//! One context at the application root is the only writer to tab-scoped
//! storage; screens read the signal and never touch `sessionStorage`
//! themselves.

use leptos::*;
use protocolos_auth::{Session, SessionStore, Viewer, SESSION_STORAGE_KEY};

/// `sessionStorage`-backed store: survives reloads within one tab, dies with
/// the tab, and is not shared across tabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStore;

impl BrowserSessionStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.session_storage().ok()?
    }
}

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> Option<Session> {
        let raw = Self::storage()?.get_item(SESSION_STORAGE_KEY).ok()??;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(%err, "stored session is unreadable; ignoring it");
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        let Ok(raw) = serde_json::to_string(session) else {
            return;
        };
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(SESSION_STORAGE_KEY, &raw);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(SESSION_STORAGE_KEY);
        }
    }
}

/// Reactive view over the current session.
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: RwSignal<Option<Session>>,
}

impl SessionContext {
    pub fn get(&self) -> Option<Session> {
        self.session.get()
    }

    /// Non-reactive read for async blocks and event handlers.
    pub fn get_untracked(&self) -> Option<Session> {
        self.session.get_untracked()
    }

    pub fn viewer(&self) -> Option<Viewer> {
        self.session.get().as_ref().map(Viewer::from)
    }

    pub fn login(&self, session: Session) {
        BrowserSessionStore.save(&session);
        self.session.set(Some(session));
    }

    pub fn logout(&self) {
        BrowserSessionStore.clear();
        self.session.set(None);
    }
}

/// Install the context at the application root, seeded from storage so the
/// session survives a page reload.
pub fn provide_session() -> SessionContext {
    let ctx = SessionContext {
        session: create_rw_signal(BrowserSessionStore.load()),
    };
    provide_context(ctx);
    ctx
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

/// Forced logout on a rejected token: clear the stored session and
/// hard-redirect to the login screen, regardless of which screen made the
/// call. The redirect reloads the app, so in-memory state resets with it.
pub fn force_logout() {
    BrowserSessionStore.clear();
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(protocolos_auth::LOGIN_PATH);
    }
}
