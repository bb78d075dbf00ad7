//! `protocolos-auth` — session model, scoped-visibility policy, route guard.
//!
//! This crate is intentionally decoupled from HTTP and browser storage: it
//! holds the one real algorithm of the client (who sees which records, who may
//! do what) as pure functions, plus the session/guard contracts the app crate
//! wires to the DOM.

pub mod guard;
pub mod policy;
pub mod session;

pub use guard::{RouteDecision, RouteGuard, DEFAULT_LANDING, LOGIN_PATH};
pub use policy::Viewer;
pub use session::{Session, SessionStore, SESSION_STORAGE_KEY};
