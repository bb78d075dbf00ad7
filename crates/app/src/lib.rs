//! `protocolos-app` — Leptos single-page client.
//!
//! **Responsibility:** wire the pure policy/guard/session modules to the DOM.
//! The app owns no durable state beyond the tab-scoped session record; every
//! screen fetches fresh collections on mount and reloads them after each
//! mutation.

pub mod api;
pub mod app;
pub mod download;
pub mod guard;
pub mod notify;
pub mod pages;
pub mod session;

pub use app::App;
