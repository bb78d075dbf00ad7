//! `protocolos-client` — typed REST client for the protocol-management API.
//!
//! A thin shell over `reqwest`: one `ApiClient` carries the base URL and the
//! session's bearer token; per-resource service modules mirror the backend
//! paths one-to-one. The paths are a compatibility surface with an existing
//! server and must not be altered.

pub mod client;
mod deadline;
pub mod error;
pub mod services;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use error::{ApiError, ApiResult};
pub use services::reports::ReportEmail;
