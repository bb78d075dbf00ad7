//! Per-resource service methods, mirroring the backend paths one-to-one.

pub mod accounts;
pub mod assignments;
pub mod auth;
pub mod departments;
pub mod directors;
pub mod protocols;
pub mod reports;
pub mod students;
