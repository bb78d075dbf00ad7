//! Screen components.

pub mod accounts;
pub mod dashboard;
pub mod departments;
pub mod directors;
pub mod login;
pub mod protocol_detail;
pub mod protocol_form;
pub mod protocols_list;
pub mod students;
