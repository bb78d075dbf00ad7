//! Login accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::UserId;
use crate::role::Role;

/// A login account.
///
/// `password` is write-only: the backend never returns it, the client only
/// sends it on create/update. Student and director records reference accounts
/// through their `usuario` field; that link is the join key for identity-based
/// visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(rename = "idUsuario")]
    pub id: UserId,

    pub email: String,

    #[serde(rename = "rol")]
    pub role: Role,

    #[serde(rename = "contrasena", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(rename = "fechaCreacion", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserAccount {
    /// Case-insensitive substring match used by the accounts screen search box.
    pub fn matches_search(&self, term: &str) -> bool {
        self.email.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Write payload for `POST /usuarios` and `PUT /usuarios/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountPayload {
    pub email: String,

    #[serde(rename = "contrasena")]
    pub password: String,

    #[serde(rename = "rol")]
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_shape() {
        let account: UserAccount = serde_json::from_str(
            r#"{"idUsuario": 7, "email": "ana@ipn.mx", "rol": "ROLE_DIRECTOR"}"#,
        )
        .unwrap();
        assert_eq!(account.id, UserId::new(7));
        assert_eq!(account.role, Role::Director);
        assert!(account.password.is_none());
    }

    #[test]
    fn search_is_case_insensitive() {
        let account: UserAccount = serde_json::from_str(
            r#"{"idUsuario": 1, "email": "Ana@IPN.mx", "rol": "ROLE_USER"}"#,
        )
        .unwrap();
        assert!(account.matches_search("ana@"));
        assert!(!account.matches_search("bob"));
    }

    #[test]
    fn payload_serializes_wire_names() {
        let payload = AccountPayload {
            email: "nuevo@ipn.mx".into(),
            password: "secreta".into(),
            role: Role::Student,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["email"], "nuevo@ipn.mx");
        assert_eq!(value["contrasena"], "secreta");
        assert_eq!(value["rol"], "ROLE_USER");
    }
}
