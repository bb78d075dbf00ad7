//! Session model and persistence contract.

use protocolos_core::{Role, UserId};
use serde::{Deserialize, Serialize};

/// Fixed storage key for the persisted session record.
pub const SESSION_STORAGE_KEY: &str = "usuario_ipn";

/// Authenticated identity as returned by `POST /auth/login`.
///
/// The record is persisted verbatim (bearer token included) for the lifetime
/// of the browser tab and destroyed on logout or on an
/// authentication-rejected response. The role is immutable for the lifetime
/// of the session; changing it requires a re-login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "idUsuario")]
    pub user_id: UserId,

    pub email: String,

    #[serde(rename = "rol")]
    pub role: Role,

    pub token: String,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Tab-scoped persistence for the session record.
///
/// Implementations must survive page reloads within one tab but must not
/// survive the tab closing or leak across tabs. There is exactly one writer
/// (login/logout); every other consumer reads through the in-memory copy.
pub trait SessionStore {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// In-memory stand-in for `sessionStorage`.
    #[derive(Default)]
    struct MemoryStore {
        slot: RefCell<Option<String>>,
    }

    impl SessionStore for MemoryStore {
        fn load(&self) -> Option<Session> {
            let raw = self.slot.borrow();
            raw.as_deref().and_then(|s| serde_json::from_str(s).ok())
        }

        fn save(&self, session: &Session) {
            if let Ok(raw) = serde_json::to_string(session) {
                *self.slot.borrow_mut() = Some(raw);
            }
        }

        fn clear(&self) {
            *self.slot.borrow_mut() = None;
        }
    }

    fn session() -> Session {
        Session {
            user_id: UserId::new(12),
            email: "laura@ipn.mx".into(),
            role: Role::Student,
            token: "jwt-token".into(),
        }
    }

    #[test]
    fn wire_shape_matches_login_response() {
        let raw = r#"{"idUsuario": 12, "email": "laura@ipn.mx", "rol": "ROLE_USER", "token": "jwt-token"}"#;
        let parsed: Session = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed, session());

        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["idUsuario"], 12);
        assert_eq!(value["rol"], "ROLE_USER");
        assert_eq!(value["token"], "jwt-token");
    }

    #[test]
    fn store_round_trip_and_clear() {
        let store = MemoryStore::default();
        assert!(store.load().is_none());

        store.save(&session());
        assert_eq!(store.load(), Some(session()));

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn unreadable_record_loads_as_none() {
        let store = MemoryStore::default();
        *store.slot.borrow_mut() = Some("{not json".into());
        assert!(store.load().is_none());
    }
}
