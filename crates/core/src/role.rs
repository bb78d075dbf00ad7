//! Account roles.

use serde::{Deserialize, Serialize};

/// Role attached to a login account.
///
/// The wire strings are fixed by the backend; `ROLE_USER` denotes a student
/// account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_DIRECTOR")]
    Director,
    #[serde(rename = "ROLE_USER")]
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Director, Role::Student];

    /// The string sent over the wire.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::Admin => "ROLE_ADMIN",
            Role::Director => "ROLE_DIRECTOR",
            Role::Student => "ROLE_USER",
        }
    }

    /// Human-readable label used in tables and badges.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Director => "Director",
            Role::Student => "Alumno",
        }
    }

    pub fn from_wire(value: &str) -> Option<Role> {
        Role::ALL.iter().copied().find(|r| r.as_wire() == value)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_wire()));
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn student_is_role_user() {
        assert_eq!(Role::Student.as_wire(), "ROLE_USER");
        assert_eq!(Role::from_wire("ROLE_USER"), Some(Role::Student));
        assert_eq!(Role::from_wire("ROLE_ROOT"), None);
    }
}
