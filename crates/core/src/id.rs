//! Strongly-typed identifiers used across the domain.
//!
//! The backend keys every resource with a plain integer. The newtypes keep
//! student boletas, director worker numbers, and account ids from being mixed
//! up inside the policy code, where all three flow through the same membership
//! scans.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a login account (`idUsuario`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

/// Natural key of a student record (`numeroBoleta`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoletaId(i64);

/// Natural key of a director record (`numeroTrabajador`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(i64);

/// Identifier of a department (`idDepartamento`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(i64);

/// Identifier of a protocol (`idProtocolo`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolId(i64);

/// Identifier of a protocol/director assignment row (`idRegistro`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId(i64);

macro_rules! impl_i64_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_i64_newtype!(UserId, "UserId");
impl_i64_newtype!(BoletaId, "BoletaId");
impl_i64_newtype!(WorkerId, "WorkerId");
impl_i64_newtype!(DepartmentId, "DepartmentId");
impl_i64_newtype!(ProtocolId, "ProtocolId");
impl_i64_newtype!(AssignmentId, "AssignmentId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_from_str() {
        let boleta: BoletaId = "2021630001".parse().unwrap();
        assert_eq!(boleta.as_i64(), 2021630001);
    }

    #[test]
    fn rejects_garbage() {
        let result = "abc".parse::<ProtocolId>();
        assert!(matches!(result, Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn serde_is_transparent() {
        let id = UserId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: UserId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }
}
