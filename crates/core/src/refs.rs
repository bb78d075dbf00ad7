//! Nested id-only references used in write payloads.
//!
//! The backend expects related records as `{ "<idField>": n }` objects rather
//! than bare numbers.

use serde::{Deserialize, Serialize};

use crate::id::{BoletaId, DepartmentId, ProtocolId, UserId, WorkerId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    #[serde(rename = "idUsuario")]
    pub id: UserId,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRef {
    #[serde(rename = "idDepartamento")]
    pub id: DepartmentId,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorRef {
    #[serde(rename = "numeroTrabajador")]
    pub worker_id: WorkerId,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolRef {
    #[serde(rename = "idProtocolo")]
    pub id: ProtocolId,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRef {
    #[serde(rename = "numeroBoleta")]
    pub boleta: BoletaId,
}

impl From<UserId> for AccountRef {
    fn from(id: UserId) -> Self {
        Self { id }
    }
}

impl From<DepartmentId> for DepartmentRef {
    fn from(id: DepartmentId) -> Self {
        Self { id }
    }
}

impl From<WorkerId> for DirectorRef {
    fn from(worker_id: WorkerId) -> Self {
        Self { worker_id }
    }
}

impl From<ProtocolId> for ProtocolRef {
    fn from(id: ProtocolId) -> Self {
        Self { id }
    }
}

impl From<BoletaId> for StudentRef {
    fn from(boleta: BoletaId) -> Self {
        Self { boleta }
    }
}
