//! Protocols (research project records) and their director assignments.
//!
//! # Invariants
//! - A protocol has at most 4 student slots; any slot may be empty and empty
//!   slots are skipped by every scan.
//! - The same student cannot occupy two slots; `ProtocolRequest::validate`
//!   rejects the payload before it reaches the backend.
//! - A director is assigned to a protocol at most once.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::director::Director;
use crate::error::{DomainError, DomainResult};
use crate::id::{AssignmentId, ProtocolId, UserId, WorkerId};
use crate::refs::StudentRef;
use crate::student::Student;

/// Protocol lifecycle status; the wire strings are fixed by the backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En proceso")]
    InProgress,
    #[serde(rename = "Aprobado")]
    Approved,
    #[serde(rename = "Rechazado")]
    Rejected,
    #[serde(rename = "Finalizado")]
    Finished,
}

impl ProtocolStatus {
    pub const ALL: [ProtocolStatus; 5] = [
        ProtocolStatus::Pending,
        ProtocolStatus::InProgress,
        ProtocolStatus::Approved,
        ProtocolStatus::Rejected,
        ProtocolStatus::Finished,
    ];

    pub fn as_wire(&self) -> &'static str {
        match self {
            ProtocolStatus::Pending => "Pendiente",
            ProtocolStatus::InProgress => "En proceso",
            ProtocolStatus::Approved => "Aprobado",
            ProtocolStatus::Rejected => "Rechazado",
            ProtocolStatus::Finished => "Finalizado",
        }
    }

    pub fn from_wire(value: &str) -> Option<ProtocolStatus> {
        ProtocolStatus::ALL.iter().copied().find(|s| s.as_wire() == value)
    }
}

impl core::fmt::Display for ProtocolStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// One row of the protocol/director join, as returned by
/// `GET /protocolo-director/protocolo/{id}` and embedded in protocol reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorAssignment {
    #[serde(rename = "idRegistro")]
    pub id: AssignmentId,

    #[serde(rename = "director")]
    pub director: Director,
}

/// A research project record with up to 4 student participants and an
/// assigned set of directors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    #[serde(rename = "idProtocolo")]
    pub id: ProtocolId,

    #[serde(rename = "titulo")]
    pub title: String,

    #[serde(rename = "descripcion", default)]
    pub description: String,

    #[serde(rename = "objetivos", default)]
    pub objectives: String,

    #[serde(rename = "perfilRequerido", default)]
    pub required_profile: String,

    #[serde(rename = "estado")]
    pub status: ProtocolStatus,

    #[serde(rename = "fechaRegistro")]
    pub registered_at: NaiveDate,

    #[serde(rename = "alumno1", default, skip_serializing_if = "Option::is_none")]
    pub student1: Option<Student>,

    #[serde(rename = "alumno2", default, skip_serializing_if = "Option::is_none")]
    pub student2: Option<Student>,

    #[serde(rename = "alumno3", default, skip_serializing_if = "Option::is_none")]
    pub student3: Option<Student>,

    #[serde(rename = "alumno4", default, skip_serializing_if = "Option::is_none")]
    pub student4: Option<Student>,

    #[serde(rename = "directoresAsignados", default)]
    pub assignments: Vec<DirectorAssignment>,
}

impl Protocol {
    /// Occupied student slots, in slot order. Empty slots are skipped.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        [&self.student1, &self.student2, &self.student3, &self.student4]
            .into_iter()
            .filter_map(|slot| slot.as_ref())
    }

    /// Directors assigned through the join table.
    pub fn directors(&self) -> impl Iterator<Item = &Director> {
        self.assignments.iter().map(|a| &a.director)
    }

    /// Whether any student slot is linked to the given account.
    pub fn is_student_member(&self, user: UserId) -> bool {
        self.students().any(|s| s.account_id() == Some(user))
    }

    /// Whether any assigned director is linked to the given account.
    pub fn is_director_member(&self, user: UserId) -> bool {
        self.directors().any(|d| d.account_id() == Some(user))
    }

    /// Whether the director is already assigned; the UI must not offer them
    /// again in the assignment selector.
    pub fn has_director(&self, worker: WorkerId) -> bool {
        self.directors().any(|d| d.worker_id == worker)
    }

    /// Search over title and description.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}

/// Inner object of the create/update request DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolPayload {
    /// Present on update so the backend knows which record to replace.
    #[serde(rename = "idProtocolo")]
    pub id: Option<ProtocolId>,

    #[serde(rename = "titulo")]
    pub title: String,

    #[serde(rename = "descripcion")]
    pub description: String,

    #[serde(rename = "objetivos")]
    pub objectives: String,

    #[serde(rename = "perfilRequerido")]
    pub required_profile: String,

    #[serde(rename = "estado")]
    pub status: ProtocolStatus,

    #[serde(rename = "alumno1")]
    pub student1: Option<StudentRef>,

    #[serde(rename = "alumno2")]
    pub student2: Option<StudentRef>,

    #[serde(rename = "alumno3")]
    pub student3: Option<StudentRef>,

    #[serde(rename = "alumno4")]
    pub student4: Option<StudentRef>,
}

/// Full replacement payload for `POST /protocolos` and `PUT /protocolos/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolRequest {
    #[serde(rename = "protocolo")]
    pub protocol: ProtocolPayload,

    #[serde(rename = "directoresIds")]
    pub director_ids: Vec<WorkerId>,
}

impl ProtocolRequest {
    /// Client-side invariants checked before submitting.
    pub fn validate(&self) -> DomainResult<()> {
        if self.protocol.title.trim().is_empty() {
            return Err(DomainError::validation("el título es obligatorio"));
        }

        let slots: Vec<StudentRef> = [
            self.protocol.student1,
            self.protocol.student2,
            self.protocol.student3,
            self.protocol.student4,
        ]
        .into_iter()
        .flatten()
        .collect();

        for (i, slot) in slots.iter().enumerate() {
            if slots[..i].contains(slot) {
                return Err(DomainError::invariant(format!(
                    "el alumno {} aparece en más de un espacio",
                    slot.boleta
                )));
            }
        }

        for (i, id) in self.director_ids.iter().enumerate() {
            if self.director_ids[..i].contains(id) {
                return Err(DomainError::invariant(format!(
                    "el director {id} aparece más de una vez"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::BoletaId;

    fn protocol_json() -> &'static str {
        r#"{
            "idProtocolo": 7,
            "titulo": "Monitoreo de redes",
            "descripcion": "Sondas pasivas",
            "objetivos": "Medir latencia",
            "perfilRequerido": "Redes",
            "estado": "En proceso",
            "fechaRegistro": "2024-03-11",
            "alumno1": null,
            "alumno2": {
                "numeroBoleta": 2021630001,
                "nombre": "Laura",
                "usuario": {"idUsuario": 12, "email": "laura@ipn.mx", "rol": "ROLE_USER"}
            },
            "directoresAsignados": [
                {
                    "idRegistro": 55,
                    "director": {
                        "numeroTrabajador": 900,
                        "nombre": "Hugo",
                        "usuario": {"idUsuario": 30, "email": "hugo@ipn.mx", "rol": "ROLE_DIRECTOR"}
                    }
                }
            ]
        }"#
    }

    #[test]
    fn membership_skips_empty_slots() {
        let protocol: Protocol = serde_json::from_str(protocol_json()).unwrap();
        assert_eq!(protocol.students().count(), 1);
        assert!(protocol.is_student_member(UserId::new(12)));
        assert!(!protocol.is_student_member(UserId::new(99)));
        assert!(protocol.is_director_member(UserId::new(30)));
        assert!(protocol.has_director(WorkerId::new(900)));
        assert!(!protocol.has_director(WorkerId::new(901)));
    }

    #[test]
    fn status_wire_round_trip() {
        for status in ProtocolStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            let back: ProtocolStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
        assert_eq!(ProtocolStatus::from_wire("En proceso"), Some(ProtocolStatus::InProgress));
    }

    fn request_with_slots(slots: [Option<i64>; 4]) -> ProtocolRequest {
        let slot = |b: Option<i64>| b.map(|b| StudentRef { boleta: BoletaId::new(b) });
        ProtocolRequest {
            protocol: ProtocolPayload {
                id: None,
                title: "Prototipo".into(),
                description: String::new(),
                objectives: String::new(),
                required_profile: String::new(),
                status: ProtocolStatus::Pending,
                student1: slot(slots[0]),
                student2: slot(slots[1]),
                student3: slot(slots[2]),
                student4: slot(slots[3]),
            },
            director_ids: vec![WorkerId::new(900)],
        }
    }

    #[test]
    fn validate_rejects_duplicate_students() {
        let request = request_with_slots([Some(1), None, Some(1), None]);
        assert!(matches!(
            request.validate(),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn validate_accepts_distinct_slots_with_gaps() {
        let request = request_with_slots([Some(1), None, Some(2), None]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_directors() {
        let mut request = request_with_slots([Some(1), None, None, None]);
        request.director_ids = vec![WorkerId::new(900), WorkerId::new(900)];
        assert!(request.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_title() {
        let mut request = request_with_slots([None, None, None, None]);
        request.protocol.title = "   ".into();
        assert!(matches!(request.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn request_serializes_wire_names() {
        let request = request_with_slots([Some(2021630001), None, None, None]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["protocolo"]["titulo"], "Prototipo");
        assert_eq!(value["protocolo"]["alumno1"]["numeroBoleta"], 2021630001i64);
        assert!(value["protocolo"]["alumno2"].is_null());
        assert_eq!(value["directoresIds"][0], 900);
    }
}
