//! Students.

use serde::{Deserialize, Serialize};

use crate::account::UserAccount;
use crate::id::{BoletaId, UserId};
use crate::refs::AccountRef;

/// A student record, keyed by boleta number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "numeroBoleta")]
    pub boleta: BoletaId,

    #[serde(rename = "nombre")]
    pub first_name: String,

    #[serde(rename = "apellidoPaterno", default)]
    pub paternal_surname: String,

    #[serde(rename = "apellidoMaterno", default)]
    pub maternal_surname: String,

    #[serde(rename = "carrera", default)]
    pub program: String,

    #[serde(rename = "semestre", default)]
    pub semester: String,

    #[serde(rename = "numeroTelefonico", default)]
    pub phone: String,

    /// Linked login account; the join key for identity-based visibility.
    #[serde(rename = "usuario", default, skip_serializing_if = "Option::is_none")]
    pub account: Option<UserAccount>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.first_name, self.paternal_surname, self.maternal_surname
        )
        .trim()
        .to_string()
    }

    pub fn account_id(&self) -> Option<UserId> {
        self.account.as_ref().map(|a| a.id)
    }

    /// Search over first name, paternal surname, and boleta number.
    pub fn matches_search(&self, term: &str) -> bool {
        let lowered = term.to_lowercase();
        self.first_name.to_lowercase().contains(&lowered)
            || self.paternal_surname.to_lowercase().contains(&lowered)
            || self.boleta.to_string().contains(term.trim())
    }
}

/// Write payload for `POST /alumnos` and `PUT /alumnos/{boleta}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentPayload {
    #[serde(rename = "numeroBoleta")]
    pub boleta: BoletaId,

    #[serde(rename = "nombre")]
    pub first_name: String,

    #[serde(rename = "apellidoPaterno")]
    pub paternal_surname: String,

    #[serde(rename = "apellidoMaterno")]
    pub maternal_surname: String,

    #[serde(rename = "carrera")]
    pub program: String,

    #[serde(rename = "semestre")]
    pub semester: String,

    #[serde(rename = "numeroTelefonico")]
    pub phone: String,

    #[serde(rename = "usuario")]
    pub account: AccountRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        serde_json::from_str(
            r#"{
                "numeroBoleta": 2021630001,
                "nombre": "Laura",
                "apellidoPaterno": "Mendez",
                "apellidoMaterno": "Rios",
                "carrera": "ISC",
                "semestre": "7",
                "numeroTelefonico": "5511223344",
                "usuario": {"idUsuario": 12, "email": "laura@ipn.mx", "rol": "ROLE_USER"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn exposes_account_join_key() {
        assert_eq!(student().account_id(), Some(UserId::new(12)));
    }

    #[test]
    fn search_matches_name_and_boleta() {
        let s = student();
        assert!(s.matches_search("lau"));
        assert!(s.matches_search("MENDEZ"));
        assert!(s.matches_search("2021630001"));
        assert!(!s.matches_search("rios-x"));
    }

    #[test]
    fn payload_serializes_wire_names() {
        let payload = StudentPayload {
            boleta: BoletaId::new(2021630001),
            first_name: "Laura".into(),
            paternal_surname: "Mendez".into(),
            maternal_surname: "Rios".into(),
            program: "ISC".into(),
            semester: "7".into(),
            phone: "5511223344".into(),
            account: AccountRef { id: UserId::new(12) },
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["numeroBoleta"], 2021630001);
        assert_eq!(value["usuario"]["idUsuario"], 12);
    }
}
