//! Directors.

use serde::{Deserialize, Serialize};

use crate::account::UserAccount;
use crate::department::Department;
use crate::id::{DepartmentId, UserId, WorkerId};
use crate::refs::{AccountRef, DepartmentRef};

/// Supervising staff member, keyed by worker number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "numeroTrabajador")]
    pub worker_id: WorkerId,

    #[serde(rename = "nombre")]
    pub first_name: String,

    #[serde(rename = "apellidoPaterno", default)]
    pub paternal_surname: String,

    #[serde(rename = "apellidoMaterno", default)]
    pub maternal_surname: String,

    #[serde(rename = "escuelaPerteneciente", default)]
    pub school: String,

    #[serde(rename = "cargo", default)]
    pub title: String,

    #[serde(rename = "numeroTelefonico", default)]
    pub phone: String,

    #[serde(rename = "departamento", default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,

    /// Linked login account; the join key for identity-based visibility.
    #[serde(rename = "usuario", default, skip_serializing_if = "Option::is_none")]
    pub account: Option<UserAccount>,
}

impl Director {
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

    pub fn department_id(&self) -> Option<DepartmentId> {
        self.department.as_ref().map(|d| d.id)
    }

    /// Search over name, paternal surname, and department name.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.first_name.to_lowercase().contains(&term)
            || self.paternal_surname.to_lowercase().contains(&term)
            || self
                .department
                .as_ref()
                .is_some_and(|d| d.name.to_lowercase().contains(&term))
    }
}

/// Write payload for `POST /directores` and `PUT /directores/{worker}`.
///
/// Both the department and the account link are required by the editing UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorPayload {
    #[serde(rename = "nombre")]
    pub first_name: String,

    #[serde(rename = "apellidoPaterno")]
    pub paternal_surname: String,

    #[serde(rename = "apellidoMaterno")]
    pub maternal_surname: String,

    #[serde(rename = "escuelaPerteneciente")]
    pub school: String,

    #[serde(rename = "cargo")]
    pub title: String,

    #[serde(rename = "numeroTelefonico")]
    pub phone: String,

    #[serde(rename = "departamento")]
    pub department: DepartmentRef,

    #[serde(rename = "usuario")]
    pub account: AccountRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_reference_is_optional() {
        let director: Director = serde_json::from_str(
            r#"{"numeroTrabajador": 900, "nombre": "Hugo", "apellidoPaterno": "Lara"}"#,
        )
        .unwrap();
        assert_eq!(director.department_id(), None);
        assert_eq!(director.account_id(), None);
    }

    #[test]
    fn search_includes_department_name() {
        let director: Director = serde_json::from_str(
            r#"{
                "numeroTrabajador": 900,
                "nombre": "Hugo",
                "apellidoPaterno": "Lara",
                "departamento": {"idDepartamento": 1, "nombreDepartamento": "Redes y Sistemas"}
            }"#,
        )
        .unwrap();
        assert!(director.matches_search("redes"));
        assert!(director.matches_search("hugo"));
        assert!(!director.matches_search("posgrado"));
    }
}
