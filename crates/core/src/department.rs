//! Departments.

use serde::{Deserialize, Serialize};

use crate::id::DepartmentId;

/// Organizational unit a director may belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "idDepartamento")]
    pub id: DepartmentId,

    #[serde(rename = "nombreDepartamento")]
    pub name: String,

    #[serde(rename = "codigo", default)]
    pub code: String,

    // The backend field really is misspelled; it must be preserved.
    #[serde(rename = "nombreComletoJefe", default)]
    pub head_name: String,
}

impl Department {
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.code.to_lowercase().contains(&term)
            || self.head_name.to_lowercase().contains(&term)
    }
}

/// Write payload for `POST/PUT /departamentos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentPayload {
    #[serde(rename = "nombreDepartamento")]
    pub name: String,

    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "nombreComletoJefe")]
    pub head_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_misspelled_head_field() {
        let dept: Department = serde_json::from_str(
            r#"{"idDepartamento": 3, "nombreDepartamento": "Posgrado", "codigo": "POS", "nombreComletoJefe": "Dra. Ruiz"}"#,
        )
        .unwrap();
        assert_eq!(dept.head_name, "Dra. Ruiz");
        assert!(dept.matches_search("pos"));
        assert!(dept.matches_search("ruiz"));
        assert!(!dept.matches_search("redes"));
    }
}
