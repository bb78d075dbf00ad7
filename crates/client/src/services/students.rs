//! `/alumnos` — student records.

use protocolos_core::{BoletaId, Student, StudentPayload, UserId};

use crate::client::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    pub async fn list_students(&self) -> ApiResult<Vec<Student>> {
        self.get_json("/alumnos").await
    }

    pub async fn student(&self, boleta: BoletaId) -> ApiResult<Student> {
        self.get_json(&format!("/alumnos/{boleta}")).await
    }

    /// Profile lookup by linked account, used for greetings and the
    /// dashboard profile card.
    pub async fn student_by_account(&self, user: UserId) -> ApiResult<Student> {
        self.get_json(&format!("/alumnos/usuario/{user}")).await
    }

    pub async fn create_student(&self, payload: &StudentPayload) -> ApiResult<()> {
        self.post("/alumnos", payload).await
    }

    pub async fn update_student(
        &self,
        boleta: BoletaId,
        payload: &StudentPayload,
    ) -> ApiResult<()> {
        self.put(&format!("/alumnos/{boleta}"), payload).await
    }

    pub async fn delete_student(&self, boleta: BoletaId) -> ApiResult<()> {
        self.delete(&format!("/alumnos/{boleta}")).await
    }
}
