//! `/departamentos` — departments.

use protocolos_core::{Department, DepartmentId, DepartmentPayload};

use crate::client::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    pub async fn list_departments(&self) -> ApiResult<Vec<Department>> {
        self.get_json("/departamentos").await
    }

    pub async fn department(&self, id: DepartmentId) -> ApiResult<Department> {
        self.get_json(&format!("/departamentos/{id}")).await
    }

    pub async fn create_department(&self, payload: &DepartmentPayload) -> ApiResult<()> {
        self.post("/departamentos", payload).await
    }

    pub async fn update_department(
        &self,
        id: DepartmentId,
        payload: &DepartmentPayload,
    ) -> ApiResult<()> {
        self.put(&format!("/departamentos/{id}"), payload).await
    }

    pub async fn delete_department(&self, id: DepartmentId) -> ApiResult<()> {
        self.delete(&format!("/departamentos/{id}")).await
    }
}
