//! `/directores` — director records.

use protocolos_core::{Director, DirectorPayload, UserId, WorkerId};

use crate::client::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    pub async fn list_directors(&self) -> ApiResult<Vec<Director>> {
        self.get_json("/directores").await
    }

    pub async fn director(&self, worker: WorkerId) -> ApiResult<Director> {
        self.get_json(&format!("/directores/{worker}")).await
    }

    /// Profile lookup by linked account; also feeds the department screen's
    /// own-department narrowing.
    pub async fn director_by_account(&self, user: UserId) -> ApiResult<Director> {
        self.get_json(&format!("/directores/usuario/{user}")).await
    }

    pub async fn create_director(&self, payload: &DirectorPayload) -> ApiResult<()> {
        self.post("/directores", payload).await
    }

    pub async fn update_director(
        &self,
        worker: WorkerId,
        payload: &DirectorPayload,
    ) -> ApiResult<()> {
        self.put(&format!("/directores/{worker}"), payload).await
    }

    pub async fn delete_director(&self, worker: WorkerId) -> ApiResult<()> {
        self.delete(&format!("/directores/{worker}")).await
    }
}
