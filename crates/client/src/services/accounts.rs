//! `/usuarios` — login accounts (admin-only screens).

use protocolos_core::{AccountPayload, UserAccount, UserId};

use crate::client::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    pub async fn list_accounts(&self) -> ApiResult<Vec<UserAccount>> {
        self.get_json("/usuarios").await
    }

    pub async fn account(&self, id: UserId) -> ApiResult<UserAccount> {
        self.get_json(&format!("/usuarios/{id}")).await
    }

    pub async fn create_account(&self, payload: &AccountPayload) -> ApiResult<()> {
        self.post("/usuarios", payload).await
    }

    pub async fn update_account(&self, id: UserId, payload: &AccountPayload) -> ApiResult<()> {
        self.put(&format!("/usuarios/{id}"), payload).await
    }

    pub async fn delete_account(&self, id: UserId) -> ApiResult<()> {
        self.delete(&format!("/usuarios/{id}")).await
    }
}
