//! `/protocolos` — protocol records.

use protocolos_core::{Protocol, ProtocolId, ProtocolRequest};

use crate::client::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    pub async fn list_protocols(&self) -> ApiResult<Vec<Protocol>> {
        self.get_json("/protocolos").await
    }

    pub async fn protocol(&self, id: ProtocolId) -> ApiResult<Protocol> {
        self.get_json(&format!("/protocolos/{id}")).await
    }

    pub async fn create_protocol(&self, request: &ProtocolRequest) -> ApiResult<()> {
        self.post("/protocolos", request).await
    }

    pub async fn update_protocol(
        &self,
        id: ProtocolId,
        request: &ProtocolRequest,
    ) -> ApiResult<()> {
        self.put(&format!("/protocolos/{id}"), request).await
    }

    pub async fn delete_protocol(&self, id: ProtocolId) -> ApiResult<()> {
        self.delete(&format!("/protocolos/{id}")).await
    }
}
