//! `/protocolo-director` — the protocol/director join.

use protocolos_core::{
    AssignmentId, DirectorAssignment, DirectorRef, ProtocolId, ProtocolRef, WorkerId,
};
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiResult;

/// Create payload: both sides as nested id-only references.
#[derive(Debug, Serialize)]
struct AssignmentPayload {
    #[serde(rename = "protocolo")]
    protocol: ProtocolRef,

    #[serde(rename = "director")]
    director: DirectorRef,
}

impl ApiClient {
    pub async fn assignments_for_protocol(
        &self,
        protocol: ProtocolId,
    ) -> ApiResult<Vec<DirectorAssignment>> {
        self.get_json(&format!("/protocolo-director/protocolo/{protocol}"))
            .await
    }

    pub async fn assign_director(
        &self,
        protocol: ProtocolId,
        worker: WorkerId,
    ) -> ApiResult<()> {
        let payload = AssignmentPayload {
            protocol: protocol.into(),
            director: worker.into(),
        };
        self.post("/protocolo-director", &payload).await
    }

    pub async fn unassign_director(&self, assignment: AssignmentId) -> ApiResult<()> {
        self.delete(&format!("/protocolo-director/{assignment}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_nests_both_references() {
        let payload = AssignmentPayload {
            protocol: ProtocolId::new(7).into(),
            director: WorkerId::new(900).into(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["protocolo"]["idProtocolo"], 7);
        assert_eq!(value["director"]["numeroTrabajador"], 900);
    }
}
