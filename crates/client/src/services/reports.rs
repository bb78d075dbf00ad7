//! `/reportes` — PDF generation and email dispatch.
//!
//! Both calls are side-effecting with no local state change: the PDF bytes
//! are handed to the browser as a download, the email result is a transient
//! notification. No retry, no persisted record of the attempt.

use protocolos_core::ProtocolId;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiResult;

/// Payload for `POST /reportes/enviar-protocolo`.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEmail {
    #[serde(rename = "protocoloId")]
    pub protocol_id: ProtocolId,

    #[serde(rename = "destinatario")]
    pub recipient: String,

    #[serde(rename = "asunto")]
    pub subject: String,

    #[serde(rename = "nombreAlumno")]
    pub student_name: String,

    #[serde(rename = "nombreProponente")]
    pub proposer_name: String,

    #[serde(rename = "contacto")]
    pub contact: String,
}

impl ApiClient {
    /// Download the rendered PDF for a protocol as raw bytes.
    pub async fn download_protocol_pdf(&self, id: ProtocolId) -> ApiResult<Vec<u8>> {
        self.get_bytes(&format!("/reportes/descargar-protocolo/{id}"))
            .await
    }

    pub async fn send_protocol_report(&self, email: &ReportEmail) -> ApiResult<()> {
        self.post("/reportes/enviar-protocolo", email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_payload_serializes_wire_names() {
        let email = ReportEmail {
            protocol_id: ProtocolId::new(7),
            recipient: "jefa@ipn.mx".into(),
            subject: "Seguimiento: Monitoreo de redes".into(),
            student_name: "Sistema".into(),
            proposer_name: "IPN - ESCOM".into(),
            contact: "admin@ipn.mx".into(),
        };
        let value = serde_json::to_value(&email).unwrap();
        assert_eq!(value["protocoloId"], 7);
        assert_eq!(value["destinatario"], "jefa@ipn.mx");
        assert_eq!(value["asunto"], "Seguimiento: Monitoreo de redes");
        assert_eq!(value["nombreProponente"], "IPN - ESCOM");
    }
}
