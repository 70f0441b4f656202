// Gate scanning endpoint

use serde::Serialize;

use super::Envelope;
use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Serialize)]
struct ScanRequest<'a> {
    #[serde(rename = "qrCode")]
    qr_code: &'a str,
}

/// Validate a scanned QR code. The validation result (pass details, student
/// identity, whether entry is allowed) is backend-owned.
pub async fn scan_qr(client: &ApiClient, qr_code: &str) -> Result<serde_json::Value, ApiError> {
    let envelope: Envelope<serde_json::Value> = client
        .post("/api/gate/scan", &ScanRequest { qr_code })
        .await?;
    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_scan_posts_qr_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/gate/scan"))
            .and(body_json(json!({"qrCode": "QR-123"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"valid": true, "student": {"name": "Alice"}}
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), Arc::new(MemorySessionStore::new()));
        let result = scan_qr(&client, "QR-123").await.unwrap();
        assert_eq!(result["valid"], true);
    }
}
