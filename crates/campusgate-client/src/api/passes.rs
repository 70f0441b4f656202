// Student pass endpoints

use campusgate_core::{Pass, PassType};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Envelope;
use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Serialize)]
pub struct CreatePassRequest {
    #[serde(rename = "passType")]
    pub pass_type: PassType,
    pub reason: String,
    #[serde(rename = "fromDate", skip_serializing_if = "Option::is_none")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(rename = "toDate", skip_serializing_if = "Option::is_none")]
    pub to_date: Option<DateTime<Utc>>,
}

/// Request a new gate pass for the signed-in student.
pub async fn create_pass(client: &ApiClient, request: &CreatePassRequest) -> Result<Pass, ApiError> {
    let envelope: Envelope<Pass> = client.post("/api/passes", request).await?;
    Ok(envelope.data)
}

/// All passes belonging to the signed-in student.
pub async fn my_passes(client: &ApiClient) -> Result<Vec<Pass>, ApiError> {
    let envelope: Envelope<Vec<Pass>> = client.get("/api/passes/my").await?;
    Ok(envelope.data)
}
