// Approval-chain endpoints for department, academic office, and hostel office
//
// Each stage sees only its own queue; the chain ordering itself is enforced
// server-side. Leave statistics come back in backend-owned shapes and stay
// untyped.

use campusgate_core::Pass;

use super::Envelope;
use crate::error::ApiError;
use crate::http::ApiClient;

pub async fn department_pending(client: &ApiClient) -> Result<Vec<Pass>, ApiError> {
    let envelope: Envelope<Vec<Pass>> = client.get("/api/department/pending").await?;
    Ok(envelope.data)
}

pub async fn department_approve(client: &ApiClient, pass_id: &str) -> Result<Pass, ApiError> {
    let envelope: Envelope<Pass> = client
        .patch(&format!("/api/department/approve/{}", pass_id))
        .await?;
    Ok(envelope.data)
}

pub async fn department_student_leaves(
    client: &ApiClient,
) -> Result<serde_json::Value, ApiError> {
    let envelope: Envelope<serde_json::Value> =
        client.get("/api/department/student-leaves").await?;
    Ok(envelope.data)
}

pub async fn academic_pending(client: &ApiClient) -> Result<Vec<Pass>, ApiError> {
    let envelope: Envelope<Vec<Pass>> = client.get("/api/academic/pending").await?;
    Ok(envelope.data)
}

pub async fn academic_approve(client: &ApiClient, pass_id: &str) -> Result<Pass, ApiError> {
    let envelope: Envelope<Pass> = client
        .patch(&format!("/api/academic/approve/{}", pass_id))
        .await?;
    Ok(envelope.data)
}

pub async fn academic_student_leaves(client: &ApiClient) -> Result<serde_json::Value, ApiError> {
    let envelope: Envelope<serde_json::Value> = client.get("/api/academic/student-leaves").await?;
    Ok(envelope.data)
}

/// Department-wise leave totals, keyed by department name.
pub async fn academic_department_leaves(
    client: &ApiClient,
) -> Result<serde_json::Value, ApiError> {
    let envelope: Envelope<serde_json::Value> =
        client.get("/api/academic/department-leaves").await?;
    Ok(envelope.data)
}

pub async fn hostel_pending(client: &ApiClient) -> Result<Vec<Pass>, ApiError> {
    let envelope: Envelope<Vec<Pass>> = client.get("/api/hosteloffice/pending").await?;
    Ok(envelope.data)
}

pub async fn hostel_approve(client: &ApiClient, pass_id: &str) -> Result<Pass, ApiError> {
    let envelope: Envelope<Pass> = client
        .patch(&format!("/api/hosteloffice/approve/{}", pass_id))
        .await?;
    Ok(envelope.data)
}
