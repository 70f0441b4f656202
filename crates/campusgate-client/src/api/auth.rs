// Authentication endpoints

use campusgate_core::UserProfile;
use serde::{Deserialize, Serialize};

use super::Envelope;
use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub role: String,
    /// Roll number, department id, or office id depending on role.
    pub identifier: String,
    pub password: String,
}

/// Successful login payload: the session triple, adopted as-is.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub role: String,
    pub user: UserProfile,
}

pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<LoginData, ApiError> {
    let envelope: Envelope<LoginData> = client.post("/api/auth/login", request).await?;
    Ok(envelope.data)
}

/// Fetch the signed-in account's profile. Works for every role.
pub async fn get_profile(client: &ApiClient) -> Result<UserProfile, ApiError> {
    let envelope: Envelope<UserProfile> = client.get("/api/auth/me").await?;
    Ok(envelope.data)
}

/// Registration payloads differ per role and are owned by the backend;
/// callers pass the form fields straight through.
pub async fn register_student(
    client: &ApiClient,
    payload: &serde_json::Value,
) -> Result<serde_json::Value, ApiError> {
    client.post("/api/users/register", payload).await
}

pub async fn register_department(
    client: &ApiClient,
    payload: &serde_json::Value,
) -> Result<serde_json::Value, ApiError> {
    client.post("/api/department/register", payload).await
}

pub async fn register_academic(
    client: &ApiClient,
    payload: &serde_json::Value,
) -> Result<serde_json::Value, ApiError> {
    client.post("/api/academic/register", payload).await
}

pub async fn register_hostel_office(
    client: &ApiClient,
    payload: &serde_json::Value,
) -> Result<serde_json::Value, ApiError> {
    client.post("/api/hosteloffice/register", payload).await
}

pub async fn register_gate(
    client: &ApiClient,
    payload: &serde_json::Value,
) -> Result<serde_json::Value, ApiError> {
    client.post("/api/gate/register", payload).await
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

pub async fn verify_otp(
    client: &ApiClient,
    request: &VerifyOtpRequest,
) -> Result<serde_json::Value, ApiError> {
    client.post("/api/auth/verify-otp", request).await
}

#[derive(Debug, Serialize)]
pub struct EmailRequest {
    pub email: String,
}

pub async fn resend_otp(
    client: &ApiClient,
    request: &EmailRequest,
) -> Result<serde_json::Value, ApiError> {
    client.post("/api/auth/resend-otp", request).await
}

pub async fn forgot_password(
    client: &ApiClient,
    request: &EmailRequest,
) -> Result<serde_json::Value, ApiError> {
    client.post("/api/auth/forgot-password", request).await
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

pub async fn reset_password(
    client: &ApiClient,
    request: &ResetPasswordRequest,
) -> Result<serde_json::Value, ApiError> {
    client.post("/api/auth/reset-password", request).await
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
    async fn test_login_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({
                "role": "user",
                "identifier": "21CS001",
                "password": "hunter2",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "token": "tok1",
                    "role": "user",
                    "user": {"name": "Alice", "rollNo": "21CS001"},
                }
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), Arc::new(MemorySessionStore::new()));
        let data = login(
            &client,
            &LoginRequest {
                role: "user".into(),
                identifier: "21CS001".into(),
                password: "hunter2".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(data.token, "tok1");
        assert_eq!(data.role, "user");
        assert_eq!(data.user.roll_no.as_deref(), Some("21CS001"));
    }

    #[tokio::test]
    async fn test_get_profile_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"name": "Alice", "department": "CSE"}
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), Arc::new(MemorySessionStore::new()));
        let profile = get_profile(&client).await.unwrap();
        assert_eq!(profile.name.as_deref(), Some("Alice"));
        assert_eq!(profile.department.as_deref(), Some("CSE"));
    }
}
