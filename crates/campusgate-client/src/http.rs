// HTTP client wrapper for the CampusGate API
//
// Single chokepoint for all backend calls: attaches the bearer header when a
// token is stored, unwraps successful bodies, and normalizes every failure
// into an ApiError. A 401 from ANY endpoint clears the session store and
// fires the injected auth-expired hook before the error reaches the caller.

use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::{extract_message, ApiError};
use crate::store::SessionStore;

/// Callback fired after a 401 has torn the stored session down. The owner
/// decides what "redirect to login" means in its context.
pub type AuthExpiredHook = Arc<dyn Fn() + Send + Sync>;

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    store: Arc<dyn SessionStore>,
    on_auth_expired: Option<AuthExpiredHook>,
}

impl ApiClient {
    pub fn new(base_url: &str, store: Arc<dyn SessionStore>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            store,
            on_auth_expired: None,
        }
    }

    /// Install the hook invoked when any call comes back 401.
    pub fn with_auth_expired_hook(mut self, hook: AuthExpiredHook) -> Self {
        self.on_auth_expired = Some(hook);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.get(self.url(path));
        self.send(request).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.http.post(self.url(path)).json(body);
        self.send(request).await
    }

    /// PATCH without a body; approval endpoints take the pass id in the path.
    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.patch(self.url(path));
        self.send(request).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.delete(self.url(path));
        self.send(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, mut request: RequestBuilder) -> Result<T, ApiError> {
        // Attach the credential the store currently holds, if any
        if let Some(token) = self.store.token() {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "network error - backend may be unavailable");
                return Err(ApiError::Network {
                    detail: e.to_string(),
                });
            }
        };

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // Token expired or invalid: tear the session down no matter
            // which call noticed it, then let the owner react.
            debug!("received 401, clearing stored session");
            self.store.clear();
            if let Some(hook) = &self.on_auth_expired {
                hook();
            }
            let body = read_body(response).await;
            return Err(ApiError::AuthExpired {
                message: extract_message(body.as_ref()),
            });
        }

        if !status.is_success() {
            let body = read_body(response).await;
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: extract_message(body.as_ref()),
                data: body,
            });
        }

        response.json().await.map_err(|e| ApiError::Api {
            status: status.as_u16(),
            message: e.to_string(),
            data: None,
        })
    }
}

/// Read a failed response's body. A JSON body is kept as-is; a non-JSON
/// body becomes a string value; an empty or unreadable body is absent.
async fn read_body(response: reqwest::Response) -> Option<serde_json::Value> {
    let text = response.text().await.unwrap_or_default();
    if text.is_empty() {
        return None;
    }
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(_) => Some(serde_json::Value::String(text)),
    }
}
