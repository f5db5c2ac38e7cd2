//! HTTP client for the backend REST API

use super::dto::{ContactListResponse, LoginResponse, RecentCallsResponse, StatusResponse};
use super::error::ClientError;
use crate::domain::contact::{ContactUpdate, NewContact};
use crate::domain::session::SignUpForm;
use crate::domain::shared::UserId;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, warn};

/// Backend REST API
///
/// Authenticated calls take the bearer token explicitly; an empty token
/// falls back to the default one installed at login.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError>;

    async fn create_user(&self, form: &SignUpForm) -> Result<StatusResponse, ClientError>;

    async fn contact_list(
        &self,
        user_id: UserId,
        token: &str,
    ) -> Result<ContactListResponse, ClientError>;

    async fn create_contact(
        &self,
        user_id: UserId,
        contact: &NewContact,
        token: &str,
    ) -> Result<StatusResponse, ClientError>;

    async fn update_contact(
        &self,
        user_id: UserId,
        contact: &ContactUpdate,
        token: &str,
    ) -> Result<StatusResponse, ClientError>;

    async fn delete_contact(
        &self,
        user_id: UserId,
        contact_id: i64,
        token: &str,
    ) -> Result<StatusResponse, ClientError>;

    async fn recent_calls(
        &self,
        user_id: UserId,
        token: &str,
    ) -> Result<RecentCallsResponse, ClientError>;

    /// Install or remove the Authorization used when a call passes no token
    fn set_default_token(&self, token: Option<String>);
}

/// reqwest-backed backend client
pub struct HttpBackendClient {
    client: reqwest::Client,
    base_url: String,
    default_token: RwLock<Option<String>>,
}

impl HttpBackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_token: RwLock::new(None),
        })
    }

    pub fn default_token(&self) -> Option<String> {
        self.default_token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self, token: &str) -> Option<String> {
        if token.is_empty() {
            self.default_token()
        } else {
            Some(token.to_string())
        }
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        token: &str,
    ) -> Result<T, ClientError> {
        debug!("Backend POST {}", path);
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(bearer) = self.bearer(token) {
            request = request.bearer_auth(bearer);
        }
        let response = request.send().await?;
        read_envelope(path, response, true).await
    }
}

/// Decode a backend envelope
///
/// A 401 only means an expired session on bearer-authenticated calls; login
/// and sign-up report it like any other failure, with the server's message.
async fn read_envelope<T: DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
    bearer_authenticated: bool,
) -> Result<T, ClientError> {
    let status = response.status();
    if bearer_authenticated && status == StatusCode::UNAUTHORIZED {
        warn!("Backend rejected token on {}", path);
        return Err(ClientError::Unauthorized);
    }

    let bytes = response.bytes().await?;
    if !status.is_success() {
        let message = serde_json::from_slice::<Value>(&bytes)
            .ok()
            .and_then(|body| {
                body.get("message")
                    .or_else(|| body.get("errorMsg"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
        warn!("Backend {} failed with {}: {}", path, status, message);
        return Err(ClientError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl BackendApi for HttpBackendClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        debug!("Backend POST /api/login for {}", email);
        let response = self
            .client
            .post(self.url("/api/login"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await?;
        read_envelope("/api/login", response, false).await
    }

    async fn create_user(&self, form: &SignUpForm) -> Result<StatusResponse, ClientError> {
        let body = serde_json::to_value(form).map_err(|e| ClientError::Decode(e.to_string()))?;
        let response = self
            .client
            .post(self.url("/api/create-user"))
            .json(&body)
            .send()
            .await?;
        read_envelope("/api/create-user", response, false).await
    }

    async fn contact_list(
        &self,
        user_id: UserId,
        token: &str,
    ) -> Result<ContactListResponse, ClientError> {
        self.post_json("/api/contact-list", &json!({ "user_id": user_id }), token)
            .await
    }

    async fn create_contact(
        &self,
        user_id: UserId,
        contact: &NewContact,
        token: &str,
    ) -> Result<StatusResponse, ClientError> {
        let body = json!({
            "user_id": user_id,
            "name": contact.name,
            "phone": contact.phone,
        });
        self.post_json("/api/create-contact", &body, token).await
    }

    async fn update_contact(
        &self,
        user_id: UserId,
        contact: &ContactUpdate,
        token: &str,
    ) -> Result<StatusResponse, ClientError> {
        let body = json!({
            "user_id": user_id,
            "id": contact.id,
            "name": contact.name,
            "phone": contact.phone,
        });
        self.post_json("/api/update-contact", &body, token).await
    }

    async fn delete_contact(
        &self,
        user_id: UserId,
        contact_id: i64,
        token: &str,
    ) -> Result<StatusResponse, ClientError> {
        let body = json!({ "user_id": user_id, "id": contact_id });
        self.post_json("/api/delete-contact", &body, token).await
    }

    async fn recent_calls(
        &self,
        user_id: UserId,
        token: &str,
    ) -> Result<RecentCallsResponse, ClientError> {
        self.post_json("/api/get/recents-calls", &json!({ "user_id": user_id }), token)
            .await
    }

    fn set_default_token(&self, token: Option<String>) {
        *self
            .default_token
            .write()
            .unwrap_or_else(|e| e.into_inner()) = token;
    }
}
