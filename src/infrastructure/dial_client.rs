//! Client side of the click-to-call pass-through

use crate::domain::call::{CallInitiationOutcome, CallRequest};
use crate::infrastructure::backend::ClientError;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

/// Path the pass-through is mounted on
pub const INITIATE_CALL_PATH: &str = "/api/initiate-call";

/// Sends call requests to the pass-through
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallInitiator: Send + Sync {
    async fn initiate(&self, request: &CallRequest, token: Option<String>)
        -> CallInitiationOutcome;
}

pub struct HttpCallInitiator {
    client: reqwest::Client,
    url: String,
}

impl HttpCallInitiator {
    pub fn new(proxy_base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;
        Ok(Self {
            client,
            url: format!(
                "{}{}",
                proxy_base_url.trim_end_matches('/'),
                INITIATE_CALL_PATH
            ),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CallInitiator for HttpCallInitiator {
    async fn initiate(
        &self,
        request: &CallRequest,
        token: Option<String>,
    ) -> CallInitiationOutcome {
        info!(
            "Initiating call {} -> {} (ref {})",
            request.apartyno, request.bpartyno, request.reference_id
        );

        let mut builder = self.client.post(&self.url).json(request);
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            builder = builder.bearer_auth(token);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!("Call initiation timed out: {}", e);
                return CallInitiationOutcome::TimedOut;
            }
            Err(e) => {
                warn!("Call initiation failed: {}", e);
                return CallInitiationOutcome::Failed(e.to_string());
            }
        };

        let status = response.status();
        if status == StatusCode::GATEWAY_TIMEOUT {
            warn!("Pass-through reported gateway timeout");
            return CallInitiationOutcome::TimedOut;
        }

        let body = match response.json::<Value>().await {
            Ok(body) => body,
            Err(e) => return CallInitiationOutcome::Failed(e.to_string()),
        };

        if status.is_success() {
            CallInitiationOutcome::Accepted { body }
        } else {
            warn!("Call initiation rejected with status {}", status);
            CallInitiationOutcome::Rejected {
                status: status.as_u16(),
                body,
            }
        }
    }
}
