//! Result of one call-initiation attempt as seen by the dialer

use super::vendor_response::VendorResponse;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum CallInitiationOutcome {
    /// The vendor acknowledged the request (2xx); body is relayed verbatim
    Accepted { body: Value },
    /// The vendor answered with a non-success status and a JSON body
    Rejected { status: u16, body: Value },
    /// Gateway timeout; the call may still be placed by the vendor
    TimedOut,
    /// Transport failure or an unreadable response
    Failed(String),
}

impl CallInitiationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CallInitiationOutcome::Accepted { .. })
    }

    /// Typed vendor acknowledgment, when the relayed body has that shape
    pub fn vendor_response(&self) -> Option<VendorResponse> {
        match self {
            CallInitiationOutcome::Accepted { body }
            | CallInitiationOutcome::Rejected { body, .. } => VendorResponse::from_value(body),
            _ => None,
        }
    }

    /// Message suitable for an error banner; `None` for accepted or timed-out calls
    pub fn error_message(&self) -> Option<String> {
        match self {
            CallInitiationOutcome::Accepted { .. } | CallInitiationOutcome::TimedOut => None,
            CallInitiationOutcome::Rejected { status, body } => Some(
                body.get("error")
                    .or_else(|| body.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Request failed with status code {}", status)),
            ),
            CallInitiationOutcome::Failed(message) => Some(message.clone()),
        }
    }
}
