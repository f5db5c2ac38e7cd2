//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Generic API response
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Error payload of the pass-through
///
/// Shape is fixed: `{"error": ...}` for rejections and
/// `{"error": ..., "details": ...}` for local failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ProxyErrorBody {
    pub fn method_not_allowed() -> Self {
        Self {
            error: "Method not allowed".to_string(),
            details: None,
        }
    }

    pub fn proxy_failure(details: impl Into<String>) -> Self {
        let details = details.into();
        Self {
            error: "Error proxying request".to_string(),
            details: Some(if details.is_empty() {
                "unknown error".to_string()
            } else {
                details
            }),
        }
    }
}
