//! Backend wire types
//!
//! Every backend response is an envelope with a `success` flag and an
//! optional `errorMsg`, plus an endpoint-specific payload.

use crate::domain::call_history::CallHistoryEntry;
use crate::domain::contact::Contact;
use crate::domain::shared::lenient;
use serde::Deserialize;

/// `POST /api/login`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub f_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub l_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phone: Option<String>,
    #[serde(default, rename = "errorMsg")]
    pub error_msg: Option<String>,
}

/// `POST /api/contact-list`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactListResponse {
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub success: bool,
    #[serde(default)]
    pub contact_data: Vec<Contact>,
    #[serde(default, rename = "errorMsg")]
    pub error_msg: Option<String>,
}

/// `POST /api/get/recents-calls`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentCallsResponse {
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub success: bool,
    #[serde(default, alias = "recent_calls", alias = "data")]
    pub call_data: Vec<CallHistoryEntry>,
    #[serde(default, rename = "errorMsg")]
    pub error_msg: Option<String>,
}

/// Mutation endpoints that only report success
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub success: bool,
    #[serde(default, rename = "errorMsg")]
    pub error_msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn failure_message(&self) -> Option<&str> {
        self.error_msg.as_deref().or(self.message.as_deref())
    }
}
