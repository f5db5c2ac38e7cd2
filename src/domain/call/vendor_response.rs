//! Typed view of the vendor's synchronous click-to-call acknowledgment

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorResponse {
    pub status: i64,
    pub message: VendorMessage,
    pub requestid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorMessage {
    #[serde(rename = "RespId")]
    pub resp_id: i64,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "ReqId")]
    pub req_id: i64,
    pub callid: i64,
}

impl VendorResponse {
    /// Try to read a relayed JSON body as a vendor acknowledgment
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}
