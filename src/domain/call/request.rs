//! Click-to-call request record

use super::value_object::{Flag, DEFAULT_CLI, DEFAULT_REFERENCE_ID};
use serde::{Deserialize, Serialize};

/// Call-initiation request as accepted by the vendor API
///
/// Field names are the vendor's wire names. A request is built fresh for
/// every dial attempt and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    /// Caller line identity
    pub cli: String,
    /// Number the vendor rings first (the user's own phone)
    pub apartyno: String,
    /// Destination number
    pub bpartyno: String,
    pub reference_id: String,
    pub dtmfflag: Flag,
    pub recordingflag: Flag,
}

impl CallRequest {
    /// Create a request between two parties with default metadata
    pub fn new(apartyno: impl Into<String>, bpartyno: impl Into<String>) -> Self {
        Self {
            cli: DEFAULT_CLI.to_string(),
            apartyno: apartyno.into(),
            bpartyno: bpartyno.into(),
            reference_id: DEFAULT_REFERENCE_ID.to_string(),
            dtmfflag: Flag::Off,
            recordingflag: Flag::Off,
        }
    }

    /// Override the caller line identity; blank values keep the default
    pub fn with_cli(mut self, cli: impl Into<String>) -> Self {
        let cli = cli.into();
        if !cli.trim().is_empty() {
            self.cli = cli;
        }
        self
    }

    /// Override the reference id; blank values keep the default
    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        let reference_id = reference_id.into();
        if !reference_id.trim().is_empty() {
            self.reference_id = reference_id;
        }
        self
    }

    pub fn with_dtmf(mut self, flag: Flag) -> Self {
        self.dtmfflag = flag;
        self
    }

    pub fn with_recording(mut self, flag: Flag) -> Self {
        self.recordingflag = flag;
        self
    }
}
