//! Call value objects

use crate::domain::shared::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller line identity sent when the call party carries none
pub const DEFAULT_CLI: &str = "1600413802";

/// Caller line identity a fresh call party starts with
pub const PARTY_CLI: &str = "9610012318";

/// Reference id sent when the call party carries none
pub const DEFAULT_REFERENCE_ID: &str = "1212";

/// Toll-free number dialed from the device itself, never through the vendor
pub const DIRECT_DIAL_NUMBER: &str = "1600180068";

/// On/off switch encoded as `0`/`1` on the wire (DTMF capture, recording)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Flag {
    #[default]
    Off,
    On,
}

impl Flag {
    pub fn as_u8(&self) -> u8 {
        match self {
            Flag::Off => 0,
            Flag::On => 1,
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self, Flag::On)
    }
}

impl TryFrom<u8> for Flag {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Flag::Off),
            1 => Ok(Flag::On),
            other => Err(DomainError::ValidationError(format!(
                "flag must be 0 or 1, got {}",
                other
            ))),
        }
    }
}

impl From<Flag> for u8 {
    fn from(flag: Flag) -> Self {
        flag.as_u8()
    }
}

impl From<bool> for Flag {
    fn from(on: bool) -> Self {
        if on {
            Flag::On
        } else {
            Flag::Off
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wire_encoding() {
        assert_eq!(serde_json::to_string(&Flag::Off).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Flag::On).unwrap(), "1");
        assert_eq!(serde_json::from_str::<Flag>("1").unwrap(), Flag::On);
    }

    #[test]
    fn test_flag_rejects_other_values() {
        assert!(Flag::try_from(2).is_err());
        assert!(serde_json::from_str::<Flag>("7").is_err());
    }

    #[test]
    fn test_flag_display_matches_form_value() {
        assert_eq!(Flag::from(true).to_string(), "1");
        assert_eq!(Flag::default().to_string(), "0");
    }
}
