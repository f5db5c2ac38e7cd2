//! Call bounded context - building and dialing click-to-call requests

pub mod dial_pad;
pub mod outcome;
pub mod request;
pub mod value_object;
pub mod vendor_response;

pub use dial_pad::{DialPad, DialPadKey, MAX_DIGITS};
pub use outcome::CallInitiationOutcome;
pub use request::CallRequest;
pub use value_object::{Flag, DEFAULT_CLI, DEFAULT_REFERENCE_ID, DIRECT_DIAL_NUMBER, PARTY_CLI};
pub use vendor_response::{VendorMessage, VendorResponse};
