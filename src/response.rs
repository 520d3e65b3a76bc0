use std::fmt;

use http::HeaderMap;

use crate::error::JPushError;

pub const RATE_LIMIT_QUOTA: &str = "x-rate-limit-limit";
pub const RATE_LIMIT_REMAINING: &str = "x-rate-limit-remaining";
pub const RATE_LIMIT_RESET: &str = "x-rate-limit-reset";

/// Request quota of the app, as reported by the response headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests allowed per time window.
    pub quota: u32,
    pub remaining: u32,
    /// Seconds until the window resets.
    pub reset: u32,
}

impl RateLimitInfo {
    /// `None` unless all three headers are present and numeric.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let read = |name: &str| -> Option<u32> { headers.get(name)?.to_str().ok()?.trim().parse().ok() };

        Some(RateLimitInfo {
            quota: read(RATE_LIMIT_QUOTA)?,
            remaining: read(RATE_LIMIT_REMAINING)?,
            reset: read(RATE_LIMIT_RESET)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub code: i64,
    pub message: String,
}

impl fmt::Display for ErrorResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "code {}: {}", self.code, self.message)
    }
}

/// What every API response carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseBase {
    #[serde(skip)]
    pub status_code: u16,
    #[serde(skip)]
    pub rate_limit: Option<RateLimitInfo>,
    #[serde(default)]
    pub error: Option<ErrorResult>,
}

/// The provider sends the message id as a string when the push is accepted and
/// as a number when it is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MsgId {
    Text(String),
    Number(i64),
}

impl fmt::Display for MsgId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MsgId::Text(id) => write!(f, "{}", id),
            MsgId::Number(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushResult {
    #[serde(flatten)]
    pub base: ResponseBase,
    pub msg_id: MsgId,
    #[serde(default)]
    pub sendno: Option<String>,
}

/// A push response, told apart by the presence of the error block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome<'a> {
    Accepted { msg_id: &'a MsgId },
    Rejected { error: &'a ErrorResult, msg_id: &'a MsgId },
}

impl PushResult {
    pub fn from_slice(body: &[u8]) -> Result<Self, JPushError> {
        serde_json::from_slice(body).map_err(|err| {
            debug!("Could not decode push response: {}", err);
            JPushError::InvalidResponse
        })
    }

    pub fn outcome(&self) -> PushOutcome<'_> {
        match self.base.error {
            Some(ref error) => PushOutcome::Rejected {
                error,
                msg_id: &self.msg_id,
            },
            None => PushOutcome::Accepted { msg_id: &self.msg_id },
        }
    }

    pub fn is_success(&self) -> bool {
        self.base.error.is_none()
    }
}

/// Tags, alias and mobile number currently stored for a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QueryDeviceResult {
    #[serde(flatten)]
    pub base: ResponseBase,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
}

impl QueryDeviceResult {
    pub fn from_slice(body: &[u8]) -> Result<Self, JPushError> {
        serde_json::from_slice(body).map_err(|err| {
            debug!("Could not decode device response: {}", err);
            JPushError::InvalidResponse
        })
    }
}
