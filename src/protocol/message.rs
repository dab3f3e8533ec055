//! Message definitions
//!
//! The request and response records exchanged with clients.

use serde::{Deserialize, Serialize};

/// A raw request as decoded from the wire
///
/// Every field is optional on the wire and decodes to an empty string when
/// missing. Which fields matter depends on `action`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    pub action: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,

    /// Name of the skip list index
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slkey: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub min_key: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub max_key: String,
}

impl Request {
    /// Create a request for `action` with all other fields empty
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }
}

/// Response status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: Status,

    /// Human-readable failure, present on error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Single result value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Reserved for multi-value results
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl Response {
    /// Create a success response with an optional value
    pub fn success(value: Option<String>) -> Self {
        Self {
            status: Status::Success,
            message: None,
            value,
            values: Vec::new(),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            value: None,
            values: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
