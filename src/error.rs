//! Handler fault type
//!
//! A fault raised while producing a response. Carries an optional HTTP status
//! code and an optional error name; the dispatcher converts faults into JSON
//! error responses instead of letting them tear down the connection.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    /// Error name surfaced in the response `error` field
    name: Option<String>,
    /// Declared HTTP status code, if any
    status: Option<u16>,
    /// Human-readable description
    message: String,
}

impl HandlerError {
    /// Fault with no declared status; maps to 500
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            name: None,
            status: None,
            message: message.into(),
        }
    }

    /// Fault carrying an explicit status code and error name
    pub fn with_status(status: u16, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            status: Some(status),
            message: message.into(),
        }
    }

    /// Effective response status: the declared code when valid, otherwise 500
    pub fn status_code(&self) -> u16 {
        match self.status {
            Some(code) if (100..=599).contains(&code) => code,
            _ => 500,
        }
    }

    /// Effective error name for the response body
    pub fn error_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Internal Server Error")
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_name(), self.message)
    }
}

impl std::error::Error for HandlerError {}
