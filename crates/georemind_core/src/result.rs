//! Tagged outcome returned by reminder data-source reads.
//!
//! # Invariants
//! - Every read yields exactly one variant.
//! - Payload access goes through a match on the variant.

use std::fmt::{Display, Formatter};

/// Message reported when a point lookup finds no reminder.
pub const REMINDER_NOT_FOUND: &str = "Reminder not found!";

/// Outcome of a data-source operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DataResult<T> {
    Success(T),
    Error {
        message: String,
        status_code: Option<i32>,
    },
}

impl<T> DataResult<T> {
    /// Builds an `Error` without a status code.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            status_code: None,
        }
    }

    /// Builds an `Error` carrying a numeric status code.
    pub fn error_with_code(message: impl Into<String>, status_code: i32) -> Self {
        Self::Error {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Builds the lookup miss outcome.
    pub fn not_found() -> Self {
        Self::error(REMINDER_NOT_FOUND)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Converts into the payload, discarding any error.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Error { .. } => None,
        }
    }

    /// Returns the error message, if this is an `Error`.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error { message, .. } => Some(message.as_str()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DataResult<U> {
        match self {
            Self::Success(value) => DataResult::Success(f(value)),
            Self::Error {
                message,
                status_code,
            } => DataResult::Error {
                message,
                status_code,
            },
        }
    }
}

impl<T> Display for DataResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success(_) => write!(f, "success"),
            Self::Error {
                message,
                status_code: Some(code),
            } => write!(f, "error ({code}): {message}"),
            Self::Error {
                message,
                status_code: None,
            } => write!(f, "error: {message}"),
        }
    }
}
