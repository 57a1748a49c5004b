// ABOUTME: DNS-compatible worker name validation.
// ABOUTME: Worker names become URL subdomains, so they must be RFC 1123 labels.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerNameError {
    #[error("worker name cannot be empty")]
    Empty,

    #[error("worker name exceeds maximum length of 63 characters")]
    TooLong,

    #[error("worker name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("worker name cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("worker name must be lowercase")]
    NotLowercase,

    #[error("invalid character in worker name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkerName(String);

impl WorkerName {
    pub fn new(value: &str) -> Result<Self, WorkerNameError> {
        if value.is_empty() {
            return Err(WorkerNameError::Empty);
        }

        if value.len() > 63 {
            return Err(WorkerNameError::TooLong);
        }

        if value.starts_with('-') {
            return Err(WorkerNameError::StartsWithHyphen);
        }

        if value.ends_with('-') {
            return Err(WorkerNameError::EndsWithHyphen);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(WorkerNameError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(WorkerNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
