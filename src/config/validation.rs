//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Smallest usable line limit: room for a short command plus CR LF.
const MIN_LINE_LEN: usize = 16;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain spaces, got '{0}'")]
    InvalidServerName(String),
    #[error("server.sid must be exactly 3 characters, got {0}")]
    InvalidSid(usize),
    #[error("server.sid must match pattern [0-9][A-Z0-9][A-Z0-9], got '{0}'")]
    InvalidSidFormat(String),
    #[error("limits.max_line_len must be at least 16, got {0}")]
    LineLimitTooSmall(usize),
    #[error("limits.sendq_len must be greater than zero")]
    ZeroSendQ,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = &config.server.name;
    if name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if name.contains(' ') {
        errors.push(ValidationError::InvalidServerName(name.clone()));
    }

    // SID validation (TS6 format)
    let sid = &config.server.sid;
    if sid.len() != 3 {
        errors.push(ValidationError::InvalidSid(sid.len()));
    } else {
        let b = sid.as_bytes();
        let valid = b[0].is_ascii_digit()
            && (b[1].is_ascii_uppercase() || b[1].is_ascii_digit())
            && (b[2].is_ascii_uppercase() || b[2].is_ascii_digit());
        if !valid {
            errors.push(ValidationError::InvalidSidFormat(sid.clone()));
        }
    }

    if config.limits.max_line_len < MIN_LINE_LEN {
        errors.push(ValidationError::LineLimitTooSmall(config.limits.max_line_len));
    }
    if config.limits.sendq_len == 0 {
        errors.push(ValidationError::ZeroSendQ);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
