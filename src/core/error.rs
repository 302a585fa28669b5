//! Domain error taxonomy
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Add Forbidden for role-gated commands
//! - 1.0.0: Conflict / NotFound / Validation / Storage split

use thiserror::Error;

/// Errors produced by the cycle tracking core.
///
/// `Conflict`, `NotFound`, `Validation` and `Forbidden` are expected outcomes of
/// user input and are turned into a user-visible message at the handler
/// boundary. `Storage` and `Transport` are real failures and get logged.
#[derive(Error, Debug)]
pub enum LunaError {
    /// The requested state already exists (e.g. an open cycle)
    #[error("conflict: {0}")]
    Conflict(String),

    /// The thing the operation needs does not exist (open cycle, pairing code, user)
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed input: dates, times, action codes, enum values
    #[error("invalid input: {0}")]
    Validation(String),

    /// The user's role or onboarding state does not allow this operation
    #[error("not permitted: {0}")]
    Forbidden(String),

    /// Underlying SQLite failure
    #[error("storage error: {0}")]
    Storage(#[from] sqlite::Error),

    /// Outbound delivery failure
    #[error("delivery failed: {0}")]
    Transport(String),
}

impl LunaError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// True for outcomes caused by user input rather than by a fault.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Conflict(_) | Self::NotFound(_) | Self::Validation(_) | Self::Forbidden(_)
        )
    }
}

pub type Result<T, E = LunaError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_errors() {
        assert!(LunaError::conflict("open cycle").is_expected());
        assert!(LunaError::not_found("no cycle").is_expected());
        assert!(LunaError::validation("bad date").is_expected());
        assert!(LunaError::forbidden("partner").is_expected());
        assert!(!LunaError::Transport("dm closed".into()).is_expected());
    }

    #[test]
    fn test_error_display() {
        let err = LunaError::not_found("pairing code 123456");
        assert_eq!(err.to_string(), "not found: pairing code 123456");
    }
}
