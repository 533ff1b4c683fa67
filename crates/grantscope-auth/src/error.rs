//! Constraint error type.

use grantscope_types::ErrorCode;
use thiserror::Error;

/// Error returned when a constraint cannot be converted to or from its
/// canonical text form.
///
/// # Example
///
/// ```
/// use grantscope_auth::{AuthorizationConstraint, ConstraintError, ErrorCode};
///
/// let err = "LOCAL".parse::<AuthorizationConstraint>().unwrap_err();
/// assert_eq!(err, ConstraintError::UnknownToken("LOCAL".to_string()));
/// assert_eq!(err.code(), "CONSTRAINT_UNKNOWN_TOKEN");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// The text is not one of `none`, `local`, `active`, `local+active`.
    #[error("unknown constraint '{0}': expected one of none, local, active, local+active")]
    UnknownToken(String),

    /// The flag combination has no canonical text form.
    #[error("constraint flags {bits:#06b} have no text form")]
    Unrepresentable {
        /// Raw flag bits.
        bits: u8,
    },
}

impl ErrorCode for ConstraintError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownToken(_) => "CONSTRAINT_UNKNOWN_TOKEN",
            Self::Unrepresentable { .. } => "CONSTRAINT_UNREPRESENTABLE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_token_display() {
        let err = ConstraintError::UnknownToken("bogus".to_string());
        let msg = err.to_string();
        assert!(msg.contains("'bogus'"), "got: {msg}");
        assert!(msg.contains("local+active"), "got: {msg}");
        assert_eq!(err.code(), "CONSTRAINT_UNKNOWN_TOKEN");
    }

    #[test]
    fn unrepresentable_display() {
        let err = ConstraintError::Unrepresentable { bits: 0b100 };
        let msg = err.to_string();
        assert!(msg.contains("0b0100"), "got: {msg}");
        assert_eq!(err.code(), "CONSTRAINT_UNREPRESENTABLE");
    }

    #[test]
    fn nothing_is_recoverable() {
        assert!(!ConstraintError::UnknownToken(String::new()).is_recoverable());
        assert!(!ConstraintError::Unrepresentable { bits: 0xff }.is_recoverable());
    }
}
