//! Unified error interface for grantscope.
//!
//! All grantscope error types implement [`ErrorCode`] to provide a
//! machine-readable code and recoverability information.
//!
//! # Example
//!
//! ```
//! use grantscope_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LookupError {
//!     NoSuchSession,
//!     TrackerUnavailable,
//! }
//!
//! impl ErrorCode for LookupError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::NoSuchSession => "LOOKUP_NO_SUCH_SESSION",
//!             Self::TrackerUnavailable => "LOOKUP_TRACKER_UNAVAILABLE",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::TrackerUnavailable)
//!     }
//! }
//!
//! let err = LookupError::TrackerUnavailable;
//! assert_eq!(err.code(), "LOOKUP_TRACKER_UNAVAILABLE");
//! assert!(err.is_recoverable());
//! ```

/// Machine-readable error code interface.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**, namespace-prefixed: `"CONSTRAINT_UNKNOWN_TOKEN"`
/// - **Stable**: codes are part of the API contract and never change
///
/// # Recoverability
///
/// An error is recoverable if retrying, or a user action, may make the
/// operation succeed. Malformed input and internal invariant violations
/// are not recoverable.
pub trait ErrorCode {
    /// Returns the stable error code.
    fn code(&self) -> &'static str;

    /// Returns `true` if retrying the operation may succeed.
    fn is_recoverable(&self) -> bool;
}
