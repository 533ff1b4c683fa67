//! Authorization constraints for grantscope.
//!
//! A privilege-authorization engine attaches an [`AuthorizationConstraint`]
//! to every grant it issues. The constraint records the context the grant
//! was obtained in (was the caller's session local, was it active) so the
//! grant cannot later be exercised from a weaker context.
//!
//! # Two Directions, Two Defaults
//!
//! ```text
//!  issuing a grant                         using a grant
//!  ───────────────                         ─────────────
//!  AuthorizationConstraint::from_caller    constraint.is_satisfied_by_caller
//!  unknown property ⇒ assume present       unknown property ⇒ assume absent
//!  (impose the strongest constraint)       (deny when it cannot be verified)
//! ```
//!
//! Both defaults bias toward the safer outcome. They read as opposite
//! booleans and are kept apart as [`UnknownPolicy::AssumePresent`] and
//! [`UnknownPolicy::AssumeAbsent`].
//!
//! # Crate Architecture
//!
//! ```text
//! grantscope-types  (SessionId, CallerId, ErrorCode)
//!        ↑
//! grantscope-auth   ◄── THIS CRATE
//!   ├── context     SessionContext / CallerContext traits (host-supplied queries)
//!   ├── constraint  AuthorizationConstraint, ConstraintFlags
//!   ├── snapshot    SessionSnapshot / CallerSnapshot value impls
//!   └── error       ConstraintError
//! ```
//!
//! # Example
//!
//! ```
//! use grantscope_auth::{AuthorizationConstraint, CallerSnapshot, SessionSnapshot};
//!
//! // The caller authenticated from a local, active session.
//! let at_issue = CallerSnapshot::new()
//!     .in_session(SessionSnapshot::new().local(true).active(true));
//! let constraint = AuthorizationConstraint::from_caller(&at_issue);
//! assert_eq!(constraint, AuthorizationConstraint::REQUIRE_LOCAL_ACTIVE);
//! assert_eq!(constraint.to_text().unwrap(), "local+active");
//!
//! // Later the same user switches to another seat session.
//! let later = CallerSnapshot::new()
//!     .in_session(SessionSnapshot::new().local(true).active(false));
//! assert!(!constraint.is_satisfied_by_caller(&later));
//! ```

pub mod constraint;
pub mod context;
pub mod error;
pub mod snapshot;

pub use constraint::{AuthorizationConstraint, ConstraintFlags};
pub use context::{CallerContext, ResolvedSession, SessionContext, UnknownPolicy};
pub use error::ConstraintError;
pub use snapshot::{CallerSnapshot, SessionSnapshot};

// Re-export identifiers for convenience
pub use grantscope_types::{CallerId, ErrorCode, SessionId};
