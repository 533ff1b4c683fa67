//! Core types for grantscope.
//!
//! This crate holds the identifiers shared by the constraint engine and
//! its hosts, plus the [`ErrorCode`] interface every grantscope error
//! type implements.
//!
//! # Crate Architecture
//!
//! ```text
//! grantscope-types  (SessionId, CallerId, ErrorCode)  ◄── HERE
//!        ↑
//! grantscope-auth   (AuthorizationConstraint, SessionContext, CallerContext)
//!        ↑
//! grantscope-cli    (grantscope binary)
//! ```
//!
//! # Example
//!
//! ```
//! use grantscope_types::{CallerId, SessionId};
//!
//! let session = SessionId::new("/org/freedesktop/ConsoleKit/Session2");
//! assert_eq!(session.as_str(), "/org/freedesktop/ConsoleKit/Session2");
//!
//! let caller = CallerId::from_pid(4242);
//! assert_eq!(caller.pid(), 4242);
//! ```

mod error;
mod id;

pub use error::ErrorCode;
pub use id::{CallerId, SessionId};
