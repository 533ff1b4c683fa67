//! Plain-data session and caller contexts.
//!
//! [`SessionSnapshot`] and [`CallerSnapshot`] record what a session
//! tracker reported at one point in time. They implement the context
//! traits, so hosts without a live tracker handle (tests, replay tools,
//! the `grantscope` CLI) can still run checks and derivations.
//!
//! # JSON Shape
//!
//! ```json
//! {
//!   "id": { "pid": 4242, "bus_name": ":1.42" },
//!   "session": { "id": "c2", "is_local": true, "is_active": null }
//! }
//! ```
//!
//! Every field is optional. A missing or `null` property means "unknown".

use crate::context::{CallerContext, SessionContext};
use grantscope_types::{CallerId, SessionId};
use serde::{Deserialize, Serialize};

/// Session properties as reported by the session tracker.
///
/// Snapshots are immutable in practice: the builder methods consume and
/// return `self`.
///
/// # Example
///
/// ```
/// use grantscope_auth::{SessionContext, SessionSnapshot};
///
/// let session = SessionSnapshot::new().with_id("c1").local(true);
/// assert_eq!(session.is_local(), Some(true));
/// assert_eq!(session.is_active(), None);
/// assert_eq!(session.session_id().map(|id| id.as_str()), Some("c1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Tracker identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SessionId>,
    /// Whether the session is local; `None` if unknown.
    #[serde(default)]
    pub is_local: Option<bool>,
    /// Whether the session is active; `None` if unknown.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl SessionSnapshot {
    /// Creates a snapshot with both properties unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a snapshot with both properties known.
    #[must_use]
    pub fn known(is_local: bool, is_active: bool) -> Self {
        Self {
            id: None,
            is_local: Some(is_local),
            is_active: Some(is_active),
        }
    }

    /// Sets the tracker identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(SessionId::new(id));
        self
    }

    /// Records the session as local or remote.
    #[must_use]
    pub fn local(mut self, is_local: bool) -> Self {
        self.is_local = Some(is_local);
        self
    }

    /// Records the session as active or inactive.
    #[must_use]
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

impl SessionContext for SessionSnapshot {
    fn is_local(&self) -> Option<bool> {
        self.is_local
    }

    fn is_active(&self) -> Option<bool> {
        self.is_active
    }

    fn session_id(&self) -> Option<&SessionId> {
        self.id.as_ref()
    }
}

/// A caller and, if it belongs to one, its session.
///
/// # Example
///
/// ```
/// use grantscope_auth::{CallerContext, CallerId, CallerSnapshot, SessionSnapshot};
///
/// let daemon = CallerSnapshot::new().with_id(CallerId::from_pid(1));
/// assert!(daemon.session().is_none());
///
/// let user = CallerSnapshot::new().in_session(SessionSnapshot::known(true, true));
/// assert!(user.session().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerSnapshot {
    /// Caller identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CallerId>,
    /// The caller's session; `None` if the caller is outside any session.
    #[serde(default)]
    pub session: Option<SessionSnapshot>,
}

impl CallerSnapshot {
    /// Creates a caller outside any session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the caller identifier.
    #[must_use]
    pub fn with_id(mut self, id: CallerId) -> Self {
        self.id = Some(id);
        self
    }

    /// Places the caller in `session`.
    #[must_use]
    pub fn in_session(mut self, session: SessionSnapshot) -> Self {
        self.session = Some(session);
        self
    }
}

impl CallerContext for CallerSnapshot {
    fn session(&self) -> Option<&dyn SessionContext> {
        self.session.as_ref().map(|s| s as &dyn SessionContext)
    }

    fn caller_id(&self) -> Option<&CallerId> {
        self.id.as_ref()
    }
}
