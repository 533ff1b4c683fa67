//! Session and caller queries supplied by the host.
//!
//! grantscope does not own a session model. The host (a session tracker
//! client, a bus daemon) implements [`SessionContext`] and
//! [`CallerContext`] for its own types, and the constraint operations
//! consume them through these traits only.
//!
//! # Unknown Properties
//!
//! Locality and activity are reported as `Option<bool>`: `None` means the
//! tracker could not say. Turning `None` into a boolean is a policy
//! decision, made with [`UnknownPolicy`] at the call site that knows which
//! direction is safe.

use grantscope_types::{CallerId, SessionId};
use std::sync::Arc;

/// Locality and activity queries for one session.
///
/// Implementations must be cheap and non-blocking; they are called on
/// every constraint check.
///
/// # Example
///
/// ```
/// use grantscope_auth::{AuthorizationConstraint, SessionContext};
///
/// struct RemoteShell;
///
/// impl SessionContext for RemoteShell {
///     fn is_local(&self) -> Option<bool> {
///         Some(false)
///     }
///
///     fn is_active(&self) -> Option<bool> {
///         Some(true)
///     }
/// }
///
/// assert!(AuthorizationConstraint::REQUIRE_ACTIVE.is_satisfied_by_session(&RemoteShell));
/// assert!(!AuthorizationConstraint::REQUIRE_LOCAL.is_satisfied_by_session(&RemoteShell));
/// ```
pub trait SessionContext {
    /// Whether the session is attached to a local seat, if known.
    fn is_local(&self) -> Option<bool>;

    /// Whether the session is the active one on its seat, if known.
    fn is_active(&self) -> Option<bool>;

    /// Identifier used in log output.
    fn session_id(&self) -> Option<&SessionId> {
        None
    }
}

/// Session lookup for a caller.
///
/// A caller that is not part of any session (a system daemon, a cron job)
/// returns `None` from [`session`](Self::session).
pub trait CallerContext {
    /// The session the caller belongs to, if any.
    fn session(&self) -> Option<&dyn SessionContext>;

    /// Identifier used in log output.
    fn caller_id(&self) -> Option<&CallerId> {
        None
    }
}

impl<T: SessionContext + ?Sized> SessionContext for &T {
    fn is_local(&self) -> Option<bool> {
        (**self).is_local()
    }

    fn is_active(&self) -> Option<bool> {
        (**self).is_active()
    }

    fn session_id(&self) -> Option<&SessionId> {
        (**self).session_id()
    }
}

impl<T: SessionContext + ?Sized> SessionContext for Box<T> {
    fn is_local(&self) -> Option<bool> {
        (**self).is_local()
    }

    fn is_active(&self) -> Option<bool> {
        (**self).is_active()
    }

    fn session_id(&self) -> Option<&SessionId> {
        (**self).session_id()
    }
}

impl<T: SessionContext + ?Sized> SessionContext for Arc<T> {
    fn is_local(&self) -> Option<bool> {
        (**self).is_local()
    }

    fn is_active(&self) -> Option<bool> {
        (**self).is_active()
    }

    fn session_id(&self) -> Option<&SessionId> {
        (**self).session_id()
    }
}

impl<T: CallerContext + ?Sized> CallerContext for &T {
    fn session(&self) -> Option<&dyn SessionContext> {
        (**self).session()
    }

    fn caller_id(&self) -> Option<&CallerId> {
        (**self).caller_id()
    }
}

impl<T: CallerContext + ?Sized> CallerContext for Box<T> {
    fn session(&self) -> Option<&dyn SessionContext> {
        (**self).session()
    }

    fn caller_id(&self) -> Option<&CallerId> {
        (**self).caller_id()
    }
}

impl<T: CallerContext + ?Sized> CallerContext for Arc<T> {
    fn session(&self) -> Option<&dyn SessionContext> {
        (**self).session()
    }

    fn caller_id(&self) -> Option<&CallerId> {
        (**self).caller_id()
    }
}

/// How an unknown session property is resolved to a boolean.
///
/// | Policy | `None` becomes | Used by |
/// |--------|----------------|---------|
/// | [`AssumeAbsent`](Self::AssumeAbsent) | `false` | checking a recorded constraint |
/// | [`AssumePresent`](Self::AssumePresent) | `true` | deriving a constraint for a new grant |
///
/// Checking denies what it cannot verify. Deriving records the strongest
/// requirement it cannot rule out. The two must not be merged.
///
/// # Example
///
/// ```
/// use grantscope_auth::UnknownPolicy;
///
/// assert!(!UnknownPolicy::AssumeAbsent.resolve(None));
/// assert!(UnknownPolicy::AssumePresent.resolve(None));
///
/// // Known values pass through unchanged.
/// assert!(UnknownPolicy::AssumeAbsent.resolve(Some(true)));
/// assert!(!UnknownPolicy::AssumePresent.resolve(Some(false)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnknownPolicy {
    /// Treat an unknown property as not held.
    AssumeAbsent,
    /// Treat an unknown property as held.
    AssumePresent,
}

impl UnknownPolicy {
    /// Resolves an optional property under this policy.
    #[must_use]
    pub fn resolve(self, value: Option<bool>) -> bool {
        value.unwrap_or(matches!(self, Self::AssumePresent))
    }
}

/// Session properties after unknown values have been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedSession {
    /// The session is local.
    pub is_local: bool,
    /// The session is active.
    pub is_active: bool,
}

impl ResolvedSession {
    /// Queries `session` and resolves both properties under `policy`.
    ///
    /// # Example
    ///
    /// ```
    /// use grantscope_auth::{ResolvedSession, SessionSnapshot, UnknownPolicy};
    ///
    /// let session = SessionSnapshot::new().local(true);
    ///
    /// let checked = ResolvedSession::resolve(&session, UnknownPolicy::AssumeAbsent);
    /// assert_eq!((checked.is_local, checked.is_active), (true, false));
    ///
    /// let derived = ResolvedSession::resolve(&session, UnknownPolicy::AssumePresent);
    /// assert_eq!((derived.is_local, derived.is_active), (true, true));
    /// ```
    #[must_use]
    pub fn resolve<S: SessionContext + ?Sized>(session: &S, policy: UnknownPolicy) -> Self {
        Self {
            is_local: policy.resolve(session.is_local()),
            is_active: policy.resolve(session.is_active()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        local: Option<bool>,
        active: Option<bool>,
    }

    impl SessionContext for Fixed {
        fn is_local(&self) -> Option<bool> {
            self.local
        }

        fn is_active(&self) -> Option<bool> {
            self.active
        }
    }

    struct Orphan;

    impl CallerContext for Orphan {
        fn session(&self) -> Option<&dyn SessionContext> {
            None
        }
    }

    struct Member(Fixed);

    impl CallerContext for Member {
        fn session(&self) -> Option<&dyn SessionContext> {
            Some(&self.0)
        }
    }

    #[test]
    fn policies_differ_only_on_unknown() {
        for value in [Some(true), Some(false)] {
            assert_eq!(
                UnknownPolicy::AssumeAbsent.resolve(value),
                UnknownPolicy::AssumePresent.resolve(value)
            );
        }
        assert_ne!(
            UnknownPolicy::AssumeAbsent.resolve(None),
            UnknownPolicy::AssumePresent.resolve(None)
        );
    }

    #[test]
    fn resolve_mixed_session() {
        let session = Fixed {
            local: None,
            active: Some(false),
        };

        let absent = ResolvedSession::resolve(&session, UnknownPolicy::AssumeAbsent);
        assert!(!absent.is_local);
        assert!(!absent.is_active);

        let present = ResolvedSession::resolve(&session, UnknownPolicy::AssumePresent);
        assert!(present.is_local);
        assert!(!present.is_active);
    }

    #[test]
    fn default_ids_are_none() {
        let session = Fixed {
            local: Some(true),
            active: Some(true),
        };
        assert!(session.session_id().is_none());
        assert!(Orphan.caller_id().is_none());
    }

    #[test]
    fn caller_session_lookup() {
        assert!(Orphan.session().is_none());

        let member = Member(Fixed {
            local: Some(true),
            active: None,
        });
        let session = member.session().expect("member has a session");
        assert_eq!(session.is_local(), Some(true));
        assert_eq!(session.is_active(), None);
    }

    #[test]
    fn smart_pointers_forward() {
        let boxed: Box<dyn SessionContext> = Box::new(Fixed {
            local: Some(false),
            active: Some(true),
        });
        assert_eq!(boxed.is_local(), Some(false));
        assert_eq!(boxed.is_active(), Some(true));

        let shared: Arc<dyn CallerContext> = Arc::new(Orphan);
        assert!(shared.session().is_none());

        let by_ref: &dyn CallerContext = &Orphan;
        assert!(by_ref.session().is_none());
    }
}
