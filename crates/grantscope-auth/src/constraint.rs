//! Authorization constraints.
//!
//! An [`AuthorizationConstraint`] scopes a granted authorization to the
//! session context it was obtained in. It holds two independent
//! requirements, so exactly four constraints exist:
//!
//! | Constant | Flags | Text |
//! |----------|-------|------|
//! | [`NONE`](AuthorizationConstraint::NONE) | (empty) | `none` |
//! | [`REQUIRE_LOCAL`](AuthorizationConstraint::REQUIRE_LOCAL) | `REQUIRE_LOCAL` | `local` |
//! | [`REQUIRE_ACTIVE`](AuthorizationConstraint::REQUIRE_ACTIVE) | `REQUIRE_ACTIVE` | `active` |
//! | [`REQUIRE_LOCAL_ACTIVE`](AuthorizationConstraint::REQUIRE_LOCAL_ACTIVE) | both | `local+active` |
//!
//! The text column is the persisted form. Authorization records embed
//! exactly one of these four tokens; nothing else parses.
//!
//! # Example
//!
//! ```
//! use grantscope_auth::{AuthorizationConstraint, CallerSnapshot, SessionSnapshot};
//!
//! let stored: AuthorizationConstraint = "local".parse().unwrap();
//! assert!(stored.requires_local());
//! assert!(!stored.requires_active());
//!
//! let ssh = CallerSnapshot::new().in_session(SessionSnapshot::new().local(false).active(true));
//! assert!(!stored.is_satisfied_by_caller(&ssh));
//!
//! let console = CallerSnapshot::new().in_session(SessionSnapshot::new().local(true).active(false));
//! assert!(stored.is_satisfied_by_caller(&console));
//! ```

use crate::context::{CallerContext, ResolvedSession, SessionContext, UnknownPolicy};
use crate::error::ConstraintError;
use bitflags::bitflags;
use grantscope_types::SessionId;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

bitflags! {
    /// Raw requirement bits of an [`AuthorizationConstraint`].
    ///
    /// Only useful for presenting a constraint to a user. Checks must go
    /// through [`AuthorizationConstraint::is_satisfied_by_session`] and
    /// [`AuthorizationConstraint::is_satisfied_by_caller`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ConstraintFlags: u8 {
        /// The session must be attached to a local seat.
        const REQUIRE_LOCAL  = 0b01;
        /// The session must be the active session on its seat.
        const REQUIRE_ACTIVE = 0b10;
    }
}

const TEXT_NONE: &str = "none";
const TEXT_LOCAL: &str = "local";
const TEXT_ACTIVE: &str = "active";
const TEXT_LOCAL_ACTIVE: &str = "local+active";

const BITS_NONE: u8 = 0;
const BITS_LOCAL: u8 = ConstraintFlags::REQUIRE_LOCAL.bits();
const BITS_ACTIVE: u8 = ConstraintFlags::REQUIRE_ACTIVE.bits();
const BITS_LOCAL_ACTIVE: u8 = BITS_LOCAL | BITS_ACTIVE;

/// A condition a session must meet for a granted authorization to apply.
///
/// Constraints are small `Copy` values. Equality is structural: two
/// constraints are equal iff they carry the same requirements.
///
/// There is no mutation API. Every constructor lands on one of the four
/// canonical values; unknown bits are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthorizationConstraint {
    flags: ConstraintFlags,
}

impl AuthorizationConstraint {
    /// No requirement. Satisfied by every caller, including callers
    /// outside any session.
    pub const NONE: Self = Self {
        flags: ConstraintFlags::empty(),
    };

    /// The session must be local.
    pub const REQUIRE_LOCAL: Self = Self {
        flags: ConstraintFlags::REQUIRE_LOCAL,
    };

    /// The session must be active.
    pub const REQUIRE_ACTIVE: Self = Self {
        flags: ConstraintFlags::REQUIRE_ACTIVE,
    };

    /// The session must be local and active.
    pub const REQUIRE_LOCAL_ACTIVE: Self = Self {
        flags: ConstraintFlags::REQUIRE_LOCAL.union(ConstraintFlags::REQUIRE_ACTIVE),
    };

    /// Every constraint, from weakest to strongest.
    pub const CANONICAL: [Self; 4] = [
        Self::NONE,
        Self::REQUIRE_LOCAL,
        Self::REQUIRE_ACTIVE,
        Self::REQUIRE_LOCAL_ACTIVE,
    ];

    /// Returns [`NONE`](Self::NONE).
    #[must_use]
    pub const fn none() -> Self {
        Self::NONE
    }

    /// Returns [`REQUIRE_LOCAL`](Self::REQUIRE_LOCAL).
    #[must_use]
    pub const fn require_local() -> Self {
        Self::REQUIRE_LOCAL
    }

    /// Returns [`REQUIRE_ACTIVE`](Self::REQUIRE_ACTIVE).
    #[must_use]
    pub const fn require_active() -> Self {
        Self::REQUIRE_ACTIVE
    }

    /// Returns [`REQUIRE_LOCAL_ACTIVE`](Self::REQUIRE_LOCAL_ACTIVE).
    #[must_use]
    pub const fn require_local_active() -> Self {
        Self::REQUIRE_LOCAL_ACTIVE
    }

    /// Builds a constraint from raw flags, dropping unknown bits.
    ///
    /// # Example
    ///
    /// ```
    /// use grantscope_auth::{AuthorizationConstraint, ConstraintFlags};
    ///
    /// let c = AuthorizationConstraint::from_flags(ConstraintFlags::REQUIRE_ACTIVE);
    /// assert_eq!(c, AuthorizationConstraint::REQUIRE_ACTIVE);
    ///
    /// let stray = ConstraintFlags::from_bits_retain(0b1101);
    /// assert_eq!(
    ///     AuthorizationConstraint::from_flags(stray),
    ///     AuthorizationConstraint::REQUIRE_LOCAL
    /// );
    /// ```
    #[must_use]
    pub const fn from_flags(flags: ConstraintFlags) -> Self {
        Self {
            flags: ConstraintFlags::from_bits_truncate(flags.bits()),
        }
    }

    /// Returns the requirement flags.
    ///
    /// The flags describe the constraint for display purposes (listing a
    /// user's authorizations, for instance). Use the `is_satisfied_by_*`
    /// methods to check a session or caller.
    #[must_use]
    pub const fn flags(self) -> ConstraintFlags {
        self.flags
    }

    /// Returns `true` if the session must be local.
    #[must_use]
    pub const fn requires_local(self) -> bool {
        self.flags.contains(ConstraintFlags::REQUIRE_LOCAL)
    }

    /// Returns `true` if the session must be active.
    #[must_use]
    pub const fn requires_active(self) -> bool {
        self.flags.contains(ConstraintFlags::REQUIRE_ACTIVE)
    }

    /// Returns `true` for [`NONE`](Self::NONE).
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.flags.is_empty()
    }

    /// Checks a session against this constraint.
    ///
    /// A property the session cannot report counts as not held, so an
    /// unverifiable session only satisfies requirements it does not face.
    ///
    /// # Example
    ///
    /// ```
    /// use grantscope_auth::{AuthorizationConstraint, SessionSnapshot};
    ///
    /// let unknown = SessionSnapshot::new();
    /// assert!(AuthorizationConstraint::NONE.is_satisfied_by_session(&unknown));
    /// assert!(!AuthorizationConstraint::REQUIRE_LOCAL.is_satisfied_by_session(&unknown));
    /// assert!(!AuthorizationConstraint::REQUIRE_ACTIVE.is_satisfied_by_session(&unknown));
    /// ```
    #[must_use]
    pub fn is_satisfied_by_session<S: SessionContext + ?Sized>(self, session: &S) -> bool {
        let resolved = ResolvedSession::resolve(session, UnknownPolicy::AssumeAbsent);
        let satisfied = self.is_satisfied_by(resolved);
        if !satisfied {
            debug!(
                constraint = %self,
                session = ?session.session_id().map(SessionId::as_str),
                is_local = resolved.is_local,
                is_active = resolved.is_active,
                "session does not satisfy constraint"
            );
        }
        satisfied
    }

    /// Checks already-resolved session properties against this constraint.
    #[must_use]
    pub const fn is_satisfied_by(self, resolved: ResolvedSession) -> bool {
        (!self.requires_local() || resolved.is_local)
            && (!self.requires_active() || resolved.is_active)
    }

    /// Checks a caller against this constraint.
    ///
    /// A caller in a session is checked through
    /// [`is_satisfied_by_session`](Self::is_satisfied_by_session). A
    /// caller outside any session can never be local or active, so it
    /// only satisfies [`NONE`](Self::NONE).
    ///
    /// # Example
    ///
    /// ```
    /// use grantscope_auth::{AuthorizationConstraint, CallerSnapshot};
    ///
    /// let daemon = CallerSnapshot::new();
    /// assert!(AuthorizationConstraint::NONE.is_satisfied_by_caller(&daemon));
    /// assert!(!AuthorizationConstraint::REQUIRE_ACTIVE.is_satisfied_by_caller(&daemon));
    /// ```
    #[must_use]
    pub fn is_satisfied_by_caller<C: CallerContext + ?Sized>(self, caller: &C) -> bool {
        match caller.session() {
            Some(session) => self.is_satisfied_by_session(session),
            None => {
                let satisfied = self.is_none();
                if !satisfied {
                    debug!(
                        constraint = %self,
                        caller = ?caller.caller_id().map(ToString::to_string),
                        "caller without session does not satisfy constraint"
                    );
                }
                satisfied
            }
        }
    }

    /// Derives the tightest constraint matching a caller's current context.
    ///
    /// Attach the result to a freshly issued grant so the grant never
    /// outlives the context it was obtained in. A property the session
    /// cannot report is assumed held, which records the stronger
    /// requirement. A caller outside any session gets [`NONE`](Self::NONE).
    ///
    /// # Example
    ///
    /// ```
    /// use grantscope_auth::{AuthorizationConstraint, CallerSnapshot, SessionSnapshot};
    ///
    /// let unknown = CallerSnapshot::new().in_session(SessionSnapshot::new());
    /// assert_eq!(
    ///     AuthorizationConstraint::from_caller(&unknown),
    ///     AuthorizationConstraint::REQUIRE_LOCAL_ACTIVE
    /// );
    ///
    /// let remote_background = CallerSnapshot::new()
    ///     .in_session(SessionSnapshot::new().local(false).active(false));
    /// assert_eq!(
    ///     AuthorizationConstraint::from_caller(&remote_background),
    ///     AuthorizationConstraint::NONE
    /// );
    /// ```
    #[must_use]
    pub fn from_caller<C: CallerContext + ?Sized>(caller: &C) -> Self {
        let Some(session) = caller.session() else {
            trace!(
                caller = ?caller.caller_id().map(ToString::to_string),
                "caller has no session, deriving no constraint"
            );
            return Self::NONE;
        };

        let resolved = ResolvedSession::resolve(session, UnknownPolicy::AssumePresent);
        let derived = Self::from_resolved(resolved);
        trace!(
            constraint = %derived,
            session = ?session.session_id().map(SessionId::as_str),
            "derived constraint from caller"
        );
        derived
    }

    /// Maps resolved session properties to the matching constraint.
    #[must_use]
    pub const fn from_resolved(resolved: ResolvedSession) -> Self {
        match (resolved.is_local, resolved.is_active) {
            (true, true) => Self::REQUIRE_LOCAL_ACTIVE,
            (true, false) => Self::REQUIRE_LOCAL,
            (false, true) => Self::REQUIRE_ACTIVE,
            (false, false) => Self::NONE,
        }
    }

    /// Returns the canonical, machine-readable text form.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::Unrepresentable`] if the flags fall
    /// outside the four canonical combinations. Constraints built through
    /// this type's API never do.
    ///
    /// # Example
    ///
    /// ```
    /// use grantscope_auth::AuthorizationConstraint;
    ///
    /// assert_eq!(AuthorizationConstraint::NONE.to_text(), Ok("none"));
    /// assert_eq!(AuthorizationConstraint::REQUIRE_LOCAL_ACTIVE.to_text(), Ok("local+active"));
    /// ```
    pub fn to_text(self) -> Result<&'static str, ConstraintError> {
        match self.flags.bits() {
            BITS_NONE => Ok(TEXT_NONE),
            BITS_LOCAL => Ok(TEXT_LOCAL),
            BITS_ACTIVE => Ok(TEXT_ACTIVE),
            BITS_LOCAL_ACTIVE => Ok(TEXT_LOCAL_ACTIVE),
            bits => Err(ConstraintError::Unrepresentable { bits }),
        }
    }

    /// Parses the canonical text form.
    ///
    /// Returns `None` for anything but the four exact tokens. `None` means
    /// "unparseable" and is distinct from the valid `none` token.
    ///
    /// # Example
    ///
    /// ```
    /// use grantscope_auth::AuthorizationConstraint;
    ///
    /// assert_eq!(
    ///     AuthorizationConstraint::from_text("none"),
    ///     Some(AuthorizationConstraint::NONE)
    /// );
    /// assert_eq!(AuthorizationConstraint::from_text("LOCAL"), None);
    /// assert_eq!(AuthorizationConstraint::from_text(" local"), None);
    /// ```
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            TEXT_NONE => Some(Self::NONE),
            TEXT_LOCAL => Some(Self::REQUIRE_LOCAL),
            TEXT_ACTIVE => Some(Self::REQUIRE_ACTIVE),
            TEXT_LOCAL_ACTIVE => Some(Self::REQUIRE_LOCAL_ACTIVE),
            _ => None,
        }
    }

    /// Returns the human-readable names of the set requirements.
    ///
    /// # Example
    ///
    /// ```
    /// use grantscope_auth::AuthorizationConstraint;
    ///
    /// assert_eq!(AuthorizationConstraint::REQUIRE_LOCAL_ACTIVE.names(), vec!["LOCAL", "ACTIVE"]);
    /// assert!(AuthorizationConstraint::NONE.names().is_empty());
    /// ```
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.requires_local() {
            names.push("LOCAL");
        }
        if self.requires_active() {
            names.push("ACTIVE");
        }
        names
    }

    /// Returns a short English description for listings.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match (self.requires_local(), self.requires_active()) {
            (false, false) => "no constraint",
            (true, false) => "session must be local",
            (false, true) => "session must be active",
            (true, true) => "session must be local and active",
        }
    }
}

impl From<ConstraintFlags> for AuthorizationConstraint {
    fn from(flags: ConstraintFlags) -> Self {
        Self::from_flags(flags)
    }
}

impl fmt::Display for AuthorizationConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_text().map_err(|_| fmt::Error)?)
    }
}

impl FromStr for AuthorizationConstraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s).ok_or_else(|| ConstraintError::UnknownToken(s.to_string()))
    }
}

impl Serialize for AuthorizationConstraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.to_text().map_err(S::Error::custom)?;
        serializer.serialize_str(text)
    }
}

impl<'de> Deserialize<'de> for AuthorizationConstraint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
