//! Identifier types for sessions and callers.
//!
//! Sessions and callers are owned by the host system (a session tracker,
//! a message bus). grantscope only carries their identifiers around for
//! logging and for snapshot serialization.

use serde::{Deserialize, Serialize};

/// Identifier of a login session as reported by the session tracker.
///
/// The value is opaque to grantscope. Session trackers typically use an
/// object path (`/org/freedesktop/ConsoleKit/Session2`) or a short name
/// (`c2`), both of which are accepted verbatim.
///
/// # Example
///
/// ```
/// use grantscope_types::SessionId;
///
/// let id = SessionId::new("c2");
/// assert_eq!(id.to_string(), "c2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session identifier from the tracker's name for it.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a caller requesting to exercise a privilege.
///
/// A caller is identified by its process ID. The bus-level unique name,
/// when known, is carried alongside for diagnostics.
///
/// # Example
///
/// ```
/// use grantscope_types::CallerId;
///
/// let caller = CallerId::from_pid(1234).with_bus_name(":1.42");
/// assert_eq!(caller.pid(), 1234);
/// assert_eq!(caller.bus_name(), Some(":1.42"));
/// assert_eq!(caller.to_string(), "pid:1234 (:1.42)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerId {
    pid: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bus_name: Option<String>,
}

impl CallerId {
    /// Creates a caller identifier for the given process ID.
    #[must_use]
    pub fn from_pid(pid: u32) -> Self {
        Self {
            pid,
            bus_name: None,
        }
    }

    /// Returns a copy of this identifier carrying the given bus name.
    #[must_use]
    pub fn with_bus_name(mut self, name: impl Into<String>) -> Self {
        self.bus_name = Some(name.into());
        self
    }

    /// Returns the process ID.
    #[must_use]
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Returns the bus unique name, if known.
    #[must_use]
    pub fn bus_name(&self) -> Option<&str> {
        self.bus_name.as_deref()
    }
}

impl std::fmt::Display for CallerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.bus_name {
            Some(name) => write!(f, "pid:{} ({name})", self.pid),
            None => write!(f, "pid:{}", self.pid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_display_is_verbatim() {
        let id = SessionId::new("/org/freedesktop/ConsoleKit/Session1");
        assert_eq!(id.to_string(), "/org/freedesktop/ConsoleKit/Session1");
    }

    #[test]
    fn session_id_serializes_as_plain_string() {
        let id = SessionId::new("c1");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"c1\"");

        let parsed: SessionId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, id);
    }

    #[test]
    fn caller_id_without_bus_name() {
        let caller = CallerId::from_pid(7);
        assert_eq!(caller.bus_name(), None);
        assert_eq!(caller.to_string(), "pid:7");
    }

    #[test]
    fn caller_id_bus_name_is_optional_in_json() {
        let parsed: CallerId = serde_json::from_str(r#"{"pid": 99}"#).expect("deserialize");
        assert_eq!(parsed, CallerId::from_pid(99));

        let json = serde_json::to_string(&CallerId::from_pid(99)).expect("serialize");
        assert!(!json.contains("bus_name"), "got: {json}");
    }

    #[test]
    fn caller_id_equality_includes_bus_name() {
        let a = CallerId::from_pid(5).with_bus_name(":1.1");
        let b = CallerId::from_pid(5);
        assert_ne!(a, b);
        assert_eq!(a, CallerId::from_pid(5).with_bus_name(":1.1"));
    }
}
