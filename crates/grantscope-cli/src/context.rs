//! Caller context resolution for `check` and `derive`.

use anyhow::{bail, Context as _, Result};
use clap::ValueEnum;
use grantscope_auth::{CallerSnapshot, SessionSnapshot};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A session property as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tristate {
    Yes,
    No,
    Unknown,
}

impl From<Tristate> for Option<bool> {
    fn from(value: Tristate) -> Self {
        match value {
            Tristate::Yes => Some(true),
            Tristate::No => Some(false),
            Tristate::Unknown => None,
        }
    }
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ContextArgs {
    /// JSON caller snapshot (also: GRANTSCOPE_CONTEXT)
    #[arg(long, env = "GRANTSCOPE_CONTEXT", value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Whether the caller's session is local
    #[arg(long, value_enum)]
    pub local: Option<Tristate>,

    /// Whether the caller's session is active
    #[arg(long, value_enum)]
    pub active: Option<Tristate>,

    /// The caller is not part of any session
    #[arg(long, conflicts_with_all = ["local", "active"])]
    pub no_session: bool,
}

impl ContextArgs {
    /// Builds the caller snapshot from arguments, then the context file,
    /// then the default.
    pub fn resolve(&self) -> Result<CallerSnapshot> {
        if self.no_session {
            debug!("caller context from arguments: no session");
            return Ok(CallerSnapshot::new());
        }

        if self.local.is_some() || self.active.is_some() {
            let session = SessionSnapshot {
                id: None,
                is_local: self.local.and_then(Into::into),
                is_active: self.active.and_then(Into::into),
            };
            debug!(?session, "caller context from arguments");
            return Ok(CallerSnapshot::new().in_session(session));
        }

        if let Some(path) = &self.context {
            let caller = load_context(path)?;
            debug!(path = %path.display(), ?caller, "caller context from file");
            return Ok(caller);
        }

        debug!("no caller context given, assuming a session with unknown properties");
        Ok(CallerSnapshot::new().in_session(SessionSnapshot::new()))
    }
}

fn load_context(path: &Path) -> Result<CallerSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read context file {}", path.display()))?;
    if raw.trim().is_empty() {
        bail!("context file {} is empty", path.display());
    }
    serde_json::from_str(&raw).with_context(|| format!("parse context file {}", path.display()))
}
