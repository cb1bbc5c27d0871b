//! Credentials passed explicitly into the loader and mutation flow.

use crate::error::ScheduleError;

/// The signed-in user's bearer token, if any.
///
/// The web front end fills this from browser storage, the CLI from its
/// config file; library code never reads ambient storage itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self::new(Some(token.into()))
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token, or [`ScheduleError::MissingCredentials`].
    pub fn bearer(&self) -> Result<&str, ScheduleError> {
        self.token.as_deref().ok_or(ScheduleError::MissingCredentials)
    }
}
