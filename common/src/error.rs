//! Error type for every call made against the schedule backend.

use thiserror::Error;

/// Failure of a schedule operation.
///
/// All variants are caught at the operation boundary and turned into a
/// user-facing notice via [`ScheduleError::user_message`]; none of them
/// clear previously loaded data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// No bearer token available; the request was never sent.
    #[error("authentication missing – please sign in again")]
    MissingCredentials,

    /// The role in use lacks the capability for this mutation.
    #[error("not permitted: {0}")]
    Forbidden(&'static str),

    /// Network failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx status, or a 2xx envelope with `success: false`.
    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// The response body did not match the expected shape.
    #[error("cannot decode response: {0}")]
    Decode(String),
}

impl ScheduleError {
    /// Text for the notification banner.
    ///
    /// The collaborator's own message wins when it sent one; otherwise the
    /// caller's static fallback is used.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ScheduleError::MissingCredentials | ScheduleError::Forbidden(_) => self.to_string(),
            ScheduleError::Api {
                message: Some(m), ..
            } if !m.trim().is_empty() => m.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ScheduleError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ScheduleError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ScheduleError::Api {
                status: status.as_u16(),
                message: None,
            }
        } else {
            ScheduleError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_payload() {
        let e = ScheduleError::Api {
            status: 403,
            message: Some("Token expired".into()),
        };
        assert_eq!(e.user_message("Failed to load schedule"), "Token expired");
    }

    #[test]
    fn test_user_message_fallback() {
        let e = ScheduleError::Transport("connection refused".into());
        assert_eq!(e.user_message("Failed to load schedule"), "Failed to load schedule");

        let blank = ScheduleError::Api {
            status: 500,
            message: Some("  ".into()),
        };
        assert_eq!(blank.user_message("Failed"), "Failed");
    }

    #[test]
    fn test_missing_credentials_message() {
        let msg = ScheduleError::MissingCredentials.user_message("ignored");
        assert!(msg.contains("authentication missing"));
    }
}
