// Error taxonomy for the record core. Validation and auth errors are
// recoverable (the UI re-prompts); persistence errors are fatal and bubble
// up to `main`.

use std::path::PathBuf;
use thiserror::Error;

/// A single form field failed validation. Carries the field name so the
/// driver can re-prompt for exactly that field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("This username is not in our records")]
    UnknownUser,

    #[error("This password is incorrect")]
    BadPassword,

    #[error("Password hashing failed: {reason}")]
    HashingFailed { reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("No account with username {username}")]
    Username { username: String },

    #[error("No account at index {index}")]
    Index { index: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Not permitted: {action} on account {target}")]
pub struct AccessDenied {
    pub action: String,
    pub target: usize,
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to read records file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Records file {path:?} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialise records")]
    Serialise {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write records file {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors produced by guarded record operations (`records` module).
#[derive(Error, Debug)]
pub enum RecordError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Denied(#[from] AccessDenied),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl RecordError {
    /// Persistence and prompt failures end the session; the rest are shown
    /// to the user and the menu carries on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RecordError::Persistence(_) | RecordError::Prompt(_))
    }
}

/// Failure of the signup operation as a whole.
#[derive(Error, Debug)]
pub enum SignUpError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}
