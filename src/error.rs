//! # Error Types
//!
//! The optimizer core is total over finite reals, so the only failure class it
//! knows is a bad configuration, reported before the first frame is produced.
//! File-backed configuration adds I/O and parse errors on top.

/// Errors raised while configuring or initializing a run.
#[derive(thiserror::Error, Debug)]
pub enum DescentError {
    #[error("Invalid configuration: `{field}` {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: String,
    },
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error (JSON): {0}")]
    Json(#[from] serde_json::Error),
}

impl DescentError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DescentError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }

    /// True for the configuration-misuse kind.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, DescentError::InvalidConfiguration { .. })
    }
}
