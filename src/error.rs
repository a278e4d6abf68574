// src/error.rs

//! Error types for recipe orchestration
//!
//! Each variant identifies the kind of stage that failed, so callers can tell
//! configuration problems apart from external build or install failures
//! without matching on message text.

use crate::recipe::CookState;
use std::fmt;
use thiserror::Error;

/// External build step that produced a [`Error::BuildError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    /// `meson setup`
    Configure,
    /// `meson compile`
    Compile,
}

impl BuildStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::Compile => "compile",
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while normalizing, generating, building or installing
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or incomplete settings/options
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Malformed recipe or profile
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Filesystem failure while generating files
    #[error("I/O error: {0}")]
    IoError(String),

    /// External configure or compile step failed
    #[error("{step} step failed: {message}")]
    BuildError { step: BuildStep, message: String },

    /// External install step failed
    #[error("Install step failed: {0}")]
    InstallError(String),

    /// A cook step was called out of order
    #[error("Cannot {action} in state {state}")]
    InvalidState {
        state: CookState,
        action: &'static str,
    },
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IoError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_names_step() {
        let err = Error::BuildError {
            step: BuildStep::Compile,
            message: "exit code 1".to_string(),
        };
        assert_eq!(err.to_string(), "compile step failed: exit code 1");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::IoError(ref m) if m.contains("denied")));
    }

    #[test]
    fn test_invalid_state_message() {
        let err = Error::InvalidState {
            state: CookState::Unconfigured,
            action: "install",
        };
        assert_eq!(err.to_string(), "Cannot install in state UNCONFIGURED");
    }
}
