//! Unified error handling for udev-resource
//!
//! This crate provides the single error type used by the parser, the report
//! sinks and the command driver. It uses thiserror for Display and Error impls.

use std::io;

/// Result type alias using UdevResourceError
pub type Result<T> = std::result::Result<T, UdevResourceError>;

/// Exit status used when a failure carries no status of its own
pub const GENERIC_FAILURE: i32 = 1;

/// Unified error type for all udev-resource operations
#[derive(thiserror::Error, Debug)]
pub enum UdevResourceError {
    // ============================================================================
    // Command Errors
    // ============================================================================
    #[error("Empty command line")]
    EmptyCommand,

    #[error("Unable to tokenize command line: {command}")]
    InvalidCommand {
        command: String,
    },

    #[error("Failed to execute {command}: {source}")]
    Spawn {
        command: String,
        source: io::Error,
    },

    #[error("Command '{command}' returned non-zero exit status {}{}", display_code(.code), display_stderr(.stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn display_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "(terminated by signal)".to_string())
}

fn display_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl UdevResourceError {
    /// Create a spawn error for a command line
    pub fn spawn(command: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Create a command failure error
    pub fn command_failed(command: impl Into<String>, code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Process exit status this error maps to.
    ///
    /// A gathering command that exited with its own non-zero status hands
    /// that status through; everything else exits with `GENERIC_FAILURE`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code: Some(code), .. } if *code != 0 => *code,
            _ => GENERIC_FAILURE,
        }
    }

    /// Whether this error came from running one of the external commands
    pub fn is_command_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyCommand | Self::InvalidCommand { .. } | Self::Spawn { .. } | Self::CommandFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_keeps_exit_code() {
        let err = UdevResourceError::command_failed("udevadm info --export-db", Some(4), "");
        assert_eq!(err.exit_code(), 4);
        assert_eq!(
            err.to_string(),
            "Command 'udevadm info --export-db' returned non-zero exit status 4"
        );
    }

    #[test]
    fn test_signal_termination_maps_to_generic_failure() {
        let err = UdevResourceError::command_failed("lsblk", None, "killed\n");
        assert_eq!(err.exit_code(), GENERIC_FAILURE);
        assert!(err.to_string().ends_with("(terminated by signal): killed"));
    }

    #[test]
    fn test_spawn_error_message() {
        let source = io::Error::new(io::ErrorKind::NotFound, "No such file or directory");
        let err = UdevResourceError::spawn("nonexistent-tool", source);
        assert_eq!(err.exit_code(), GENERIC_FAILURE);
        assert!(err.is_command_error());
        assert!(err.to_string().contains("nonexistent-tool"));
    }

    #[test]
    fn test_io_error_is_not_command_error() {
        let err: UdevResourceError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
        assert!(!err.is_command_error());
        assert_eq!(err.exit_code(), GENERIC_FAILURE);
    }
}
