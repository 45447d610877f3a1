use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish a clean run from a run that
/// finished with some missing images and from a run that aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Graph collected, all outputs written
    Success = 0,
    /// Run completed but one or more images could not be rendered
    PartialFailure = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Transport failure, unusable configuration or unrecoverable filesystem error
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PartialFailure => write!(f, "Partial Failure (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Fatal errors of a bundle graph run.
///
/// Parse problems in scraped console output are deliberately absent:
/// those entries are skipped, never raised.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Failed to {operation}\nDetails: {details}\n\n💡 Hint: Check that the server is running and reachable from this machine")]
    Transport { operation: String, details: String },

    #[error("Authentication rejected by {url}\n\n💡 Hint: Verify the console username and password")]
    AuthenticationRejected { url: String },

    #[error("Failed to prepare output directory: {path}\nDetails: {details}\n\n💡 Hint: Please verify that you have write permissions for the parent directory")]
    OutputDirectory { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to render graph: {path}\nDetails: {details}\n\n💡 Hint: PNG output needs the Graphviz `dot` program on PATH (or use --format dot)")]
    RenderError { path: PathBuf, details: String },

    /// Validation error for domain values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid configuration: {message}\n\n💡 Hint: {hint}")]
    InvalidConfiguration { message: String, hint: String },
}

impl GraphError {
    pub fn transport(operation: impl Into<String>, details: impl fmt::Display) -> Self {
        GraphError::Transport {
            operation: operation.into(),
            details: details.to_string(),
        }
    }

    /// Whether retrying the same request could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, GraphError::Transport { .. })
    }
}
