//! Error types for packaging helpers

use std::fmt;
use std::path::PathBuf;

/// A shell command that could not be run or exited unsuccessfully
#[derive(Debug)]
pub struct CommandError {
    /// Command text as passed to the shell
    pub command: String,
    /// Exit code, `None` if the command never started or was killed by a signal
    pub code: Option<i32>,
    /// Captured stdout followed by stderr, or the spawn error
    pub output: String,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(
                f,
                "Command '{}' failed with status {code}: {}",
                self.command, self.output
            ),
            None => write!(f, "Command '{}' failed: {}", self.command, self.output),
        }
    }
}

impl std::error::Error for CommandError {}

/// Expected files that were missing or empty after packaging
#[derive(Debug, Default)]
pub struct ValidationError {
    /// Paths that did not exist, in input order
    pub missing: Vec<PathBuf>,
    /// Paths that existed with a size of zero bytes
    pub empty: Vec<PathBuf>,
}

impl ValidationError {
    /// True when nothing was accumulated
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.empty.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The following files were missing:")?;
        for path in &self.missing {
            write!(f, "\n- {}", path.display())?;
        }
        write!(f, "\n\nThe following files were empty:")?;
        for path in &self.empty {
            write!(f, "\n- {}", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Main error type for packaging helpers
#[derive(Debug)]
pub enum PackagingError {
    /// Shell command failed
    CommandFailed(CommandError),

    /// Output files missing or empty
    ValidationFailed(ValidationError),

    /// IO error
    IoError(std::io::Error),
}

impl fmt::Display for PackagingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackagingError::CommandFailed(err) => write!(f, "{err}"),
            PackagingError::ValidationFailed(err) => write!(f, "{err}"),
            PackagingError::IoError(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for PackagingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PackagingError::CommandFailed(err) => Some(err),
            PackagingError::ValidationFailed(err) => Some(err),
            PackagingError::IoError(err) => Some(err),
        }
    }
}

impl From<CommandError> for PackagingError {
    fn from(err: CommandError) -> Self {
        PackagingError::CommandFailed(err)
    }
}

impl From<ValidationError> for PackagingError {
    fn from(err: ValidationError) -> Self {
        PackagingError::ValidationFailed(err)
    }
}

impl From<std::io::Error> for PackagingError {
    fn from(err: std::io::Error) -> Self {
        PackagingError::IoError(err)
    }
}

/// Result type for packaging helpers
pub type Result<T> = std::result::Result<T, PackagingError>;
