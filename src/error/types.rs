//! Error types and definitions for deadwood
//!
//! This module provides the error handling system for the deadwood application,
//! including error types, severity classification and the crate-wide result alias.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for deadwood operations
#[derive(Debug, Error)]
pub enum DeadwoodError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Per-file read failures
    #[error("Error reading {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Per-file parse failures (both grammar attempts raised a syntax error)
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The project manifest does not exist
    #[error("package.json not found at {path}")]
    ManifestMissing { path: PathBuf },

    /// The project manifest exists but is not usable
    #[error("Invalid package.json in {path}: {message}")]
    ManifestInvalid { path: PathBuf, message: String },

    /// JSON parsing errors with file context
    #[error("JSON parsing error in {file}: {source}")]
    JsonParse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// A source file or the manifest could not be rewritten during fixing
    #[error("Could not edit {path}: {message}")]
    Mutation { path: PathBuf, message: String },

    /// The post-fix verification step could not be carried out
    #[error("Verification failed: {message}")]
    Verification { message: String },
}

impl DeadwoodError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - operation can continue
            DeadwoodError::FileRead { .. } => ErrorSeverity::Warning,
            DeadwoodError::Parse { .. } => ErrorSeverity::Warning,
            DeadwoodError::Mutation { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            DeadwoodError::Config { .. } => ErrorSeverity::Critical,
            DeadwoodError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            DeadwoodError::ConfigRead { .. } => ErrorSeverity::Critical,
            DeadwoodError::ConfigParse { .. } => ErrorSeverity::Critical,
            DeadwoodError::InvalidPath { .. } => ErrorSeverity::Critical,
            DeadwoodError::ManifestMissing { .. } => ErrorSeverity::Critical,
            DeadwoodError::StdoutWrite { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            DeadwoodError::FileRead { path, source, .. } => {
                format!("Cannot read '{}': {}. The file is excluded from analysis.", path.display(), source)
            }
            DeadwoodError::Parse { path, message } => {
                format!("Could not parse '{}': {}. The file is excluded from analysis.", path.display(), message)
            }
            DeadwoodError::ManifestMissing { path } => {
                format!("No package.json found at '{}'. Dependency analysis requires a project manifest.", path.display())
            }
            DeadwoodError::JsonParse { file, source } => {
                format!("Invalid JSON in '{}': {}. Please check the file format.", file.display(), source)
            }
            DeadwoodError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide a valid directory path.", path.display())
            }
            DeadwoodError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create a config file or use command line options.", path.display())
            }
            DeadwoodError::Mutation { path, message } => {
                format!("Could not edit '{}': {}. Other files are unaffected.", path.display(), message)
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        DeadwoodError::Io { source }
    }

    /// Create a per-file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeadwoodError::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a per-file parse error
    pub fn parse_failure(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DeadwoodError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a JSON parse error with file context
    pub fn json_parse_error(file: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        DeadwoodError::JsonParse {
            file: file.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        DeadwoodError::Config {
            message: message.into(),
        }
    }

    /// Create a mutation error
    pub fn mutation(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DeadwoodError::Mutation {
            path: path.into(),
            message: message.into(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for DeadwoodError {
    fn from(err: std::io::Error) -> Self {
        DeadwoodError::io_error(err)
    }
}

impl From<toml::de::Error> for DeadwoodError {
    fn from(err: toml::de::Error) -> Self {
        DeadwoodError::Config {
            message: err.to_string(),
        }
    }
}

impl From<glob::PatternError> for DeadwoodError {
    fn from(err: glob::PatternError) -> Self {
        DeadwoodError::GlobPattern { source: err }
    }
}

impl From<csv::Error> for DeadwoodError {
    fn from(err: csv::Error) -> Self {
        DeadwoodError::Csv { source: err }
    }
}

impl From<serde_json::Error> for DeadwoodError {
    fn from(err: serde_json::Error) -> Self {
        DeadwoodError::JsonSerialize { source: err }
    }
}

/// Result type alias for deadwood operations
pub type Result<T> = std::result::Result<T, DeadwoodError>;
