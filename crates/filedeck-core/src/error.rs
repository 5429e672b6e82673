//! Error types for filesystem operations and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for filesystem operations.
pub type FsResult<T> = Result<T, FsError>;

/// Errors that can occur while operating on the filesystem.
///
/// The display string of every variant is the message shown to the user;
/// front ends only look at the variant to pick a status code or dialog.
#[derive(Debug, Error)]
pub enum FsError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Target path is already taken.
    #[error("An item with that name already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// Path exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A name failed validation.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Copy or move of a directory into its own subtree.
    #[error("Cannot copy or move {path} into itself")]
    IntoItself { path: PathBuf },

    /// The platform launcher could not open the path.
    #[error("Cannot open {path}: {message}")]
    Launch { path: PathBuf, message: String },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an invalid name error.
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure was caused by the caller's input rather than the
    /// state of the filesystem.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::AlreadyExists { .. }
                | Self::InvalidName { .. }
                | Self::IntoItself { .. }
                | Self::NotADirectory { .. }
        )
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::Config`].
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}
