//! Error types for the cbuffer-core library.
//!
//! Loading and writing are the only fallible steps. Encoding and emission
//! are total once a [`ByteSequence`](crate::ByteSequence) exists.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cbuffer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all cbuffer operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Input path does not resolve to a regular file
    #[error("there is no such file: '{path}'")]
    InputNotFound {
        /// The path that was requested
        path: PathBuf,
    },

    /// Array name is not usable as a C identifier
    #[error("invalid array name '{name}': {reason}")]
    InvalidArrayName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create output directory
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreate {
        /// Path to the directory that failed to create
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to a preview stream
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// Creates a new input-not-found error
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Creates a new invalid array name error
    pub fn invalid_array_name(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidArrayName {
            name: name.into(),
            reason,
        }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new directory creation error
    pub fn directory_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreate {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the input path did not name a regular file
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, Self::InputNotFound { .. })
    }
}
