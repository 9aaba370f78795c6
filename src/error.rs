//! Error types for the task store and its storage backends.
//!
//! Nothing here is fatal to a session: read failures are recovered during
//! store initialisation and write failures are reported back as warnings.

use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_codes {
    pub const IO_FAILURE: i32 = 1;
    pub const USER_ERROR: i32 = 2;
}

/// Failures raised by a [`crate::storage::KeyValueStore`].
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("record '{key}' is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("record '{key}' is not valid UTF-8: {source}")]
    Encoding {
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage quota exceeded writing '{key}' ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    #[error("'{key}' could not be read or backed up; refusing to overwrite it")]
    Protected { key: String },

    #[error("failed to serialise tasks: {0}")]
    Serialise(#[from] serde_json::Error),
}

/// Errors surfaced to the CLI: invalid input, or a data directory or
/// terminal that could not be used.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Exit code the CLI should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) => exit_codes::USER_ERROR,
            Error::Io(_) => exit_codes::IO_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
