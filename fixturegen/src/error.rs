/// Error types for fixture generation
///
/// Every filesystem failure is fatal to the run; the variants only exist so
/// the caller can tell which step and which path failed.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to rename {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid case: {0}")]
    InvalidCase(String),

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),
}

pub type Result<T> = std::result::Result<T, FixtureError>;
