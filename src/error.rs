//! Library error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum BlogError {
    /// The content directory is missing or unreadable. This points at
    /// misconfiguration and is never masked.
    #[error("content directory {path:?} is unavailable: {source}")]
    ContentUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read post file {path:?}: {source}")]
    ReadPost {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to render page: {0}")]
    Template(#[from] tera::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BlogError>;
