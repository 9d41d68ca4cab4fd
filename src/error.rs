//! Crate-wide error type

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while loading or querying an iTunes library
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The given path is missing, unreadable, or a directory
    #[error("invalid library path: {path:?}")]
    InvalidPath { path: PathBuf },

    /// Reading the library file failed
    #[error("failed to read library file")]
    Io(#[from] std::io::Error),

    /// The file contents are not a well-formed property list
    #[error("failed to decode property list")]
    Decode(#[from] plist::Error),

    /// A query was made before a successful load
    #[error("no data ready (call open() first)")]
    NotReady,

    /// No track exists under the given id
    #[error("no track found for id {0}")]
    TrackNotFound(u64),

    /// No playlist exists under the given id
    #[error("no playlist found for id {0}")]
    PlaylistNotFound(u64),

    /// A playlist item carries no track id to resolve
    #[error("playlist item has no track id")]
    MissingTrackId,
}
