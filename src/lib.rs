//! iTunes library parser
//!
//! Parses an iTunes/Music "Library.xml" property-list export into an
//! in-memory, queryable representation of tracks and playlists. Keys are
//! canonicalized to snake_case on load, so queries work against a stable
//! schema regardless of the spaced, mixed-case names in the export.

pub mod error;
pub mod library;
pub mod model;
pub mod xml;

pub use error::LibraryError;
pub use library::ItunesLibrary;
pub use model::{Playlist, Track};
