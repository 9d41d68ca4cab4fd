//! Fixed-shape records projected from the raw library tree
//!
//! Tracks and playlists are not stored entities: each one is rebuilt on
//! access by projecting a raw record through a closed field list, so a
//! returned record always has the same shape and never carries extras.

mod playlist;
mod track;

pub use playlist::Playlist;
pub use track::Track;
