//! Library store and query API
//!
//! Owns the normalized library tree after a successful load and answers
//! all track, playlist and metadata queries against it.

use crate::error::LibraryError;
use crate::model::{Playlist, Track};
use crate::xml;
use plist::{Dictionary, Value};
use std::path::Path;

/// An iTunes/Music library, loaded once and queried many times
///
/// Starts empty; every query fails with [`LibraryError::NotReady`] until
/// [`open`](Self::open) succeeds. Reopening replaces the whole tree; a
/// failed reopen leaves the previous tree in place. Queries borrow the
/// store immutably, so a caller sharing it across threads behind a lock
/// gets snapshot reads and serialized reloads from the borrow rules.
#[derive(Debug)]
pub struct ItunesLibrary {
    data: Option<Value>,
}

impl ItunesLibrary {
    /// Create a store with no library loaded
    pub fn new() -> Self {
        Self { data: None }
    }

    /// Load an iTunes library XML export
    ///
    /// Validates the path before any I/O, then reads the file, strips
    /// stray control whitespace, decodes the property list and
    /// normalizes every key. On success the store becomes ready and all
    /// queries answer against the new tree.
    ///
    /// # Errors
    /// [`LibraryError::InvalidPath`] for a missing or directory path,
    /// [`LibraryError::Io`] when the read fails,
    /// [`LibraryError::Decode`] when the contents are not a property list.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LibraryError> {
        let root = xml::load_library(path.as_ref())?;

        log::info!(
            "Loaded iTunes library: {} tracks, {} playlists",
            root.as_dictionary()
                .and_then(|d| d.get("tracks"))
                .and_then(Value::as_dictionary)
                .map_or(0, Dictionary::len),
            root.as_dictionary()
                .and_then(|d| d.get("playlists"))
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
        );

        self.data = Some(root);
        Ok(())
    }

    /// Whether a library has been loaded successfully
    pub fn is_ready(&self) -> bool {
        self.data.is_some()
    }

    /// The whole normalized library tree
    pub fn raw_data(&self) -> Result<&Value, LibraryError> {
        self.data.as_ref().ok_or(LibraryError::NotReady)
    }

    /// Look up a single track by its library id
    pub fn track_by_id(&self, id: u64) -> Result<Track, LibraryError> {
        let raw = self
            .tracks_dict()?
            .and_then(|tracks| tracks.get(id.to_string().as_str()))
            .ok_or(LibraryError::TrackNotFound(id))?;
        Ok(Track::project(Some(raw)))
    }

    /// All tracks in the library, ordered by track id
    pub fn tracks(&self) -> Result<Vec<Track>, LibraryError> {
        let Some(tracks) = self.tracks_dict()? else {
            return Ok(Vec::new());
        };

        // Dictionary order is an accident of the export; numeric id order
        // keeps the output deterministic.
        let mut keyed: Vec<(&String, &Value)> = tracks.iter().collect();
        keyed.sort_by_key(|(key, _)| key.parse::<u64>().unwrap_or(u64::MAX));

        Ok(keyed
            .into_iter()
            .map(|(_, raw)| Track::project(Some(raw)))
            .collect())
    }

    /// Look up a playlist by its library id
    ///
    /// Scans the playlists in export order and returns the first match.
    pub fn playlist_by_id(&self, id: u64) -> Result<Playlist, LibraryError> {
        let raw = self
            .playlists_array()?
            .unwrap_or(&[])
            .iter()
            .find(|entry| playlist_entry_id(entry) == Some(id))
            .ok_or(LibraryError::PlaylistNotFound(id))?;
        Ok(Playlist::project(Some(raw)))
    }

    /// All playlists, preserving export order
    pub fn playlists(&self) -> Result<Vec<Playlist>, LibraryError> {
        Ok(self
            .playlists_array()?
            .unwrap_or(&[])
            .iter()
            .map(|entry| Playlist::project(Some(entry)))
            .collect())
    }

    /// Resolve a playlist's item references into full tracks, in order
    ///
    /// # Errors
    /// [`LibraryError::MissingTrackId`] when an item carries no track id,
    /// [`LibraryError::TrackNotFound`] when an id does not resolve.
    pub fn playlist_tracks(&self, playlist: &Playlist) -> Result<Vec<Track>, LibraryError> {
        playlist
            .items()
            .iter()
            .map(|item| {
                let id = item
                    .as_dictionary()
                    .and_then(|d| d.get("track_id"))
                    .and_then(Value::as_unsigned_integer)
                    .ok_or(LibraryError::MissingTrackId)?;
                self.track_by_id(id)
            })
            .collect()
    }

    /// `Major Version` root field
    pub fn major_version(&self) -> Result<Option<&Value>, LibraryError> {
        self.root_field("major_version")
    }

    /// `Minor Version` root field
    pub fn minor_version(&self) -> Result<Option<&Value>, LibraryError> {
        self.root_field("minor_version")
    }

    /// `Application Version` root field
    pub fn application_version(&self) -> Result<Option<&Value>, LibraryError> {
        self.root_field("application_version")
    }

    /// `Date` root field (export timestamp)
    pub fn date(&self) -> Result<Option<&Value>, LibraryError> {
        self.root_field("date")
    }

    /// `Features` root field
    pub fn features(&self) -> Result<Option<&Value>, LibraryError> {
        self.root_field("features")
    }

    /// `Show Content Ratings` root field
    pub fn show_content_ratings(&self) -> Result<Option<&Value>, LibraryError> {
        self.root_field("show_content_ratings")
    }

    /// `Library Persistent ID` root field
    pub fn library_persistent_id(&self) -> Result<Option<&Value>, LibraryError> {
        self.root_field("library_persistent_id")
    }

    /// `Music Folder` root field
    pub fn music_folder(&self) -> Result<Option<&Value>, LibraryError> {
        self.root_field("music_folder")
    }

    fn root_field(&self, name: &str) -> Result<Option<&Value>, LibraryError> {
        let data = self.data.as_ref().ok_or(LibraryError::NotReady)?;
        Ok(data.as_dictionary().and_then(|root| root.get(name)))
    }

    fn tracks_dict(&self) -> Result<Option<&Dictionary>, LibraryError> {
        Ok(self.root_field("tracks")?.and_then(Value::as_dictionary))
    }

    fn playlists_array(&self) -> Result<Option<&[Value]>, LibraryError> {
        Ok(self
            .root_field("playlists")?
            .and_then(Value::as_array)
            .map(Vec::as_slice))
    }
}

impl Default for ItunesLibrary {
    fn default() -> Self {
        Self::new()
    }
}

fn playlist_entry_id(entry: &Value) -> Option<u64> {
    entry
        .as_dictionary()
        .and_then(|d| d.get("playlist_id"))
        .and_then(Value::as_unsigned_integer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Value {
        Value::Integer(n.into())
    }

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    fn track(id: i64, name: &str) -> Value {
        let mut d = Dictionary::new();
        d.insert("track_id".to_string(), int(id));
        d.insert("name".to_string(), s(name));
        Value::Dictionary(d)
    }

    fn item(track_id: i64) -> Value {
        let mut d = Dictionary::new();
        d.insert("track_id".to_string(), int(track_id));
        Value::Dictionary(d)
    }

    fn playlist(id: i64, name: &str, items: Vec<Value>) -> Value {
        let mut d = Dictionary::new();
        d.insert("playlist_id".to_string(), int(id));
        d.insert("name".to_string(), s(name));
        if !items.is_empty() {
            d.insert("playlist_items".to_string(), Value::Array(items));
        }
        Value::Dictionary(d)
    }

    /// Already-normalized tree with two tracks and two playlists
    fn loaded_library() -> ItunesLibrary {
        let mut tracks = Dictionary::new();
        tracks.insert("403".to_string(), track(403, "B"));
        tracks.insert("401".to_string(), track(401, "A"));

        let mut root = Dictionary::new();
        root.insert("major_version".to_string(), int(1));
        root.insert("tracks".to_string(), Value::Dictionary(tracks));
        root.insert(
            "playlists".to_string(),
            Value::Array(vec![
                playlist(10, "P", vec![item(401), item(403)]),
                playlist(11, "Empty", vec![]),
            ]),
        );

        ItunesLibrary {
            data: Some(Value::Dictionary(root)),
        }
    }

    #[test]
    fn test_queries_fail_before_load() {
        let lib = ItunesLibrary::new();
        assert!(!lib.is_ready());

        assert!(matches!(lib.raw_data(), Err(LibraryError::NotReady)));
        assert!(matches!(lib.track_by_id(401), Err(LibraryError::NotReady)));
        assert!(matches!(lib.tracks(), Err(LibraryError::NotReady)));
        assert!(matches!(lib.playlist_by_id(10), Err(LibraryError::NotReady)));
        assert!(matches!(lib.playlists(), Err(LibraryError::NotReady)));
        assert!(matches!(lib.major_version(), Err(LibraryError::NotReady)));
        assert!(matches!(lib.music_folder(), Err(LibraryError::NotReady)));
    }

    #[test]
    fn test_track_by_id_projects_matching_record() {
        let lib = loaded_library();

        let found = lib.track_by_id(401).unwrap();
        assert_eq!(found.name, Some(s("A")));
        assert_eq!(found, Track::project(Some(&track(401, "A"))));

        assert!(matches!(
            lib.track_by_id(99),
            Err(LibraryError::TrackNotFound(99))
        ));
    }

    #[test]
    fn test_tracks_sorted_by_numeric_id() {
        let lib = loaded_library();
        let tracks = lib.tracks().unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id(), Some(401));
        assert_eq!(tracks[1].id(), Some(403));
    }

    #[test]
    fn test_playlist_by_id_returns_first_match() {
        let lib = loaded_library();

        let found = lib.playlist_by_id(10).unwrap();
        assert_eq!(found.name, Some(s("P")));

        assert!(matches!(
            lib.playlist_by_id(99),
            Err(LibraryError::PlaylistNotFound(99))
        ));
    }

    #[test]
    fn test_playlists_preserve_export_order() {
        let lib = loaded_library();
        let playlists = lib.playlists().unwrap();

        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0].name, Some(s("P")));
        assert_eq!(playlists[1].name, Some(s("Empty")));
    }

    #[test]
    fn test_playlist_tracks_resolves_items_in_order() {
        let lib = loaded_library();
        let playlist = lib.playlist_by_id(10).unwrap();

        let resolved = lib.playlist_tracks(&playlist).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].name, Some(s("A")));
        assert_eq!(resolved[1].name, Some(s("B")));

        let empty = lib.playlist_by_id(11).unwrap();
        assert!(lib.playlist_tracks(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_playlist_tracks_fails_on_dangling_reference() {
        let lib = loaded_library();
        let dangling = Playlist::project(Some(&playlist(12, "D", vec![item(999)])));

        assert!(matches!(
            lib.playlist_tracks(&dangling),
            Err(LibraryError::TrackNotFound(999))
        ));
    }

    #[test]
    fn test_playlist_tracks_fails_on_item_without_track_id() {
        let lib = loaded_library();
        let no_id_item = Value::Dictionary(Dictionary::new());
        let broken = Playlist::project(Some(&playlist(13, "M", vec![no_id_item])));

        assert!(matches!(
            lib.playlist_tracks(&broken),
            Err(LibraryError::MissingTrackId)
        ));
    }

    #[test]
    fn test_metadata_getters_view_root_fields() {
        let lib = loaded_library();

        assert_eq!(lib.major_version().unwrap(), Some(&int(1)));
        // Fields the export omits read as absent, not as errors.
        assert_eq!(lib.minor_version().unwrap(), None);
        assert_eq!(lib.library_persistent_id().unwrap(), None);
    }

    #[test]
    fn test_missing_collections_read_as_empty() {
        let lib = ItunesLibrary {
            data: Some(Value::Dictionary(Dictionary::new())),
        };

        assert!(lib.tracks().unwrap().is_empty());
        assert!(lib.playlists().unwrap().is_empty());
        assert!(matches!(
            lib.track_by_id(1),
            Err(LibraryError::TrackNotFound(1))
        ));
        assert!(matches!(
            lib.playlist_by_id(1),
            Err(LibraryError::PlaylistNotFound(1))
        ));
    }
}
