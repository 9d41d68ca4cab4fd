use plist::Value;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One media item's metadata, projected from its raw library record
///
/// Every field mirrors the raw value stored under the matching key,
/// `None` where the export omits it. Values stay as decoded plist values;
/// nothing is coerced or validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Library-unique numeric id, also the key into the tracks dictionary
    pub track_id: Option<Value>,
    /// File size in bytes
    pub size: Option<Value>,
    /// Duration in milliseconds
    pub total_time: Option<Value>,
    pub date_modified: Option<Value>,
    pub date_added: Option<Value>,
    /// Encoded bit rate in kbit/s
    pub bit_rate: Option<Value>,
    /// Sample rate in Hz
    pub sample_rate: Option<Value>,
    /// Hex id stable across library rebuilds
    pub persistent_id: Option<Value>,
    /// "File", "Remote" or "URL"
    pub track_type: Option<Value>,
    pub file_folder_count: Option<Value>,
    pub library_folder_count: Option<Value>,
    /// Track title
    pub name: Option<Value>,
    pub artist: Option<Value>,
    pub album: Option<Value>,
    pub genre: Option<Value>,
    /// Codec description ("MPEG audio file", ...)
    pub kind: Option<Value>,
    /// file:// URI of the audio file
    pub location: Option<Value>,
}

impl Track {
    /// Every field a projected track carries
    pub const PROPERTIES: [&'static str; 17] = [
        "track_id",
        "size",
        "total_time",
        "date_modified",
        "date_added",
        "bit_rate",
        "sample_rate",
        "persistent_id",
        "track_type",
        "file_folder_count",
        "library_folder_count",
        "name",
        "artist",
        "album",
        "genre",
        "kind",
        "location",
    ];

    /// Project a raw track record into the fixed shape
    ///
    /// A missing or non-dictionary `raw` yields the empty track with all
    /// fields absent.
    pub fn project(raw: Option<&Value>) -> Self {
        let dict = raw.and_then(Value::as_dictionary);
        let field = |name: &str| dict.and_then(|d| d.get(name)).cloned();

        Self {
            track_id: field("track_id"),
            size: field("size"),
            total_time: field("total_time"),
            date_modified: field("date_modified"),
            date_added: field("date_added"),
            bit_rate: field("bit_rate"),
            sample_rate: field("sample_rate"),
            persistent_id: field("persistent_id"),
            track_type: field("track_type"),
            file_folder_count: field("file_folder_count"),
            library_folder_count: field("library_folder_count"),
            name: field("name"),
            artist: field("artist"),
            album: field("album"),
            genre: field("genre"),
            kind: field("kind"),
            location: field("location"),
        }
    }

    /// Numeric track id, when present and integral
    pub fn id(&self) -> Option<u64> {
        self.track_id.as_ref().and_then(Value::as_unsigned_integer)
    }

    /// Decode the `location` file:// URI into a filesystem path
    pub fn file_path(&self) -> Option<PathBuf> {
        let uri = self.location.as_ref().and_then(Value::as_string)?;
        let path = uri
            .strip_prefix("file://localhost")
            .or_else(|| uri.strip_prefix("file://"))?;
        let decoded = urlencoding::decode(path).ok()?;
        Some(PathBuf::from(decoded.into_owned()))
    }
}
