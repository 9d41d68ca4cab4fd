use plist::Value;
use serde::{Deserialize, Serialize};

/// A named, ordered collection of track references
///
/// Projected from a raw playlist record with the same conventions as
/// [`Track`](crate::model::Track): present fields mirror the raw values,
/// absent ones are `None`. Smart playlists carry their rule blobs in
/// `smart_info`/`smart_criteria` but are otherwise shaped like static
/// ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Set on the library-wide "Library" playlist
    pub master: Option<Value>,
    /// Library-unique numeric id
    pub playlist_id: Option<Value>,
    pub playlist_persistent_id: Option<Value>,
    pub all_items: Option<Value>,
    /// Present (false) on playlists hidden in the source application
    pub visible: Option<Value>,
    /// Display name
    pub name: Option<Value>,
    /// Ordered array of `{track_id}` reference dictionaries
    pub playlist_items: Option<Value>,
    pub distinguished_kind: Option<Value>,
    pub music: Option<Value>,
    /// Opaque smart-playlist rule header
    pub smart_info: Option<Value>,
    /// Opaque smart-playlist rule data
    pub smart_criteria: Option<Value>,
    pub movies: Option<Value>,
    pub tv_shows: Option<Value>,
    pub podcasts: Option<Value>,
    pub itunesu: Option<Value>,
    pub audiobooks: Option<Value>,
    pub books: Option<Value>,
}

impl Playlist {
    /// Every field a projected playlist carries
    pub const PROPERTIES: [&'static str; 17] = [
        "master",
        "playlist_id",
        "playlist_persistent_id",
        "all_items",
        "visible",
        "name",
        "playlist_items",
        "distinguished_kind",
        "music",
        "smart_info",
        "smart_criteria",
        "movies",
        "tv_shows",
        "podcasts",
        "itunesu",
        "audiobooks",
        "books",
    ];

    /// Project a raw playlist record into the fixed shape
    ///
    /// A missing or non-dictionary `raw` yields the empty playlist with
    /// all fields absent.
    pub fn project(raw: Option<&Value>) -> Self {
        let dict = raw.and_then(Value::as_dictionary);
        let field = |name: &str| dict.and_then(|d| d.get(name)).cloned();

        Self {
            master: field("master"),
            playlist_id: field("playlist_id"),
            playlist_persistent_id: field("playlist_persistent_id"),
            all_items: field("all_items"),
            visible: field("visible"),
            name: field("name"),
            playlist_items: field("playlist_items"),
            distinguished_kind: field("distinguished_kind"),
            music: field("music"),
            smart_info: field("smart_info"),
            smart_criteria: field("smart_criteria"),
            movies: field("movies"),
            tv_shows: field("tv_shows"),
            podcasts: field("podcasts"),
            itunesu: field("itunesu"),
            audiobooks: field("audiobooks"),
            books: field("books"),
        }
    }

    /// Numeric playlist id, when present and integral
    pub fn id(&self) -> Option<u64> {
        self.playlist_id.as_ref().and_then(Value::as_unsigned_integer)
    }

    /// The raw, unresolved item references, in playlist order
    ///
    /// Empty when the playlist has no items. Resolve the references into
    /// full tracks through the library store.
    pub fn items(&self) -> &[Value] {
        self.playlist_items
            .as_ref()
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
