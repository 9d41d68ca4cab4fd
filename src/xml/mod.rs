//! iTunes library XML parsing
//!
//! Loads the "Library.xml" property-list export and canonicalizes its
//! keys into the snake_case schema the rest of the crate queries against.

mod normalize;

pub use normalize::normalize_keys;

use crate::error::LibraryError;
use plist::Value;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Read, decode and key-normalize an iTunes library export
///
/// # Arguments
/// * `path` - Path to the XML export (typically "iTunes Music Library.xml")
///
/// # Returns
/// The normalized property-list tree
pub fn load_library(path: &Path) -> Result<Value, LibraryError> {
    let is_file = fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false);
    if !is_file {
        return Err(LibraryError::InvalidPath {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path)?;

    // Exports occasionally carry stray control whitespace inside the
    // markup; strip it before handing the text to the decoder.
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, '\n' | '\t' | '\r'))
        .collect();

    let mut root = Value::from_reader_xml(Cursor::new(stripped.into_bytes()))?;
    normalize_keys(&mut root);

    log::debug!("Decoded library plist from {:?}", path);

    Ok(root)
}
