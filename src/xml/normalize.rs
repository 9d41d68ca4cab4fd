//! Key canonicalization for the decoded library tree
//!
//! The export names every field with spaced, title-case keys
//! ("Track ID", "Playlist Items"). The rest of the crate queries against
//! lowercase snake_case, so the whole tree is rewritten once at load time.

use plist::{Dictionary, Value};

/// Rewrite every dictionary key in `value` to canonical form
///
/// Keys are lowercased and each whitespace character becomes an
/// underscore. Children are normalized before their parent's keys are
/// rewritten; every dictionary is drained and rebuilt, so rewriting never
/// skips or duplicates entries mid-iteration. When two keys collide after
/// rewriting, the later entry wins. Running this twice is a no-op.
pub fn normalize_keys(value: &mut Value) {
    match value {
        Value::Dictionary(dict) => {
            let entries = std::mem::replace(dict, Dictionary::new());
            for (key, mut child) in entries {
                normalize_keys(&mut child);
                dict.insert(normalize_key(&key), child);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                normalize_keys(item);
            }
        }
        _ => {}
    }
}

fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
