//! Percent-encoding for KV key paths.
//!
//! Keys are `/`-separated; each segment is encoded on its own so that the
//! separators survive while characters with URL meaning inside a segment do not.
//!
//! # Example
//!
//! ```
//! use profiler_client::endpoints::url_encoding::encode_key_path;
//!
//! assert_eq!(encode_key_path("profiler/my profile"), "profiler/my%20profile");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters that must be percent-encoded in a key path segment.
pub const KEY_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Encode every segment of a `/`-separated key.
pub fn encode_key_path(key: &str) -> String {
    key.split('/')
        .map(|segment| utf8_percent_encode(segment, KEY_SEGMENT_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("/")
}
