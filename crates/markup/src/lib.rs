pub mod scanner;

mod token;

#[cfg(test)]
mod chunk_parity;
#[cfg(test)]
pub(crate) mod test_util;

use memchr::memchr2;

pub use crate::scanner::{ScanStats, TagScanner};
pub use crate::token::{StartTag, StartTagSink};

const HTML_MEDIA_TYPES: &[&[u8]] = &[b"text/html", b"application/xhtml"];

/// Returns true for content types that should be scanned for sub-resources.
///
/// Matches the HTML media types anywhere in the header value, so parameters
/// like `; charset=utf-8` and surrounding junk are tolerated.
pub fn is_html(content_type: Option<&str>) -> bool {
    let Some(value) = content_type else {
        return false;
    };
    HTML_MEDIA_TYPES
        .iter()
        .any(|media_type| contains_media_type(value.as_bytes(), media_type))
}

/// Case-insensitive substring search for a media type.
///
/// `needle` must start with an ASCII letter; candidate positions come from
/// scanning for either case of that letter.
fn contains_media_type(hay: &[u8], needle: &[u8]) -> bool {
    debug_assert!(needle.first().is_some_and(u8::is_ascii_alphabetic));
    let n = needle.len();
    let (lo, up) = (
        needle[0].to_ascii_lowercase(),
        needle[0].to_ascii_uppercase(),
    );
    let mut i = 0;
    while i + n <= hay.len() {
        let Some(rel) = memchr2(lo, up, &hay[i..]) else {
            return false;
        };
        let pos = i + rel;
        if pos + n <= hay.len() && hay[pos..pos + n].eq_ignore_ascii_case(needle) {
            return true;
        }
        i = pos + 1;
    }
    false
}
