//! Start-tag event model.

/// A recognized start tag with its complete attribute set.
///
/// Determinism contract:
/// - Attributes are stored in encounter order with their original case
///   preserved; lookups fold case and return the first match, so duplicate
///   attributes behave first-wins.
/// - The scanner does not sort attributes and does not use hash-based storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attributes: Vec<(String, Option<String>)>,
}

impl StartTag {
    /// Case-insensitive tag name comparison.
    pub fn name_is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Case-insensitive attribute lookup, first match wins.
    ///
    /// A valueless attribute (`<link href>`) resolves to `None`, same as an
    /// absent one; callers that need a reference always need a value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.as_deref())
    }
}

/// Sink for start-tag events, invoked synchronously during
/// [`TagScanner::feed`](crate::TagScanner::feed) in document order.
///
/// Only the start-tag hook exists: end tags, text, comments, and doctypes
/// are never surfaced.
pub trait StartTagSink {
    fn on_start_tag(&mut self, tag: &StartTag);
}
