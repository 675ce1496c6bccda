//! Chunked start-tag scanner.
//!
//! A push-style tokenizer over raw markup bytes: the hosting connection loop
//! feeds body fragments as they arrive and complete start tags are dispatched
//! to a [`StartTagSink`] in document order. The scanner is an explicit state
//! machine and is resumable at arbitrary chunk boundaries.
//!
//! Invariants:
//! - Chunk-equivalence: feeding a document in one chunk or many chunks yields
//!   the same start-tag sequence for the same byte input.
//! - Recovery: malformed markup (stray `<`, unterminated tags, unbalanced
//!   quotes) never aborts the scan; the offending region is treated as
//!   literal text and tag recognition resumes afterwards.
//! - Only start tags are surfaced. Text, end tags, comments, doctypes, and
//!   raw `<script>`/`<style>` content are skipped without buffering them.

use memchr::memchr;

use crate::token::{StartTag, StartTagSink};
use states::ScanState;

mod states;

const SCRIPT_CLOSE_TAG: &[u8] = b"</script";
const STYLE_CLOSE_TAG: &[u8] = b"</style";

/// Minimal scanner instrumentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub bytes_fed: u64,
    pub tags_emitted: u64,
}

/// Resumable start-tag scanner. One instance per document body.
///
/// All cross-chunk state lives here: the lexical mode plus the partially
/// accumulated tag name, attribute name/value, pending attribute list, and
/// match progress for comment/raw-text terminators.
#[derive(Debug)]
pub struct TagScanner {
    state: ScanState,
    tag_name: Vec<u8>,
    attr_name: Vec<u8>,
    attr_value: Vec<u8>,
    attrs: Vec<(String, Option<String>)>,
    self_closing: bool,
    raw_close: &'static [u8],
    raw_matched: usize,
    dashes: u8,
    stats: ScanStats,
}

impl TagScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::Data,
            tag_name: Vec::new(),
            attr_name: Vec::new(),
            attr_value: Vec::new(),
            attrs: Vec::new(),
            self_closing: false,
            raw_close: SCRIPT_CLOSE_TAG,
            raw_matched: 0,
            dashes: 0,
            stats: ScanStats::default(),
        }
    }

    /// Consume the next body fragment, continuing from the lexical state the
    /// previous call left behind. `bytes` may be empty.
    ///
    /// Every start tag completed within this fragment is dispatched to `sink`
    /// before `feed` returns; a tag straddling the fragment boundary is
    /// dispatched by the later call that completes it. `is_final` flushes the
    /// session: genuinely incomplete trailing data is dropped, never an
    /// error, and the scanner resets to a clean state for reuse.
    ///
    /// Cost is bounded by `bytes.len()`; no I/O, no internal buffering of
    /// skipped regions.
    pub fn feed<S: StartTagSink>(&mut self, bytes: &[u8], is_final: bool, sink: &mut S) {
        self.stats.bytes_fed = self.stats.bytes_fed.saturating_add(bytes.len() as u64);
        let len = bytes.len();
        let mut i = 0usize;
        while i < len {
            let b = bytes[i];
            match self.state {
                ScanState::Data => match memchr(b'<', &bytes[i..]) {
                    Some(rel) => {
                        i += rel + 1;
                        self.transition(ScanState::TagOpen);
                    }
                    None => i = len,
                },
                ScanState::TagOpen => {
                    if b.is_ascii_alphabetic() {
                        self.begin_tag(b);
                        i += 1;
                    } else if b == b'<' {
                        // `<<img`: the first `<` was literal text.
                        i += 1;
                    } else if b == b'!' {
                        self.transition(ScanState::MarkupDeclOpen);
                        i += 1;
                    } else if b == b'/' || b == b'?' {
                        // End tags and processing instructions are skipped.
                        self.transition(ScanState::Bogus);
                        i += 1;
                    } else {
                        // Not a tag opener; the `<` and this byte are text.
                        self.transition(ScanState::Data);
                        i += 1;
                    }
                }
                ScanState::TagName => {
                    if b == b'>' {
                        self.finish_tag(sink);
                        i += 1;
                    } else if b == b'/' {
                        self.self_closing = true;
                        self.transition(ScanState::BeforeAttrName);
                        i += 1;
                    } else if b.is_ascii_whitespace() {
                        self.transition(ScanState::BeforeAttrName);
                        i += 1;
                    } else {
                        self.tag_name.push(b);
                        i += 1;
                    }
                }
                ScanState::BeforeAttrName => {
                    if b == b'>' {
                        self.finish_tag(sink);
                        i += 1;
                    } else if b == b'/' {
                        self.self_closing = true;
                        i += 1;
                    } else if b.is_ascii_whitespace() || b == b'=' {
                        // Stray `=` before any name is dropped.
                        self.self_closing = false;
                        i += 1;
                    } else {
                        self.self_closing = false;
                        self.attr_name.push(b);
                        self.transition(ScanState::AttrName);
                        i += 1;
                    }
                }
                ScanState::AttrName => {
                    if b == b'>' {
                        self.push_attr(false);
                        self.finish_tag(sink);
                        i += 1;
                    } else if b == b'=' {
                        self.transition(ScanState::BeforeAttrValue);
                        i += 1;
                    } else if b == b'/' {
                        self.push_attr(false);
                        self.self_closing = true;
                        self.transition(ScanState::BeforeAttrName);
                        i += 1;
                    } else if b.is_ascii_whitespace() {
                        self.transition(ScanState::AfterAttrName);
                        i += 1;
                    } else {
                        self.attr_name.push(b);
                        i += 1;
                    }
                }
                ScanState::AfterAttrName => {
                    if b == b'>' {
                        self.push_attr(false);
                        self.finish_tag(sink);
                        i += 1;
                    } else if b == b'=' {
                        self.transition(ScanState::BeforeAttrValue);
                        i += 1;
                    } else if b == b'/' {
                        self.push_attr(false);
                        self.self_closing = true;
                        self.transition(ScanState::BeforeAttrName);
                        i += 1;
                    } else if b.is_ascii_whitespace() {
                        i += 1;
                    } else {
                        // New attribute starts; the previous one had no value.
                        self.push_attr(false);
                        self.attr_name.push(b);
                        self.transition(ScanState::AttrName);
                        i += 1;
                    }
                }
                ScanState::BeforeAttrValue => {
                    if b.is_ascii_whitespace() {
                        i += 1;
                    } else if b == b'"' {
                        self.transition(ScanState::AttrValueDouble);
                        i += 1;
                    } else if b == b'\'' {
                        self.transition(ScanState::AttrValueSingle);
                        i += 1;
                    } else if b == b'>' {
                        self.push_attr(true);
                        self.finish_tag(sink);
                        i += 1;
                    } else {
                        self.attr_value.push(b);
                        self.transition(ScanState::AttrValueUnquoted);
                        i += 1;
                    }
                }
                ScanState::AttrValueDouble => match memchr(b'"', &bytes[i..]) {
                    Some(rel) => {
                        self.attr_value.extend_from_slice(&bytes[i..i + rel]);
                        i += rel + 1;
                        self.push_attr(true);
                        self.transition(ScanState::BeforeAttrName);
                    }
                    None => {
                        self.attr_value.extend_from_slice(&bytes[i..]);
                        i = len;
                    }
                },
                ScanState::AttrValueSingle => match memchr(b'\'', &bytes[i..]) {
                    Some(rel) => {
                        self.attr_value.extend_from_slice(&bytes[i..i + rel]);
                        i += rel + 1;
                        self.push_attr(true);
                        self.transition(ScanState::BeforeAttrName);
                    }
                    None => {
                        self.attr_value.extend_from_slice(&bytes[i..]);
                        i = len;
                    }
                },
                ScanState::AttrValueUnquoted => {
                    if b == b'>' {
                        self.push_attr(true);
                        self.finish_tag(sink);
                        i += 1;
                    } else if b == b'/' {
                        self.transition(ScanState::AttrValueUnquotedSlash);
                        i += 1;
                    } else if b.is_ascii_whitespace() {
                        self.push_attr(true);
                        self.transition(ScanState::BeforeAttrName);
                        i += 1;
                    } else {
                        self.attr_value.push(b);
                        i += 1;
                    }
                }
                ScanState::AttrValueUnquotedSlash => {
                    // A held `/` is a self-closing marker before `>` and value
                    // content otherwise.
                    if b == b'>' {
                        self.self_closing = true;
                        self.push_attr(true);
                        self.finish_tag(sink);
                        i += 1;
                    } else {
                        self.attr_value.push(b'/');
                        self.transition(ScanState::AttrValueUnquoted);
                        // Reprocess the current byte in the value state.
                    }
                }
                ScanState::MarkupDeclOpen => {
                    if b == b'-' {
                        self.transition(ScanState::CommentStart);
                        i += 1;
                    } else {
                        // Doctypes, CDATA, and unknown declarations.
                        self.transition(ScanState::Bogus);
                    }
                }
                ScanState::CommentStart => {
                    if b == b'-' {
                        // Seeding the dash count with the opener's dashes gives
                        // HTML's abrupt close for `<!-->` and `<!--->`.
                        self.dashes = 2;
                        self.transition(ScanState::Comment);
                        i += 1;
                    } else {
                        self.transition(ScanState::Bogus);
                    }
                }
                ScanState::Comment => {
                    if self.dashes == 0 {
                        match memchr(b'-', &bytes[i..]) {
                            Some(rel) => {
                                i += rel + 1;
                                self.dashes = 1;
                            }
                            None => i = len,
                        }
                    } else if b == b'-' {
                        self.dashes = self.dashes.saturating_add(1);
                        i += 1;
                    } else if b == b'>' && self.dashes >= 2 {
                        self.dashes = 0;
                        self.transition(ScanState::Data);
                        i += 1;
                    } else {
                        self.dashes = 0;
                        i += 1;
                    }
                }
                ScanState::Bogus => match memchr(b'>', &bytes[i..]) {
                    Some(rel) => {
                        i += rel + 1;
                        self.transition(ScanState::Data);
                    }
                    None => i = len,
                },
                ScanState::RawText => {
                    if self.raw_matched == 0 {
                        match memchr(b'<', &bytes[i..]) {
                            Some(rel) => {
                                i += rel + 1;
                                self.raw_matched = 1;
                            }
                            None => i = len,
                        }
                    } else if b.eq_ignore_ascii_case(&self.raw_close[self.raw_matched]) {
                        self.raw_matched += 1;
                        i += 1;
                        if self.raw_matched == self.raw_close.len() {
                            self.raw_matched = 0;
                            self.transition(ScanState::RawTextClose);
                        }
                    } else {
                        self.raw_matched = usize::from(b == b'<');
                        i += 1;
                    }
                }
                ScanState::RawTextClose => {
                    if b == b'>' {
                        self.transition(ScanState::Data);
                        i += 1;
                    } else if b.is_ascii_whitespace() {
                        i += 1;
                    } else {
                        // Near-miss like `</scriptx`; back to raw text without
                        // consuming so a `<` restarts close-tag matching.
                        self.transition(ScanState::RawText);
                    }
                }
            }
        }
        if is_final {
            self.finalize();
        }
    }

    /// Return a copy of current instrumentation counters.
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    fn transition(&mut self, next: ScanState) {
        if self.state == next {
            return;
        }
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(target: "markup.scanner", "state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn begin_tag(&mut self, first: u8) {
        self.tag_name.clear();
        self.attr_name.clear();
        self.attr_value.clear();
        self.attrs.clear();
        self.self_closing = false;
        self.tag_name.push(first);
        self.transition(ScanState::TagName);
    }

    fn push_attr(&mut self, valued: bool) {
        if self.attr_name.is_empty() {
            self.attr_value.clear();
            return;
        }
        let name = String::from_utf8_lossy(&self.attr_name).into_owned();
        let value = if valued {
            Some(String::from_utf8_lossy(&self.attr_value).into_owned())
        } else {
            None
        };
        self.attrs.push((name, value));
        self.attr_name.clear();
        self.attr_value.clear();
    }

    fn finish_tag<S: StartTagSink>(&mut self, sink: &mut S) {
        let name = String::from_utf8_lossy(&self.tag_name).into_owned();
        self.tag_name.clear();
        let attributes = std::mem::take(&mut self.attrs);
        // Script/style content is raw text: nothing inside it is markup until
        // the matching case-insensitive close tag. A self-closed element has
        // no content to skip.
        let next = if self.self_closing {
            ScanState::Data
        } else if name.eq_ignore_ascii_case("script") {
            self.raw_close = SCRIPT_CLOSE_TAG;
            self.raw_matched = 0;
            ScanState::RawText
        } else if name.eq_ignore_ascii_case("style") {
            self.raw_close = STYLE_CLOSE_TAG;
            self.raw_matched = 0;
            ScanState::RawText
        } else {
            ScanState::Data
        };
        self.transition(next);
        let tag = StartTag { name, attributes };
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(target: "markup.scanner", "start tag: {tag:?}");
        self.stats.tags_emitted = self.stats.tags_emitted.saturating_add(1);
        sink.on_start_tag(&tag);
    }

    fn finalize(&mut self) {
        // Incomplete trailing recognition is dropped, and the scanner comes
        // back clean so the session can be reused for another document.
        self.state = ScanState::Data;
        self.tag_name.clear();
        self.attr_name.clear();
        self.attr_value.clear();
        self.attrs.clear();
        self.self_closing = false;
        self.raw_matched = 0;
        self.dashes = 0;
    }
}

impl Default for TagScanner {
    fn default() -> Self {
        Self::new()
    }
}
