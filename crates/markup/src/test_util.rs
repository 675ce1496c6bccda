//! Shared helpers for scanner tests.

use crate::{StartTag, StartTagSink, TagScanner};

#[derive(Default)]
pub(crate) struct RecordingSink {
    pub tags: Vec<StartTag>,
}

impl StartTagSink for RecordingSink {
    fn on_start_tag(&mut self, tag: &StartTag) {
        self.tags.push(tag.clone());
    }
}

/// Scan a whole document as a single final chunk.
pub(crate) fn scan(input: &str) -> Vec<StartTag> {
    let mut scanner = TagScanner::new();
    let mut sink = RecordingSink::default();
    scanner.feed(input.as_bytes(), true, &mut sink);
    sink.tags
}

/// Scan a document split at the given byte offsets, last chunk final.
pub(crate) fn scan_split(input: &[u8], boundaries: &[usize]) -> Vec<StartTag> {
    let mut scanner = TagScanner::new();
    let mut sink = RecordingSink::default();
    let mut last = 0usize;
    for &idx in boundaries {
        assert!(idx >= last && idx <= input.len(), "invalid boundary {idx}");
        scanner.feed(&input[last..idx], false, &mut sink);
        last = idx;
    }
    scanner.feed(&input[last..], true, &mut sink);
    sink.tags
}
