//! Per-document scan session.

use markup::TagScanner;
use url::Url;

use crate::{Link, LinkCollector, ScanError};

/// One scan session per streamed document body.
///
/// The hosting connection loop feeds body fragments as they arrive, in
/// order, with `is_final` set exactly once on the last fragment (which may
/// be empty). Recognized references accumulate in [`links`](Self::links);
/// [`clear_links`](Self::clear_links) reopens the session for a pipelined
/// document sharing the same base URI. Dropping the session mid-body is
/// always safe: scanning has no external side effects.
///
/// Single-threaded by design; the session has no internal synchronization
/// and `feed` cost is bounded by the fragment size.
#[derive(Debug)]
pub struct DocumentScanner {
    scanner: TagScanner,
    collector: LinkCollector,
    closed: bool,
}

impl DocumentScanner {
    /// Create a session for a document fetched from `base_uri`.
    ///
    /// Base URI parse failure is the only fatal error of the component:
    /// without an absolute base no relative reference can be resolved.
    pub fn new(base_uri: &str) -> Result<Self, ScanError> {
        let base = Url::parse(base_uri).map_err(|_| ScanError::InvalidBaseUri {
            uri: base_uri.to_string(),
        })?;
        Ok(Self {
            scanner: TagScanner::new(),
            collector: LinkCollector::new(base),
            closed: false,
        })
    }

    /// Feed the next body fragment; `is_final` closes the session.
    ///
    /// Malformed markup and unresolvable references are absorbed; the only
    /// error is feeding a session whose final fragment was already
    /// processed.
    pub fn feed(&mut self, bytes: &[u8], is_final: bool) -> Result<(), ScanError> {
        if self.closed {
            return Err(ScanError::SessionClosed);
        }
        self.scanner.feed(bytes, is_final, &mut self.collector);
        if is_final {
            self.closed = true;
        }
        Ok(())
    }

    /// The session base URI.
    pub fn base(&self) -> &Url {
        self.collector.base()
    }

    /// Discovered links in document order, duplicates included. Borrowed
    /// view, valid until the next mutation of the session.
    pub fn links(&self) -> &[Link] {
        self.collector.links()
    }

    /// Clear accumulated links and reopen the session for the next
    /// document, keeping the already-resolved base URI.
    pub fn clear_links(&mut self) {
        self.collector.clear_links();
        self.closed = false;
    }
}
