//! Discovery of pushable sub-resources from streaming HTML.
//!
//! The hosting connection loop owns one [`DocumentScanner`] per document
//! fetch, feeds it body bytes as they arrive, and reads the accumulated
//! [`Link`] list once the body is complete to decide what to push.
//! Resolution and classification never block and never fail the scan;
//! anomalies only mean fewer discovered links.

use std::fmt;

mod collect;
mod session;

pub use collect::LinkCollector;
pub use session::DocumentScanner;

/// Coarse urgency ranking attached to a discovered reference.
///
/// Ordering is the contract with the push scheduler; the numeric mapping
/// stays on the scheduler's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Lowest,
    Medium,
    Highest,
}

/// A discovered sub-resource reference: absolute URI plus priority.
///
/// Immutable once appended; the accumulator is append-only and
/// bulk-cleared, never edited in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub uri: String,
    pub priority: Priority,
}

/// Errors crossing the component boundary.
///
/// Malformed markup and unresolvable references are absorbed during the
/// scan and never surface here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanError {
    /// The session base could not be parsed as an absolute URI.
    InvalidBaseUri { uri: String },
    /// `feed` was called after the final chunk was processed.
    SessionClosed,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::InvalidBaseUri { uri } => {
                write!(f, "invalid base URI for scan session: {uri}")
            }
            ScanError::SessionClosed => write!(f, "feed after final chunk of scan session"),
        }
    }
}

impl std::error::Error for ScanError {}
