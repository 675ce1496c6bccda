//! Start-tag classification and reference resolution.

use markup::{StartTag, StartTagSink};
use url::Url;

use crate::{Link, Priority};

/// Accumulates resolved sub-resource links from start-tag events.
///
/// Stateless per event: a fixed classification table applied to each tag,
/// RFC 3986 resolution against the session base, and an append in document
/// order. Duplicates are kept; dedup and ranking are the push scheduler's
/// business.
///
/// Classification table (all comparisons case-insensitive):
///
/// | tag    | required | selector                 | priority |
/// |--------|----------|--------------------------|----------|
/// | link   | href     | rel == "shortcut icon"   | Lowest   |
/// | link   | href     | rel == "stylesheet"      | Medium   |
/// | img    | src      |                          | Lowest   |
/// | script | src      |                          | Medium   |
#[derive(Debug)]
pub struct LinkCollector {
    base: Url,
    links: Vec<Link>,
}

impl LinkCollector {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            links: Vec::new(),
        }
    }

    /// The session base URI; fixed for the collector's lifetime.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Accumulated links in discovery order, valid until the next mutation.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Empty the accumulator in place, keeping the resolved base.
    pub fn clear_links(&mut self) {
        self.links.clear();
    }

    fn add_link(&mut self, reference: &str, priority: Priority) {
        match self.base.join(reference) {
            Ok(abs) => self.links.push(Link {
                uri: abs.to_string(),
                priority,
            }),
            Err(err) => {
                // Unresolvable references are dropped; discovery must never
                // interrupt the connection loop.
                log::trace!(
                    target: "discover.collect",
                    "dropping unresolvable reference {reference:?}: {err}"
                );
            }
        }
    }
}

impl StartTagSink for LinkCollector {
    fn on_start_tag(&mut self, tag: &StartTag) {
        if tag.name_is("link") {
            let Some(href) = tag.attr("href") else {
                return;
            };
            let Some(rel) = tag.attr("rel") else {
                return;
            };
            if rel.eq_ignore_ascii_case("shortcut icon") {
                self.add_link(href, Priority::Lowest);
            } else if rel.eq_ignore_ascii_case("stylesheet") {
                self.add_link(href, Priority::Medium);
            }
        } else if tag.name_is("img") {
            if let Some(src) = tag.attr("src") {
                self.add_link(src, Priority::Lowest);
            }
        } else if tag.name_is("script") {
            if let Some(src) = tag.attr("src") {
                self.add_link(src, Priority::Medium);
            }
        }
    }
}
