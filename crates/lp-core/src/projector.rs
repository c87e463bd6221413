//! Visibility projection
//!
//! Maps a [`MatchResult`] onto the listing containers of the host page. The
//! page is reached through the [`ListingsDom`] seam so the projection logic can
//! run against a real document (wasm crate) or an in-memory page (tests).
//!
//! Linkage contract: a listing container sits `ancestor_depth` levels above an
//! anchor whose href contains the listing identifier. Nothing else binds
//! dataset entries to page nodes.

use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::matcher::{match_listings, MatchResult};
use crate::state::{FilterObserver, FilterState};
use crate::types::Listing;
use crate::LOG_PREFIX;

/// Default number of parent hops from a listing anchor to its container.
pub const DEFAULT_ANCESTOR_DEPTH: usize = 3;

// =============================================================================
// Link Matching
// =============================================================================

/// How an anchor href is tied to a listing identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkMatch {
    /// href contains the identifier anywhere. Overlapping identifiers
    /// ("room-1" / "room-12") can collide.
    #[default]
    Substring,
    /// One `/`-delimited path segment equals the identifier exactly.
    PathSegment,
}

impl LinkMatch {
    pub fn matches(&self, href: &str, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        match self {
            Self::Substring => href.contains(id),
            Self::PathSegment => {
                let end = href.find(['?', '#']).unwrap_or(href.len());
                href[..end].split('/').any(|segment| segment == id)
            }
        }
    }
}

// =============================================================================
// DOM seam
// =============================================================================

/// The slice of the host page the projector needs.
pub trait ListingsDom {
    type Node;

    /// Every listing container currently rendered.
    fn containers(&self) -> Vec<Self::Node>;
    /// Every candidate listing anchor, in document order.
    fn anchors(&self) -> Vec<Self::Node>;
    fn href(&self, anchor: &Self::Node) -> Option<String>;
    /// Walk `levels` parents up from `node`.
    fn ancestor(&self, node: &Self::Node, levels: usize) -> Option<Self::Node>;
    fn set_visible(&mut self, node: &Self::Node, visible: bool);
}

/// Outcome of one projection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionReport {
    pub hidden: usize,
    pub revealed: usize,
    /// Identifiers with no matching node on the page.
    pub missing: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityProjector {
    pub link_match: LinkMatch,
    pub ancestor_depth: usize,
}

impl Default for VisibilityProjector {
    fn default() -> Self {
        Self {
            link_match: LinkMatch::default(),
            ancestor_depth: DEFAULT_ANCESTOR_DEPTH,
        }
    }
}

impl VisibilityProjector {
    pub fn new(link_match: LinkMatch, ancestor_depth: usize) -> Self {
        Self { link_match, ancestor_depth }
    }

    /// Hide every container, then reveal the container of each matching id.
    ///
    /// Identifiers without a node on the page are skipped; a paginated page
    /// legitimately renders only part of the dataset.
    pub fn apply<D: ListingsDom>(&self, dom: &mut D, result: &MatchResult<'_>) -> ProjectionReport {
        let mut report = ProjectionReport::default();

        for container in dom.containers() {
            dom.set_visible(&container, false);
            report.hidden += 1;
        }

        let anchors: Vec<(D::Node, String)> = dom
            .anchors()
            .into_iter()
            .filter_map(|anchor| {
                let href = dom.href(&anchor)?;
                Some((anchor, href))
            })
            .collect();

        for id in result.iter() {
            let container = anchors
                .iter()
                .find(|(_, href)| self.link_match.matches(href, id))
                .and_then(|(anchor, _)| dom.ancestor(anchor, self.ancestor_depth));

            match container {
                Some(container) => {
                    dom.set_visible(&container, true);
                    report.revealed += 1;
                }
                None => {
                    debug!("{} no listing element for '{}'", LOG_PREFIX, id);
                    report.missing += 1;
                }
            }
        }

        report
    }
}

// =============================================================================
// Listings View
// =============================================================================

/// Observer that re-filters the listing collection and projects it onto a page.
pub struct ListingsView<D: ListingsDom> {
    listings: Rc<[Listing]>,
    dom: D,
    projector: VisibilityProjector,
}

impl<D: ListingsDom> ListingsView<D> {
    pub fn new(listings: impl Into<Rc<[Listing]>>, dom: D, projector: VisibilityProjector) -> Self {
        Self {
            listings: listings.into(),
            dom,
            projector,
        }
    }

    pub fn refresh(&mut self, state: &FilterState) -> ProjectionReport {
        let result = match_listings(state, &self.listings);
        let report = self.projector.apply(&mut self.dom, &result);
        debug!(
            "{} {} of {} listings match; revealed {}, missing {}",
            LOG_PREFIX,
            result.len(),
            self.listings.len(),
            report.revealed,
            report.missing
        );
        report
    }
}

impl<D: ListingsDom> FilterObserver for ListingsView<D> {
    fn filter_changed(&mut self, state: &FilterState) {
        self.refresh(state);
    }
}
