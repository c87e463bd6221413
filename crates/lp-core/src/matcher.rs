//! Listing Matcher
//!
//! Pure predicate over a filter snapshot. The full listing collection is
//! re-scanned on every state change; page-scoped collections are small enough
//! that no incremental bookkeeping is kept.

use crate::state::FilterState;
use crate::types::Listing;

/// Returns true when `listing` satisfies every constrained dimension of `state`.
pub fn matches(state: &FilterState, listing: &Listing) -> bool {
    let category_match = state
        .category
        .as_deref()
        .map_or(true, |category| listing.category_key == category);
    let frequency_match = state
        .frequency
        .map_or(true, |frequency| listing.price_duration == frequency);
    let price_match = state.price_ceiling_cents == 0 || listing.price_cents <= state.price_ceiling_cents;

    category_match && frequency_match && price_match
}

/// Ordered identifiers of the listings matching a filter snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult<'a> {
    ids: Vec<&'a str>,
}

impl<'a> MatchResult<'a> {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[&'a str] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.ids.iter().copied()
    }
}

impl<'a> FromIterator<&'a str> for MatchResult<'a> {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self { ids: iter.into_iter().collect() }
    }
}

/// Filter `listings` with [`matches`], keeping dataset order.
pub fn match_listings<'a>(state: &FilterState, listings: &'a [Listing]) -> MatchResult<'a> {
    listings
        .iter()
        .filter(|listing| matches(state, listing))
        .map(|listing| listing.id.as_str())
        .collect()
}
