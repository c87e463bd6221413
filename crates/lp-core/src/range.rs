//! Price range derivation

use serde::Serialize;

/// Inclusive bounds of all listing prices on the page, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub min_cents: u64,
    pub max_cents: u64,
}

/// Compute the min/max of `prices`.
///
/// Returns `None` for an empty collection; callers must then skip building the
/// price control entirely.
pub fn derive_price_range<I>(prices: I) -> Option<PriceRange>
where
    I: IntoIterator<Item = u64>,
{
    let mut iter = prices.into_iter();
    let first = iter.next()?;
    let (min_cents, max_cents) = iter.fold((first, first), |(lo, hi), price| (lo.min(price), hi.max(price)));
    Some(PriceRange { min_cents, max_cents })
}
