//! Filter state and change delivery
//!
//! [`FilterState`] is owned by a single [`FilterController`]. Controls never
//! touch it directly: each control change becomes one [`FilterUpdate`], which
//! is shallow-merged and then broadcast to every registered
//! [`FilterObserver`] in registration order.

use log::debug;
use serde::Serialize;

use crate::types::PriceDuration;
use crate::LOG_PREFIX;

/// Current filter selection. `None` / `0` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub category: Option<String>,
    pub frequency: Option<PriceDuration>,
    /// Inclusive upper bound in cents. Zero is unconstrained, not "free only".
    pub price_ceiling_cents: u64,
}

/// A change to exactly one filter dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Category(Option<String>),
    Frequency(Option<PriceDuration>),
    PriceCeiling(u64),
}

impl FilterState {
    /// Merge `update` into this state, leaving the other dimensions untouched.
    /// Returns whether anything changed.
    pub fn merge(&mut self, update: FilterUpdate) -> bool {
        match update {
            FilterUpdate::Category(category) => replace(&mut self.category, category),
            FilterUpdate::Frequency(frequency) => replace(&mut self.frequency, frequency),
            FilterUpdate::PriceCeiling(cents) => replace(&mut self.price_ceiling_cents, cents),
        }
    }

    /// Builder form of [`FilterState::merge`].
    pub fn with(mut self, update: FilterUpdate) -> Self {
        self.merge(update);
        self
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

// =============================================================================
// Observers
// =============================================================================

/// Receives the full state snapshot after every update.
pub trait FilterObserver {
    fn filter_changed(&mut self, state: &FilterState);
}

impl<F> FilterObserver for F
where
    F: FnMut(&FilterState),
{
    fn filter_changed(&mut self, state: &FilterState) {
        self(state)
    }
}

/// Owns the filter state and its observers.
#[derive(Default)]
pub struct FilterController {
    state: FilterState,
    observers: Vec<Box<dyn FilterObserver>>,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Register an observer. Delivery follows registration order.
    pub fn subscribe<O>(&mut self, observer: O) -> &mut Self
    where
        O: FilterObserver + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    /// Apply one update and broadcast the resulting snapshot.
    ///
    /// Observers are notified even when the value did not change; re-firing a
    /// control with the same value must still leave the page consistent.
    pub fn update(&mut self, update: FilterUpdate) {
        let changed = self.state.merge(update);
        debug!("{} filter state (changed: {}): {:?}", LOG_PREFIX, changed, self.state);
        let snapshot = self.state.clone();
        for observer in &mut self.observers {
            observer.filter_changed(&snapshot);
        }
    }
}
