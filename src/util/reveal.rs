//! One-shot scroll reveal bookkeeping.
//!
//! Pages register every `.reveal` element; the first intersection report for
//! an element marks it revealed and stops observing it. Later reports for the
//! same element, including re-entries into the viewport, are ignored.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use std::collections::HashSet;
use std::hash::Hash;

/// Marker class for elements that animate in.
pub const REVEAL_CLASS: &str = "reveal";
/// Class added once an element has been revealed.
pub const REVEAL_ACTIVE_CLASS: &str = "reveal-active";
/// Fraction of the element that must be visible before it counts as intersecting.
pub const REVEAL_THRESHOLD: f64 = 0.1;

#[derive(Debug)]
pub struct RevealTracker<Id> {
    observed: HashSet<Id>,
    revealed: HashSet<Id>,
}

impl<Id> Default for RevealTracker<Id> {
    fn default() -> Self {
        Self { observed: HashSet::new(), revealed: HashSet::new() }
    }
}

impl<Id: Eq + Hash + Clone> RevealTracker<Id> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `id`. Already revealed elements are not re-armed.
    pub fn observe(&mut self, id: Id) {
        if !self.revealed.contains(&id) {
            self.observed.insert(id);
        }
    }

    /// Record an intersection report.
    ///
    /// Returns `true` exactly once per element: on the first report where it
    /// is intersecting. The caller then applies [`REVEAL_ACTIVE_CLASS`] and
    /// unobserves it.
    pub fn record(&mut self, id: &Id, intersecting: bool) -> bool {
        if !intersecting || !self.observed.remove(id) {
            return false;
        }
        self.revealed.insert(id.clone());
        true
    }

    #[must_use]
    pub fn is_observed(&self, id: &Id) -> bool {
        self.observed.contains(id)
    }

    #[must_use]
    pub fn is_revealed(&self, id: &Id) -> bool {
        self.revealed.contains(id)
    }

    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }
}
