//! Breakpoint set.

use std::collections::BTreeSet;

/// Addresses at which execution stops before the instruction there runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreakpointSet {
    addrs: BTreeSet<u32>,
}

impl BreakpointSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `addr`. Adding an address already present has no effect.
    pub fn add(&mut self, addr: u32) {
        let _ = self.addrs.insert(addr);
    }

    /// Removes `addr`. Removing an absent address has no effect.
    pub fn delete(&mut self, addr: u32) {
        let _ = self.addrs.remove(&addr);
    }

    /// Returns true if execution should stop at `addr`.
    pub fn contains(&self, addr: u32) -> bool {
        self.addrs.contains(&addr)
    }

    /// Number of breakpoints set.
    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    /// Returns true if no breakpoints are set.
    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    /// Iterates the breakpoints in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.addrs.iter().copied()
    }
}
