//! Generation tracking for rollback and reset.
//!
//! Every rollback that discards bytes, and every reset, opens a new
//! generation. Entering generation `g` records a *floor*: the number of
//! leading bytes that survived the transition. A span issued in generation
//! `s` is still valid iff its end is at or below the smallest floor recorded
//! for any generation after `s`.
//!
//! The floors are kept as a monotonic stack (strictly increasing from bottom
//! to top). Pushing a floor pops every entry at or above it, since the new
//! floor bounds all of them from here on. The first entry newer than `s` then
//! holds the minimum over all floors newer than `s`.

use smallvec::SmallVec;

/// Monotonic stack of `(generation, floor)` pairs.
#[derive(Clone, Debug, Default)]
pub(crate) struct GenerationLog {
    current: u64,
    floors: SmallVec<[(u64, usize); 4]>,
}

impl GenerationLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The current generation.
    pub(crate) fn current(&self) -> u64 {
        self.current
    }

    /// Open a new generation in which only `[0, floor)` survives.
    ///
    /// # Panics
    ///
    /// Panics if the counter would overflow. Floors and span checks rely on
    /// generations increasing strictly, so the counter never wraps.
    pub(crate) fn advance(&mut self, floor: usize) -> u64 {
        self.current = match self.current.checked_add(1) {
            Some(next) => next,
            None => panic!("region generation counter exhausted"),
        };
        while self.floors.last().is_some_and(|&(_, f)| f >= floor) {
            self.floors.pop();
        }
        self.floors.push((self.current, floor));
        self.current
    }

    /// Number of leading bytes that survived every transition since
    /// `generation`, or `None` if nothing was discarded since then.
    pub(crate) fn surviving_since(&self, generation: u64) -> Option<usize> {
        if generation == self.current {
            return None;
        }
        let idx = self.floors.partition_point(|&(g, _)| g <= generation);
        self.floors.get(idx).map(|&(_, floor)| floor)
    }

    /// Whether the byte range ending at `end`, issued in `generation`, is
    /// still intact.
    pub(crate) fn is_intact(&self, generation: u64, end: usize) -> Result<(), usize> {
        if generation > self.current {
            return Err(0);
        }
        match self.surviving_since(generation) {
            Some(floor) if end > floor => Err(floor),
            _ => Ok(()),
        }
    }

    /// Depth of the floor stack (for diagnostics and tests).
    pub(crate) fn depth(&self) -> usize {
        self.floors.len()
    }

    /// A log whose current generation is `current`, with no floors yet.
    #[cfg(test)]
    pub(crate) fn starting_at(current: u64) -> Self {
        Self {
            current,
            floors: SmallVec::new(),
        }
    }
}
