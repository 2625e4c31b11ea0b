//! Generation tokens for discarding stale async results.

/// Tag attached to an outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing generations; only the latest is current.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    latest: Generation,
}

impl GenerationCounter {
    pub fn issue(&mut self) -> Generation {
        self.latest = Generation(self.latest.0 + 1);
        self.latest
    }

    pub fn latest(&self) -> Generation {
        self.latest
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.latest
    }
}
