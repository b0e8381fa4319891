//! Prefix sums over a day timeline for O(1) window sums.

/// `sums[i]` holds the total of the first `i` timeline entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixSums {
    sums: Vec<f64>,
}

impl PrefixSums {
    pub fn new(timeline: &[f64]) -> Self {
        let mut sums = Vec::with_capacity(timeline.len() + 1);
        let mut running = 0.0;
        sums.push(running);
        for value in timeline {
            running += value;
            sums.push(running);
        }
        Self { sums }
    }

    /// Number of slots in the underlying timeline.
    pub fn slots(&self) -> usize {
        self.sums.len() - 1
    }

    /// Sum of `length` entries starting at `start`.
    ///
    /// # Panics
    /// Panics if `start + length` exceeds [`slots`](Self::slots).
    pub fn window_sum(&self, start: usize, length: usize) -> f64 {
        self.sums[start + length] - self.sums[start]
    }
}
