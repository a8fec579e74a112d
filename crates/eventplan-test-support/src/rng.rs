//! Scripted RNGs for the unexpected issue draw.

use eventplan_core::rng::DeterministicRng;

/// Always draws the lowest value: the first candidate issue.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// Replays a fixed list of draws, clamped into the requested range.
///
/// # Panics
///
/// `next_u32_range` panics once the list is used up, so a test that draws
/// more often than it scripted fails loudly.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    draws: Vec<u32>,
    next: usize,
}

impl SequenceRng {
    /// Creates an RNG that yields `draws` in order.
    #[must_use]
    pub fn new(draws: Vec<u32>) -> Self {
        Self { draws, next: 0 }
    }

    /// Number of scripted draws not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draws.len() - self.next
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let Some(&value) = self.draws.get(self.next) else {
            panic!(
                "SequenceRng exhausted after {} draws",
                self.draws.len()
            );
        };
        self.next += 1;
        value.clamp(min, max.max(min))
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}
