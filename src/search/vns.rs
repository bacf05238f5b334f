//! Variable neighborhood refinement.
//!
//! Explores a sequence of neighborhood structures of increasing radius
//! around an individual's encoding:
//!
//! 1. **Swap** — exchange two positions
//! 2. **WindowShift** — move a short contiguous window elsewhere
//! 3. **Reversal** — reverse a subsequence
//!
//! Within a structure, random neighbors are probed until one strictly
//! improves fitness; any improvement restarts the walk from the smallest
//! structure. Exhausting every structure without improvement ends the
//! round. The result is never worse than the input.
//!
//! # Reference
//! Mladenović & Hansen (1997), "Variable Neighborhood Search"

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::decoder::Encoding;

use super::{Individual, SearchContext};

/// VNS parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VnsConfig {
    /// Maximum restart rounds per refinement call.
    pub rounds: usize,
    /// Random neighbors probed per structure before moving to the next.
    pub attempts_per_neighborhood: usize,
    /// Refine elites every this many generations.
    pub interval: usize,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            rounds: 3,
            attempts_per_neighborhood: 100,
            interval: 10,
        }
    }
}

impl VnsConfig {
    /// Sets the round budget.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Sets the per-structure probe budget.
    pub fn with_attempts_per_neighborhood(mut self, attempts: usize) -> Self {
        self.attempts_per_neighborhood = attempts;
        self
    }

    /// Sets the refinement interval (in generations).
    pub fn with_interval(mut self, interval: usize) -> Self {
        self.interval = interval;
        self
    }
}

/// Neighborhood structures, ordered by increasing radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// Exchange two positions.
    Swap,
    /// Move a contiguous window to a new position.
    WindowShift,
    /// Reverse a subsequence.
    Reversal,
}

impl Neighborhood {
    /// All structures, smallest radius first.
    pub const ALL: [Neighborhood; 3] = [
        Neighborhood::Swap,
        Neighborhood::WindowShift,
        Neighborhood::Reversal,
    ];

    /// Draws one random neighbor of `encoding` in this structure.
    ///
    /// Encodings shorter than two elements have no neighbors and are
    /// returned unchanged.
    pub fn sample<R: Rng>(&self, encoding: &Encoding, rng: &mut R) -> Encoding {
        let n = encoding.len();
        let mut neighbor = encoding.clone();
        if n < 2 {
            return neighbor;
        }
        match self {
            Neighborhood::Swap => {
                let i = rng.random_range(0..n);
                let mut j = rng.random_range(0..n);
                if i == j {
                    j = (j + 1) % n;
                }
                neighbor.swap(i, j);
            }
            Neighborhood::WindowShift => {
                let len = rng.random_range(2..=3.min(n));
                let start = rng.random_range(0..=n - len);
                let window: Vec<usize> = neighbor.drain(start..start + len).collect();
                let dest = rng.random_range(0..=neighbor.len());
                neighbor.splice(dest..dest, window);
            }
            Neighborhood::Reversal => {
                let mut i = rng.random_range(0..n);
                let mut j = rng.random_range(0..n);
                if i == j {
                    j = (j + 1) % n;
                }
                if i > j {
                    std::mem::swap(&mut i, &mut j);
                }
                neighbor[i..=j].reverse();
            }
        }
        neighbor
    }
}

/// Refines an individual by first-improvement search across the growing
/// neighborhood structures. Never returns a worse individual.
pub fn refine<R: Rng>(
    ctx: &SearchContext,
    individual: &Individual,
    cfg: &VnsConfig,
    rng: &mut R,
) -> Individual {
    let mut best = individual.clone();

    for _ in 0..cfg.rounds {
        let mut improved = false;
        'structures: for neighborhood in Neighborhood::ALL {
            for _ in 0..cfg.attempts_per_neighborhood {
                let candidate = ctx.evaluate_encoding(neighborhood.sample(&best.encoding, rng));
                if candidate.fitness > best.fitness {
                    best = candidate;
                    improved = true;
                    // Restart from the smallest structure.
                    break 'structures;
                }
            }
        }
        if !improved {
            break;
        }
    }

    best
}
