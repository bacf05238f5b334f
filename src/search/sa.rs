//! Annealed acceptance for the neighborhood walk.
//!
//! Replaces VNS's "accept only strict improvement" rule with Metropolis
//! acceptance: a neighbor with fitness delta `Δ < 0` is accepted with
//! probability `exp(Δ / T)`. The temperature is owned by the GA loop and
//! cooled geometrically once per generation, so late generations behave
//! like plain VNS.
//!
//! Accepted degradations replace the *current* individual — that is the
//! escape mechanism — while the best individual seen during the walk is
//! tracked separately and reported back to the engine.
//!
//! # Reference
//! Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated
//! Annealing"

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::vns::{Neighborhood, VnsConfig};
use super::{Individual, SearchContext};

/// SA parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaConfig {
    /// Starting temperature. `None` estimates it from sampled neighbor
    /// deltas of the initial elite.
    pub initial_temp: Option<f64>,
    /// Geometric cooling factor per generation, in `(0, 1)`.
    pub cooling_rate: f64,
    /// Neighbors sampled for the automatic temperature estimate.
    pub auto_temp_samples: usize,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temp: None,
            cooling_rate: 0.95,
            auto_temp_samples: 30,
        }
    }
}

impl SaConfig {
    /// Sets an explicit starting temperature.
    pub fn with_initial_temp(mut self, temp: f64) -> Self {
        self.initial_temp = Some(temp);
        self
    }

    /// Sets the cooling factor.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }
}

/// End state of one annealed walk.
pub struct SaWalk {
    /// The accepted end individual (may be worse than the input).
    pub current: Individual,
    /// The best individual observed during the walk.
    pub best: Individual,
}

/// Starting temperature: explicit if configured, otherwise the mean
/// magnitude of negative fitness deltas over sampled random neighbors,
/// floored at 1.0.
pub(crate) fn initial_temperature<R: Rng>(
    ctx: &SearchContext,
    individual: &Individual,
    cfg: &SaConfig,
    rng: &mut R,
) -> f64 {
    if let Some(temp) = cfg.initial_temp {
        if temp > 0.0 {
            return temp;
        }
    }

    let mut negatives = Vec::new();
    for _ in 0..cfg.auto_temp_samples {
        let structure = Neighborhood::ALL[rng.random_range(0..Neighborhood::ALL.len())];
        let candidate = ctx.evaluate_encoding(structure.sample(&individual.encoding, rng));
        let delta = candidate.fitness - individual.fitness;
        if delta < 0.0 {
            negatives.push(-delta);
        }
    }

    if negatives.is_empty() {
        1.0
    } else {
        let mean = negatives.iter().sum::<f64>() / negatives.len() as f64;
        mean.max(1.0)
    }
}

/// One annealed walk across the growing neighborhood structures.
///
/// Improving neighbors are always accepted; degrading neighbors pass a
/// Metropolis coin flip. Any acceptance restarts from the smallest
/// structure; a full pass without acceptance ends the walk early.
pub(crate) fn anneal<R: Rng>(
    ctx: &SearchContext,
    individual: &Individual,
    vns: &VnsConfig,
    temperature: f64,
    rng: &mut R,
) -> SaWalk {
    let mut current = individual.clone();
    let mut best = individual.clone();
    let temp = temperature.max(1e-9);

    for _ in 0..vns.rounds {
        let mut accepted_any = false;
        'structures: for neighborhood in Neighborhood::ALL {
            for _ in 0..vns.attempts_per_neighborhood {
                let candidate = ctx.evaluate_encoding(neighborhood.sample(&current.encoding, rng));
                let delta = candidate.fitness - current.fitness;

                let accepted = if delta > 0.0 {
                    true
                } else if delta < 0.0 {
                    rng.random::<f64>() < (delta / temp).exp()
                } else {
                    false
                };

                if accepted {
                    current = candidate;
                    if current.fitness > best.fitness {
                        best = current.clone();
                    }
                    accepted_any = true;
                    break 'structures;
                }
            }
        }
        if !accepted_any {
            break;
        }
    }

    SaWalk { current, best }
}
