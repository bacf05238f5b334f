//! Particle swarm optimization over continuous priority vectors.
//!
//! Each particle holds one priority score per order in `[0, 1]`. Positions
//! are mapped to encodings by [`rank_encoding`] (descending score, stable
//! ties) and scored through the same decode/evaluate pipeline as the GA
//! family, making the two engines interchangeable encoding producers.
//!
//! Velocity update per component:
//!
//! ```text
//! v ← w·v + c1·r1·(pbest − x) + c2·r2·(gbest − x)
//! ```
//!
//! with `r1, r2` fresh uniform draws per component and `v` clamped to
//! `±max_velocity`; positions are clamped to `[0, 1]`.
//!
//! A swarm that converges to the same encoding for every seed is a valid
//! fixed point of these dynamics under the given parameters, not a broken
//! random source; the stream is consumed per draw either way.
//!
//! # Reference
//! Kennedy & Eberhart (1995), "Particle Swarm Optimization"

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::decoder::rank_encoding;

use super::{Individual, SearchContext};

/// PSO parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsoConfig {
    /// Swarm size.
    pub particles: usize,
    /// Iteration budget.
    pub iterations: usize,
    /// Inertia weight `w`.
    pub inertia: f64,
    /// Cognitive coefficient `c1` (pull toward the personal best).
    pub cognitive: f64,
    /// Social coefficient `c2` (pull toward the global best).
    pub social: f64,
    /// Component-wise velocity clamp.
    pub max_velocity: f64,
    /// Linear inertia decay target; `None` keeps `inertia` constant.
    pub inertia_end: Option<f64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            particles: 30,
            iterations: 200,
            inertia: 0.9,
            cognitive: 2.0,
            social: 2.0,
            max_velocity: 0.2,
            inertia_end: None,
        }
    }
}

impl PsoConfig {
    /// Sets the swarm size.
    pub fn with_particles(mut self, particles: usize) -> Self {
        self.particles = particles;
        self
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the inertia weight.
    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }

    /// Sets the cognitive and social coefficients.
    pub fn with_coefficients(mut self, cognitive: f64, social: f64) -> Self {
        self.cognitive = cognitive;
        self.social = social;
        self
    }

    /// Sets the velocity clamp.
    pub fn with_max_velocity(mut self, max_velocity: f64) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    /// Enables linear inertia decay toward `end` across the run.
    pub fn with_inertia_end(mut self, end: f64) -> Self {
        self.inertia_end = Some(end);
        self
    }
}

/// One particle of the swarm.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current priority scores, one per order, in `[0, 1]`.
    pub position: Vec<f64>,
    /// Current velocity per component.
    pub velocity: Vec<f64>,
    /// Best position this particle has visited.
    pub best_position: Vec<f64>,
    /// Fitness at `best_position`.
    pub best_fitness: f64,
}

impl Particle {
    /// Draws a random particle: position uniform in `[0, 1)` per
    /// component, velocity uniform in `±max_velocity`.
    pub(crate) fn random<R: Rng>(dimension: usize, max_velocity: f64, rng: &mut R) -> Self {
        let position: Vec<f64> = (0..dimension).map(|_| rng.random_range(0.0..1.0)).collect();
        let velocity: Vec<f64> = (0..dimension)
            .map(|_| {
                if max_velocity > 0.0 {
                    rng.random_range(-max_velocity..max_velocity)
                } else {
                    0.0
                }
            })
            .collect();
        Self {
            best_position: position.clone(),
            best_fitness: f64::NEG_INFINITY,
            position,
            velocity,
        }
    }
}

/// Runs the swarm to its iteration budget.
///
/// Returns the global-best individual and the global-best fitness after
/// each iteration (index 0 = initial swarm).
pub(crate) fn run<R: Rng>(
    ctx: &SearchContext,
    cfg: &PsoConfig,
    rng: &mut R,
) -> (Individual, Vec<f64>) {
    let dimension = ctx.dimension();
    let swarm_size = cfg.particles.max(1);

    let mut swarm: Vec<Particle> = Vec::with_capacity(swarm_size);
    let mut global_best: Option<Individual> = None;
    let mut global_best_position: Vec<f64> = vec![0.0; dimension];

    for _ in 0..swarm_size {
        let mut particle = Particle::random(dimension, cfg.max_velocity, rng);
        let evaluated = ctx.evaluate_encoding(rank_encoding(&particle.position));
        particle.best_fitness = evaluated.fitness;

        let is_new_best = global_best
            .as_ref()
            .map(|b| evaluated.fitness > b.fitness)
            .unwrap_or(true);
        if is_new_best {
            global_best_position.copy_from_slice(&particle.position);
            global_best = Some(evaluated);
        }
        swarm.push(particle);
    }
    // swarm_size ≥ 1, so a global best always exists.
    let mut global_best = match global_best {
        Some(individual) => individual,
        None => ctx.evaluate_encoding(Vec::new()),
    };

    let mut history = vec![global_best.fitness];

    for iteration in 0..cfg.iterations {
        let w = match cfg.inertia_end {
            Some(end) if cfg.iterations > 0 => {
                cfg.inertia + (end - cfg.inertia) * iteration as f64 / cfg.iterations as f64
            }
            _ => cfg.inertia,
        };

        for particle in &mut swarm {
            for d in 0..dimension {
                let r1 = rng.random::<f64>();
                let r2 = rng.random::<f64>();
                let pull_personal =
                    cfg.cognitive * r1 * (particle.best_position[d] - particle.position[d]);
                let pull_social =
                    cfg.social * r2 * (global_best_position[d] - particle.position[d]);
                let velocity = w * particle.velocity[d] + pull_personal + pull_social;
                particle.velocity[d] = velocity.clamp(-cfg.max_velocity, cfg.max_velocity);
                particle.position[d] =
                    (particle.position[d] + particle.velocity[d]).clamp(0.0, 1.0);
            }

            let evaluated = ctx.evaluate_encoding(rank_encoding(&particle.position));
            if evaluated.fitness > particle.best_fitness {
                particle.best_fitness = evaluated.fitness;
                particle.best_position.copy_from_slice(&particle.position);

                if evaluated.fitness > global_best.fitness {
                    global_best_position.copy_from_slice(&particle.position);
                    global_best = evaluated;
                }
            }
        }

        history.push(global_best.fitness);
    }

    (global_best, history)
}
