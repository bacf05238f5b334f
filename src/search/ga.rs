//! Generational genetic algorithm over priority encodings.
//!
//! # Encoding
//!
//! A permutation of order indices; scheduling priority is the position in
//! the permutation. Operators preserve permutation validity, so no genetic
//! operation can fail on a valid individual.
//!
//! # Loop
//!
//! Each generation is built as a fresh snapshot from the previous one:
//! elites are carried unconditionally, the remainder is filled by
//! tournament selection, order crossover, and swap/shift mutation. The
//! GaVns and GaVnsSa variants additionally refine the elite individuals
//! after each generation (see [`vns`](super::vns) and [`sa`](super::sa)).
//!
//! # References
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"
//! - Davis (1985), order crossover for permutation problems

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::decoder::Encoding;

use super::{sa, tournament_select, vns, Algorithm, Individual, SearchContext, SearchParams};

/// GA parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Number of generations.
    pub generations: usize,
    /// Probability of crossover per parent pair, in `[0, 1]`.
    pub crossover_rate: f64,
    /// Probability of mutation per offspring, in `[0, 1]`.
    pub mutation_rate: f64,
    /// Best individuals carried unconditionally into the next generation.
    pub elite_count: usize,
    /// Tournament size for parent selection.
    pub tournament_size: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 80,
            generations: 200,
            crossover_rate: 0.8,
            mutation_rate: 0.08,
            elite_count: 2,
            tournament_size: 3,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation budget.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }
}

/// Runs the GA family (plain, +VNS, +VNS+SA per `params.algorithm`).
///
/// Returns the best individual ever observed and the best fitness in each
/// generation's population (index 0 = initial population).
pub(crate) fn run<R: Rng>(
    ctx: &SearchContext,
    params: &SearchParams,
    rng: &mut R,
) -> (Individual, Vec<f64>) {
    let cfg = &params.ga;
    let pop_size = cfg.population_size.max(1);
    let elite_count = cfg.elite_count.min(pop_size).max(1);
    let interval = params.vns.interval.max(1);

    let mut population: Vec<Individual> = (0..pop_size)
        .map(|_| ctx.evaluate_encoding(ctx.random_encoding(rng)))
        .collect();
    sort_by_fitness(&mut population);

    let mut best = population[0].clone();
    let mut history = vec![best.fitness];

    let mut temperature = if params.algorithm == Algorithm::GaVnsSa {
        sa::initial_temperature(ctx, &population[0], &params.sa, rng)
    } else {
        0.0
    };

    for generation in 0..cfg.generations {
        let mut next: Vec<Individual> = population[..elite_count].to_vec();
        while next.len() < pop_size {
            let p1 = tournament_select(&population, cfg.tournament_size.max(1), rng)
                .encoding
                .clone();
            let p2 = tournament_select(&population, cfg.tournament_size.max(1), rng)
                .encoding
                .clone();

            let (mut c1, mut c2) = if rng.random_bool(cfg.crossover_rate.clamp(0.0, 1.0)) {
                order_crossover(&p1, &p2, rng)
            } else {
                (p1, p2)
            };
            if rng.random_bool(cfg.mutation_rate.clamp(0.0, 1.0)) {
                mutate(&mut c1, rng);
            }
            if rng.random_bool(cfg.mutation_rate.clamp(0.0, 1.0)) {
                mutate(&mut c2, rng);
            }

            next.push(ctx.evaluate_encoding(c1));
            if next.len() < pop_size {
                next.push(ctx.evaluate_encoding(c2));
            }
        }
        population = next;
        sort_by_fitness(&mut population);

        let refine_now = (generation + 1) % interval == 0;
        match params.algorithm {
            Algorithm::GaVns if refine_now => {
                for individual in population.iter_mut().take(elite_count) {
                    *individual = vns::refine(ctx, individual, &params.vns, rng);
                }
                sort_by_fitness(&mut population);
            }
            Algorithm::GaVnsSa => {
                if refine_now {
                    for individual in population.iter_mut().take(elite_count) {
                        let walk = sa::anneal(ctx, individual, &params.vns, temperature, rng);
                        if walk.best.fitness > best.fitness {
                            best = walk.best;
                        }
                        // The accepted end state may be worse: that is the
                        // point of annealed acceptance.
                        *individual = walk.current;
                    }
                    sort_by_fitness(&mut population);
                }
                temperature *= params.sa.cooling_rate;
            }
            _ => {}
        }

        if population[0].fitness > best.fitness {
            best = population[0].clone();
        }
        history.push(population[0].fitness);
    }

    (best, history)
}

fn sort_by_fitness(population: &mut [Individual]) {
    population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
}

// ======================== Genetic operators ========================

/// Order crossover: a contiguous window is inherited from one parent at
/// its positions, the remaining positions are filled with the other
/// parent's genes in their order of appearance.
///
/// Both children are valid permutations whenever the parents are.
pub fn order_crossover<R: Rng>(p1: &Encoding, p2: &Encoding, rng: &mut R) -> (Encoding, Encoding) {
    let n = p1.len();
    if n < 2 {
        return (p1.clone(), p2.clone());
    }
    let mut start = rng.random_range(0..n);
    let mut end = rng.random_range(0..n);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    (
        ox_child(p1, p2, start, end),
        ox_child(p2, p1, start, end),
    )
}

fn ox_child(template: &Encoding, donor: &Encoding, start: usize, end: usize) -> Encoding {
    let n = template.len();
    let mut in_window = vec![false; n];
    for &gene in &template[start..=end] {
        in_window[gene] = true;
    }

    let mut child = vec![0usize; n];
    child[start..=end].copy_from_slice(&template[start..=end]);

    let mut donor_iter = donor.iter().filter(|&&gene| !in_window[gene]);
    for slot in (0..start).chain(end + 1..n) {
        if let Some(&gene) = donor_iter.next() {
            child[slot] = gene;
        }
    }
    child
}

/// Swap mutation: exchanges two random positions.
pub fn swap_mutation<R: Rng>(encoding: &mut Encoding, rng: &mut R) {
    let n = encoding.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    encoding.swap(i, j);
}

/// Shift mutation: removes an element and reinserts it at a random
/// position.
pub fn shift_mutation<R: Rng>(encoding: &mut Encoding, rng: &mut R) {
    let n = encoding.len();
    if n < 2 {
        return;
    }
    let from = rng.random_range(0..n);
    let to = rng.random_range(0..n);
    let gene = encoding.remove(from);
    encoding.insert(to, gene);
}

fn mutate<R: Rng>(encoding: &mut Encoding, rng: &mut R) {
    // 50% swap, 50% shift.
    if rng.random_bool(0.5) {
        swap_mutation(encoding, rng);
    } else {
        shift_mutation(encoding, rng);
    }
}
