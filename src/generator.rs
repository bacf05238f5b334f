//! Seeded scenario and order-book generation.
//!
//! Produces demo inputs for experiments and tests. Generation is driven
//! entirely by the caller's RNG, so a fixed seed yields a fixed order
//! book.

use rand::Rng;

use crate::models::{Order, Scenario, WageProfile};

/// Revenue, cost, and per-unit line time for the three product tiers.
const TIERS: [(f64, f64, f64); 3] = [
    (120.0, 40.0, 1.0 / 12.0),
    (110.0, 35.0, 1.0 / 10.0),
    (100.0, 30.0, 1.0 / 8.0),
];

/// Cumulative tier mix probabilities.
const TIER_MIX: [f64; 2] = [0.4, 0.75];

/// A seven-day demo line: six 4-hour slots per day, medium wage premium,
/// 10% lateness exposure.
pub fn demo_scenario() -> Scenario {
    Scenario::new(4.0, 42)
        .with_wage_per_slot(2000.0)
        .with_wage_profile(WageProfile::Medium)
        .with_late_penalty_rate(0.1)
}

/// Generates a random order book over the given horizon.
///
/// Order quantities, tiers, and deadlines are drawn from the caller's RNG;
/// deadlines land on day boundaries strictly inside the horizon, so every
/// order is satisfiable in principle but the book as a whole may exceed
/// line capacity.
pub fn generate_orders<R: Rng>(count: usize, horizon_slots: usize, rng: &mut R) -> Vec<Order> {
    let slots_per_day = 6;
    let horizon_days = (horizon_slots / slots_per_day).max(2);

    (0..count)
        .map(|i| {
            let roll: f64 = rng.random();
            let tier = if roll < TIER_MIX[0] {
                TIERS[0]
            } else if roll < TIER_MIX[1] {
                TIERS[1]
            } else {
                TIERS[2]
            };
            let (unit_revenue, unit_cost, unit_time) = tier;

            let units = rng.random_range(180..=800);
            let due_day = rng.random_range(1..horizon_days);
            let deadline = (due_day * slots_per_day) as f64;

            Order::new(format!("O{:02}", i + 1), units)
                .with_unit_revenue(unit_revenue)
                .with_unit_cost(unit_cost)
                .with_deadline(deadline)
                .with_unit_time(unit_time)
        })
        .collect()
}
