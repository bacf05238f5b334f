//! Metrics computation and fitness scalarization.
//!
//! [`evaluate`] derives [`Metrics`] from a schedule, its order book, and
//! the scenario's cost/price parameters. [`fitness`] folds the metrics
//! into the scalar objective the search engines maximize:
//!
//! ```text
//! fitness = profit − alpha_deadline × deadline_violations
//!                  − beta_late_units × late_units
//! ```
//!
//! `deadline_violations` counts orders with at least one unit scheduled
//! past their deadline; `late_units` sums those units across orders — a
//! continuous soft penalty rather than a step function. The "reinforced"
//! configuration simply uses larger coefficients, making the optimizer
//! trade a fixed amount of profit for each violation or late unit avoided.
//!
//! Both functions are pure and side-effect-free.

use std::collections::HashMap;

use crate::models::{FitnessConfig, Metrics, Order, Scenario, Schedule};

/// Computes all quality metrics for a schedule.
pub fn evaluate(schedule: &Schedule, orders: &[Order], scenario: &Scenario) -> Metrics {
    let mut total_revenue = 0.0;
    let mut production_cost = 0.0;
    let mut penalty = 0.0;
    let mut on_time_orders = 0usize;
    let mut late_orders = 0usize;
    let mut deadline_violations = 0usize;
    let mut late_units = 0u32;
    let mut delivered_per_order: HashMap<String, u32> = HashMap::new();

    for order in orders {
        let delivered = schedule.units_for_order(&order.id);
        let on_time = schedule.on_time_units_for_order(&order.id, order.deadline);

        // All delivered units earn revenue, even late ones.
        total_revenue += f64::from(delivered) * order.unit_revenue;
        production_cost += f64::from(delivered) * order.unit_cost;
        delivered_per_order.insert(order.id.clone(), delivered);

        let overdue = delivered - on_time;
        if overdue > 0 {
            deadline_violations += 1;
            late_units += overdue;
        }

        if on_time >= order.units {
            on_time_orders += 1;
        } else {
            late_orders += 1;
            penalty += scenario.late_penalty_rate * order.gross_revenue();
        }
    }

    let mut wage_cost = 0.0;
    for slot in 0..schedule.horizon_slots {
        if schedule.is_slot_active(slot) {
            wage_cost += scenario.wage_per_slot * scenario.wage_multiplier(slot);
        }
    }

    let total_capacity = scenario.total_capacity();
    let utilization_rate = if total_capacity > 0.0 {
        schedule.total_busy_time() / total_capacity
    } else {
        0.0
    };

    let (on_time_rate, penalty_rate) = if orders.is_empty() {
        (0.0, 0.0)
    } else {
        (
            on_time_orders as f64 / orders.len() as f64,
            late_orders as f64 / orders.len() as f64,
        )
    };

    let profit = total_revenue - production_cost - wage_cost - penalty;

    Metrics {
        profit,
        total_revenue,
        production_cost,
        wage_cost,
        penalty,
        utilization_rate,
        on_time_rate,
        penalty_rate,
        deadline_violations,
        late_units,
        delivered_per_order,
    }
}

/// Scalar objective for the search engines (higher is better).
pub fn fitness(metrics: &Metrics, config: &FitnessConfig) -> f64 {
    metrics.profit
        - config.alpha_deadline * metrics.deadline_violations as f64
        - config.beta_late_units * f64::from(metrics.late_units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;

    fn order(id: &str, units: u32, revenue: f64, cost: f64, deadline: f64) -> Order {
        Order::new(id, units)
            .with_unit_revenue(revenue)
            .with_unit_cost(cost)
            .with_deadline(deadline)
            .with_unit_time(1.0)
    }

    #[test]
    fn test_all_on_time() {
        let orders = vec![order("O1", 5, 100.0, 40.0, 10.0), order("O2", 5, 100.0, 40.0, 3.0)];
        let scenario = Scenario::new(5.0, 10).with_wage_per_slot(50.0);
        let schedule = decode(&vec![0, 1], &orders, &scenario);
        let m = evaluate(&schedule, &orders, &scenario);

        assert_eq!(m.total_revenue, 1000.0);
        assert_eq!(m.production_cost, 400.0);
        // Two active slots, flat multiplier.
        assert_eq!(m.wage_cost, 100.0);
        assert_eq!(m.penalty, 0.0);
        assert_eq!(m.profit, 500.0);
        assert_eq!(m.on_time_rate, 1.0);
        assert_eq!(m.penalty_rate, 0.0);
        assert_eq!(m.deadline_violations, 0);
        assert_eq!(m.late_units, 0);
        assert!((m.utilization_rate - 10.0 / 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_late_order_penalized() {
        // 6 units, deadline 1.0, capacity 2/slot: 2 on time, 4 late.
        let orders = vec![order("O1", 6, 100.0, 0.0, 1.0)];
        let scenario = Scenario::new(2.0, 5).with_late_penalty_rate(0.1);
        let schedule = decode(&vec![0], &orders, &scenario);
        let m = evaluate(&schedule, &orders, &scenario);

        assert_eq!(m.total_revenue, 600.0);
        assert_eq!(m.penalty, 60.0);
        assert_eq!(m.deadline_violations, 1);
        assert_eq!(m.late_units, 4);
        assert_eq!(m.on_time_rate, 0.0);
        assert_eq!(m.penalty_rate, 1.0);
    }

    #[test]
    fn test_truncated_order_penalized_without_late_units() {
        // Demand 5, capacity 2: 2 delivered on time, 3 never placed.
        let orders = vec![order("O1", 5, 100.0, 0.0, 1.0)];
        let scenario = Scenario::new(2.0, 1).with_late_penalty_rate(0.1);
        let schedule = decode(&vec![0], &orders, &scenario);
        let m = evaluate(&schedule, &orders, &scenario);

        assert_eq!(m.delivered_per_order["O1"], 2);
        // No unit is scheduled past the deadline, so no violation...
        assert_eq!(m.deadline_violations, 0);
        assert_eq!(m.late_units, 0);
        // ...but the order is not fully delivered on time, so it pays.
        assert_eq!(m.penalty, 50.0);
        assert_eq!(m.on_time_rate, 0.0);
    }

    #[test]
    fn test_wage_multiplier_applied_per_active_slot() {
        let orders = vec![order("O1", 4, 100.0, 0.0, 10.0)];
        let scenario = Scenario::new(2.0, 4)
            .with_wage_per_slot(100.0)
            .with_wage_pattern(vec![1.0, 1.5]);
        let schedule = decode(&vec![0], &orders, &scenario);
        let m = evaluate(&schedule, &orders, &scenario);

        // Slots 0 and 1 active: 100×1.0 + 100×1.5.
        assert_eq!(m.wage_cost, 250.0);
    }

    #[test]
    fn test_zero_orders_degenerate() {
        let orders: Vec<Order> = Vec::new();
        let scenario = Scenario::new(5.0, 10).with_wage_per_slot(100.0);
        let schedule = decode(&Vec::new(), &orders, &scenario);
        let m = evaluate(&schedule, &orders, &scenario);

        assert_eq!(m.profit, 0.0);
        assert_eq!(m.utilization_rate, 0.0);
        assert_eq!(m.on_time_rate, 0.0);
        assert_eq!(m.penalty_rate, 0.0);
    }

    #[test]
    fn test_zero_capacity_degenerate() {
        let orders = vec![order("O1", 5, 100.0, 0.0, 3.0)];
        let scenario = Scenario::new(0.0, 10);
        let schedule = decode(&vec![0], &orders, &scenario);
        let m = evaluate(&schedule, &orders, &scenario);

        assert_eq!(m.total_revenue, 0.0);
        assert_eq!(m.utilization_rate, 0.0);
        // Nothing delivered: the order still pays the lateness penalty.
        assert_eq!(m.penalty, 50.0);
        assert_eq!(m.profit, -50.0);
    }

    #[test]
    fn test_fitness_soft_penalty_monotone_in_beta() {
        let orders = vec![order("O1", 6, 100.0, 0.0, 1.0)];
        let scenario = Scenario::new(2.0, 5);
        let schedule = decode(&vec![0], &orders, &scenario);
        let m = evaluate(&schedule, &orders, &scenario);
        assert!(m.late_units > 0);

        let low = fitness(
            &m,
            &FitnessConfig {
                alpha_deadline: 0.5,
                beta_late_units: 0.2,
            },
        );
        let high = fitness(
            &m,
            &FitnessConfig {
                alpha_deadline: 0.5,
                beta_late_units: 0.8,
            },
        );
        assert!(high < low);
    }

    #[test]
    fn test_reinforced_fitness_weights_lateness_harder() {
        let orders = vec![order("O1", 6, 100.0, 0.0, 1.0)];
        let scenario = Scenario::new(2.0, 5);
        let schedule = decode(&vec![0], &orders, &scenario);
        let m = evaluate(&schedule, &orders, &scenario);

        let base = fitness(&m, &FitnessConfig::baseline());
        let reinforced = fitness(&m, &FitnessConfig::reinforced());
        assert!(reinforced < base);
        assert_eq!(
            base,
            m.profit - 0.5 * m.deadline_violations as f64 - 0.2 * f64::from(m.late_units)
        );
    }
}
