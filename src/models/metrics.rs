//! Schedule quality metrics.
//!
//! All fields are pure derivations of a schedule, its order book, and the
//! scenario's cost/price parameters.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Revenue | Delivered units × unit revenue (late units still earn) |
//! | Production cost | Delivered units × unit cost |
//! | Wage cost | Base wage × multiplier, per active slot |
//! | Penalty | Late-penalty fraction of gross revenue, per late order |
//! | Utilization | Busy line time / total capacity |
//! | On-time rate | Fraction of orders fully delivered by deadline |
//! | Penalty rate | Fraction of orders incurring the penalty |

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Economic and service-level measures of one schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrics {
    /// Net profit: revenue − production cost − wage cost − penalty.
    pub profit: f64,
    /// Revenue over all delivered units.
    pub total_revenue: f64,
    /// Production cost over all delivered units.
    pub production_cost: f64,
    /// Wage cost over all active slots.
    pub wage_cost: f64,
    /// Lateness penalty across orders.
    pub penalty: f64,
    /// Busy line time / total capacity, in `[0, 1]`.
    pub utilization_rate: f64,
    /// Fraction of orders fully delivered on time, in `[0, 1]`.
    /// Zero when the order book is empty.
    pub on_time_rate: f64,
    /// Fraction of orders incurring the lateness penalty, in `[0, 1]`.
    pub penalty_rate: f64,
    /// Orders with at least one unit scheduled past their deadline.
    pub deadline_violations: usize,
    /// Units scheduled past their order's deadline, summed over orders.
    pub late_units: u32,
    /// Delivered units per order.
    pub delivered_per_order: HashMap<String, u32>,
}

impl Metrics {
    /// Metrics of an empty schedule over an empty order book.
    pub fn zero() -> Self {
        Self {
            profit: 0.0,
            total_revenue: 0.0,
            production_cost: 0.0,
            wage_cost: 0.0,
            penalty: 0.0,
            utilization_rate: 0.0,
            on_time_rate: 0.0,
            penalty_rate: 0.0,
            deadline_violations: 0,
            late_units: 0,
            delivered_per_order: HashMap::new(),
        }
    }
}
