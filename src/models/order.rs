//! Production order model.
//!
//! An order is a fixed demand for units of one product at a given unit
//! revenue, to be completed by a deadline. Orders are immutable for the
//! duration of a scheduling run.

use serde::{Deserialize, Serialize};

/// A production order to be placed on the line.
///
/// # Time Representation
/// Times are in slot units relative to the start of the horizon (t=0).
/// A unit placed in slot `s` completes at time `s + 1`; the order is on
/// time iff every required unit completes at or before `deadline`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: String,
    /// Required units (> 0).
    pub units: u32,
    /// Revenue per delivered unit (≥ 0).
    pub unit_revenue: f64,
    /// Production cost per unit (≥ 0).
    pub unit_cost: f64,
    /// Latest completion time, in slot units (≥ 0).
    pub deadline: f64,
    /// Line capacity consumed per unit (> 0).
    pub unit_time: f64,
}

impl Order {
    /// Creates an order with the given ID and unit demand.
    ///
    /// Revenue and cost default to zero, `unit_time` to 1.0 and the
    /// deadline to 0.0 (immediately due); use the `with_*` setters.
    pub fn new(id: impl Into<String>, units: u32) -> Self {
        Self {
            id: id.into(),
            units,
            unit_revenue: 0.0,
            unit_cost: 0.0,
            deadline: 0.0,
            unit_time: 1.0,
        }
    }

    /// Sets the per-unit revenue.
    pub fn with_unit_revenue(mut self, revenue: f64) -> Self {
        self.unit_revenue = revenue;
        self
    }

    /// Sets the per-unit production cost.
    pub fn with_unit_cost(mut self, cost: f64) -> Self {
        self.unit_cost = cost;
        self
    }

    /// Sets the deadline (slot units).
    pub fn with_deadline(mut self, deadline: f64) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sets the capacity consumed per unit.
    pub fn with_unit_time(mut self, unit_time: f64) -> Self {
        self.unit_time = unit_time;
        self
    }

    /// Gross revenue if fully delivered.
    pub fn gross_revenue(&self) -> f64 {
        f64::from(self.units) * self.unit_revenue
    }

    /// Margin per unit (revenue minus production cost).
    pub fn unit_margin(&self) -> f64 {
        self.unit_revenue - self.unit_cost
    }

    /// Total line capacity the order demands.
    pub fn total_time(&self) -> f64 {
        f64::from(self.units) * self.unit_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_builder() {
        let order = Order::new("O01", 40)
            .with_unit_revenue(120.0)
            .with_unit_cost(40.0)
            .with_deadline(12.0)
            .with_unit_time(0.1);

        assert_eq!(order.id, "O01");
        assert_eq!(order.units, 40);
        assert_eq!(order.unit_revenue, 120.0);
        assert_eq!(order.unit_cost, 40.0);
        assert_eq!(order.deadline, 12.0);
        assert_eq!(order.unit_time, 0.1);
    }

    #[test]
    fn test_order_derived_quantities() {
        let order = Order::new("O02", 10)
            .with_unit_revenue(110.0)
            .with_unit_cost(35.0)
            .with_unit_time(0.5);

        assert_eq!(order.gross_revenue(), 1100.0);
        assert_eq!(order.unit_margin(), 75.0);
        assert_eq!(order.total_time(), 5.0);
    }
}
