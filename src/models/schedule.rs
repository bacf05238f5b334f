//! Schedule (solution) model.
//!
//! A schedule is the decoded, time-indexed allocation of production units
//! to slots on the line. It is derived from an encoding by the decoder and
//! never mutated afterwards: every query is a pure read.
//!
//! Invariants maintained by the decoder:
//! - busy time per slot ≤ the scenario's slot capacity
//! - units placed per order ≤ the order's required units

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Units of one order placed in one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    /// Order the units belong to.
    pub order_id: String,
    /// Units produced in this slot.
    pub units: u32,
    /// Line capacity consumed (`units × unit_time`).
    pub busy_time: f64,
}

/// A complete timed allocation over the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Number of slots in the horizon.
    pub horizon_slots: usize,
    /// Slot capacity the schedule was decoded against.
    pub capacity_per_slot: f64,
    /// Placements per slot, indexed 0..horizon_slots.
    pub slots: Vec<Vec<Placement>>,
}

impl PartialEq for Placement {
    fn eq(&self, other: &Self) -> bool {
        self.order_id == other.order_id
            && self.units == other.units
            && (self.busy_time - other.busy_time).abs() < 1e-9
    }
}

impl Schedule {
    /// Creates an empty schedule over the given horizon.
    pub fn empty(horizon_slots: usize, capacity_per_slot: f64) -> Self {
        Self {
            horizon_slots,
            capacity_per_slot,
            slots: vec![Vec::new(); horizon_slots],
        }
    }

    /// Records units of an order in a slot.
    ///
    /// Used by the decoder while building the schedule.
    pub(crate) fn place(&mut self, slot: usize, order_id: &str, units: u32, busy_time: f64) {
        self.slots[slot].push(Placement {
            order_id: order_id.to_string(),
            units,
            busy_time,
        });
    }

    /// Total units placed for an order across the horizon.
    pub fn units_for_order(&self, order_id: &str) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|p| p.order_id == order_id)
            .map(|p| p.units)
            .sum()
    }

    /// Units of an order that complete at or before `deadline`.
    ///
    /// A unit in slot `s` completes at time `s + 1`.
    pub fn on_time_units_for_order(&self, order_id: &str, deadline: f64) -> u32 {
        self.slots
            .iter()
            .enumerate()
            .flat_map(|(s, placements)| placements.iter().map(move |p| (s, p)))
            .filter(|(s, p)| p.order_id == order_id && (*s as f64 + 1.0) <= deadline + 1e-9)
            .map(|(_, p)| p.units)
            .sum()
    }

    /// Line time consumed in a slot.
    pub fn busy_time_in_slot(&self, slot: usize) -> f64 {
        self.slots[slot].iter().map(|p| p.busy_time).sum()
    }

    /// Total line time consumed across the horizon.
    pub fn total_busy_time(&self) -> f64 {
        (0..self.horizon_slots)
            .map(|s| self.busy_time_in_slot(s))
            .sum()
    }

    /// Whether any production happens in a slot.
    pub fn is_slot_active(&self, slot: usize) -> bool {
        !self.slots[slot].is_empty()
    }

    /// Slot in which the last unit of an order is produced.
    pub fn completion_slot(&self, order_id: &str) -> Option<usize> {
        (0..self.horizon_slots)
            .rev()
            .find(|&s| self.slots[s].iter().any(|p| p.order_id == order_id))
    }

    /// Units placed per order.
    pub fn units_per_order(&self) -> HashMap<String, u32> {
        let mut totals: HashMap<String, u32> = HashMap::new();
        for p in self.slots.iter().flatten() {
            *totals.entry(p.order_id.clone()).or_insert(0) += p.units;
        }
        totals
    }

    /// Total units placed across all orders.
    pub fn total_units(&self) -> u32 {
        self.slots.iter().flatten().map(|p| p.units).sum()
    }
}
