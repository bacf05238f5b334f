//! Encoding → schedule decoder.
//!
//! The decoder turns a priority encoding of orders into a concrete timed
//! [`Schedule`] using earliest-due-date placement:
//!
//! 1. The encoding is collapsed to one priority per order (first occurrence
//!    wins; absent orders append in index order).
//! 2. The sequence is stable-sorted by deadline — EDD is primary, the
//!    encoding's own order breaks deadline ties.
//! 3. Each order's units are placed greedily into the earliest slots with
//!    remaining capacity; each unit consumes `unit_time` of slot capacity.
//!    Placement continues past the deadline to the end of the horizon —
//!    late units are scheduled, not rejected, so lateness surfaces in the
//!    metrics instead of aborting the run.
//!
//! **Feasibility repair**: when total demand exceeds total capacity, units
//! that no longer fit are dropped. The greedy order makes the
//! lowest-priority orders truncate first. This is an accepted degenerate
//! outcome, never an error.
//!
//! Decoding is pure and deterministic: equal encodings yield equal
//! schedules, independent of search history.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! (due-date based dispatching)

use crate::models::{Order, Scenario, Schedule};

/// A priority encoding: order indices, highest priority first.
///
/// Owned exclusively by one search individual; copied, never aliased,
/// across genetic operators.
pub type Encoding = Vec<usize>;

const EPS: f64 = 1e-9;

/// Converts a continuous priority vector into an [`Encoding`].
///
/// Indices are ranked by descending score; ties keep ascending index order
/// (stable sort). This is the bridge between PSO's continuous particles
/// and the shared decode/evaluate pipeline.
pub fn rank_encoding(position: &[f64]) -> Encoding {
    let mut indices: Encoding = (0..position.len()).collect();
    indices.sort_by(|&a, &b| position[b].total_cmp(&position[a]));
    indices
}

/// Decodes an encoding into a schedule against the given order book and
/// scenario.
pub fn decode(encoding: &Encoding, orders: &[Order], scenario: &Scenario) -> Schedule {
    let mut schedule = Schedule::empty(scenario.horizon_slots, scenario.capacity_per_slot);
    if orders.is_empty() || scenario.horizon_slots == 0 {
        return schedule;
    }

    let sequence = processing_sequence(encoding, orders);

    // Remaining capacity per slot, in time units.
    let mut free: Vec<f64> = vec![scenario.capacity_per_slot; scenario.horizon_slots];

    for idx in sequence {
        let order = &orders[idx];
        let mut remaining = order.units;
        for slot in 0..scenario.horizon_slots {
            if remaining == 0 {
                break;
            }
            let fits = ((free[slot] + EPS) / order.unit_time).floor() as u32;
            let take = remaining.min(fits);
            if take == 0 {
                continue;
            }
            let busy = f64::from(take) * order.unit_time;
            schedule.place(slot, &order.id, take, busy);
            free[slot] -= busy;
            remaining -= take;
        }
        // Units still remaining exceed the horizon's capacity: dropped.
    }

    schedule
}

/// Processing order for the decoder: EDD primary, encoding priority within
/// equal deadlines, original index last.
///
/// The encoding may repeat indices (orders split across slots); only the
/// first occurrence carries priority. Indices outside the order book are
/// ignored, and orders missing from the encoding are appended in index
/// order, so decoding is total over arbitrary index sequences.
fn processing_sequence(encoding: &Encoding, orders: &[Order]) -> Vec<usize> {
    let mut seen = vec![false; orders.len()];
    let mut sequence: Vec<usize> = Vec::with_capacity(orders.len());
    for &idx in encoding {
        if idx < orders.len() && !seen[idx] {
            seen[idx] = true;
            sequence.push(idx);
        }
    }
    for (idx, placed) in seen.iter().enumerate() {
        if !placed {
            sequence.push(idx);
        }
    }
    // Stable: preserves encoding order within equal deadlines.
    sequence.sort_by(|&a, &b| orders[a].deadline.total_cmp(&orders[b].deadline));
    sequence
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_order_book() -> Vec<Order> {
        vec![
            Order::new("O1", 5)
                .with_unit_revenue(100.0)
                .with_deadline(10.0)
                .with_unit_time(1.0),
            Order::new("O2", 5)
                .with_unit_revenue(100.0)
                .with_deadline(3.0)
                .with_unit_time(1.0),
        ]
    }

    #[test]
    fn test_edd_places_earlier_deadline_first() {
        let orders = two_order_book();
        let scenario = Scenario::new(5.0, 10);

        // O1 leads the encoding, but O2's deadline (3.0) wins under EDD.
        let schedule = decode(&vec![0, 1], &orders, &scenario);
        assert_eq!(schedule.slots[0].len(), 1);
        assert_eq!(schedule.slots[0][0].order_id, "O2");
        assert_eq!(schedule.slots[0][0].units, 5);
        assert_eq!(schedule.slots[1][0].order_id, "O1");
        assert_eq!(schedule.completion_slot("O2"), Some(0));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let orders = two_order_book();
        let scenario = Scenario::new(5.0, 10);
        let encoding = vec![1, 0];
        assert_eq!(
            decode(&encoding, &orders, &scenario),
            decode(&encoding, &orders, &scenario)
        );
    }

    #[test]
    fn test_encoding_breaks_deadline_ties() {
        let orders = vec![
            Order::new("A", 3).with_deadline(5.0).with_unit_time(1.0),
            Order::new("B", 3).with_deadline(5.0).with_unit_time(1.0),
        ];
        let scenario = Scenario::new(3.0, 4);

        let first_a = decode(&vec![0, 1], &orders, &scenario);
        assert_eq!(first_a.slots[0][0].order_id, "A");
        let first_b = decode(&vec![1, 0], &orders, &scenario);
        assert_eq!(first_b.slots[0][0].order_id, "B");
    }

    #[test]
    fn test_capacity_invariant_holds() {
        let orders = vec![
            Order::new("A", 7).with_deadline(2.0).with_unit_time(1.5),
            Order::new("B", 9).with_deadline(6.0).with_unit_time(0.7),
        ];
        let scenario = Scenario::new(4.0, 5);
        let schedule = decode(&vec![0, 1], &orders, &scenario);

        for s in 0..scenario.horizon_slots {
            assert!(schedule.busy_time_in_slot(s) <= scenario.capacity_per_slot + 1e-9);
        }
        assert!(schedule.units_for_order("A") <= 7);
        assert!(schedule.units_for_order("B") <= 9);
    }

    #[test]
    fn test_overload_truncates_lowest_priority() {
        // Capacity for 6 units total; demand is 10.
        let orders = vec![
            Order::new("A", 5).with_deadline(2.0).with_unit_time(1.0),
            Order::new("B", 5).with_deadline(8.0).with_unit_time(1.0),
        ];
        let scenario = Scenario::new(2.0, 3);
        let schedule = decode(&vec![0, 1], &orders, &scenario);

        assert_eq!(schedule.units_for_order("A"), 5);
        assert_eq!(schedule.units_for_order("B"), 1);
        assert_eq!(schedule.total_units(), 6);
    }

    #[test]
    fn test_late_units_still_placed() {
        let orders = vec![Order::new("A", 6).with_deadline(1.0).with_unit_time(1.0)];
        let scenario = Scenario::new(2.0, 5);
        let schedule = decode(&vec![0], &orders, &scenario);

        // Deadline allows only slot 0 (2 units); the rest spill later.
        assert_eq!(schedule.units_for_order("A"), 6);
        assert_eq!(schedule.on_time_units_for_order("A", 1.0), 2);
    }

    #[test]
    fn test_repeated_and_missing_indices_tolerated() {
        let orders = two_order_book();
        let scenario = Scenario::new(5.0, 10);

        let with_repeats = decode(&vec![0, 0, 1, 7], &orders, &scenario);
        let plain = decode(&vec![0, 1], &orders, &scenario);
        assert_eq!(with_repeats, plain);

        // Missing orders are appended, so decoding stays total.
        let partial = decode(&vec![1], &orders, &scenario);
        assert_eq!(partial.total_units(), 10);
    }

    #[test]
    fn test_zero_capacity_places_nothing() {
        let orders = two_order_book();
        let scenario = Scenario::new(0.0, 10);
        let schedule = decode(&vec![0, 1], &orders, &scenario);
        assert_eq!(schedule.total_units(), 0);
    }

    #[test]
    fn test_fractional_unit_time_packing() {
        let orders = vec![Order::new("A", 10).with_deadline(4.0).with_unit_time(0.3)];
        let scenario = Scenario::new(1.0, 4);
        let schedule = decode(&vec![0], &orders, &scenario);

        // floor(1.0 / 0.3) = 3 units per slot.
        assert_eq!(schedule.slots[0][0].units, 3);
        assert_eq!(schedule.units_for_order("A"), 10);
    }

    #[test]
    fn test_rank_encoding_descending_with_stable_ties() {
        assert_eq!(rank_encoding(&[0.2, 0.9, 0.5]), vec![1, 2, 0]);
        assert_eq!(rank_encoding(&[0.5, 0.5, 0.9]), vec![2, 0, 1]);
        assert_eq!(rank_encoding(&[]), Vec::<usize>::new());
    }
}
