//! Scheduling domain models.
//!
//! Core data types for one optimization run: the immutable order book
//! ([`Order`]), the line/cost configuration ([`Scenario`], [`FitnessConfig`]),
//! the derived timed solution ([`Schedule`]), and its quality measures
//! ([`Metrics`]).
//!
//! Orders and scenarios are loaded once per run and never mutated by the
//! engine; schedules and metrics are pure derivations.

mod metrics;
mod order;
mod scenario;
mod schedule;

pub use metrics::Metrics;
pub use order::Order;
pub use scenario::{FitnessConfig, Scenario, WageProfile};
pub use schedule::{Placement, Schedule};
