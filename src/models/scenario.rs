//! Scenario and fitness configuration.
//!
//! A [`Scenario`] describes the production line for one run: slot capacity,
//! horizon length, the wage schedule, and the lateness penalty exposure.
//! [`FitnessConfig`] holds the deadline-weighting coefficients applied on
//! top of raw profit.
//!
//! Both are loaded once per run from external configuration and read-only
//! thereafter.

use serde::{Deserialize, Serialize};

/// Production-line configuration for one scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Line capacity per time slot, in time units (≥ 0; zero is a valid
    /// degenerate line that produces nothing).
    pub capacity_per_slot: f64,
    /// Number of slots in the planning horizon.
    pub horizon_slots: usize,
    /// Base wage cost per active slot.
    pub wage_per_slot: f64,
    /// Slots per day; the wage multiplier pattern repeats with this period.
    pub slots_per_day: usize,
    /// Wage multiplier per slot-of-day. Length must equal `slots_per_day`.
    pub wage_multipliers: Vec<f64>,
    /// Fraction of an order's gross revenue forfeited when the order is not
    /// fully delivered on time.
    pub late_penalty_rate: f64,
}

impl Scenario {
    /// Creates a scenario with a flat wage schedule (multiplier 1.0).
    pub fn new(capacity_per_slot: f64, horizon_slots: usize) -> Self {
        Self {
            capacity_per_slot,
            horizon_slots,
            wage_per_slot: 0.0,
            slots_per_day: 1,
            wage_multipliers: vec![1.0],
            late_penalty_rate: 0.1,
        }
    }

    /// Sets the base wage per active slot.
    pub fn with_wage_per_slot(mut self, wage: f64) -> Self {
        self.wage_per_slot = wage;
        self
    }

    /// Sets the daily wage multiplier pattern.
    pub fn with_wage_pattern(mut self, multipliers: Vec<f64>) -> Self {
        self.slots_per_day = multipliers.len().max(1);
        self.wage_multipliers = multipliers;
        self
    }

    /// Replaces the wage multiplier pattern with a named profile.
    pub fn with_wage_profile(mut self, profile: WageProfile) -> Self {
        let multipliers = profile.multipliers().to_vec();
        self.slots_per_day = multipliers.len();
        self.wage_multipliers = multipliers;
        self
    }

    /// Sets the late-delivery penalty fraction.
    pub fn with_late_penalty_rate(mut self, rate: f64) -> Self {
        self.late_penalty_rate = rate;
        self
    }

    /// Wage multiplier for an absolute slot index.
    ///
    /// The daily pattern cycles across the horizon.
    pub fn wage_multiplier(&self, slot: usize) -> f64 {
        self.wage_multipliers[slot % self.slots_per_day]
    }

    /// Total capacity available across the horizon, in time units.
    pub fn total_capacity(&self) -> f64 {
        self.capacity_per_slot * self.horizon_slots as f64
    }
}

/// Named per-slot wage multiplier schemes used to derive scenario variants
/// in batch experiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WageProfile {
    /// Mild evening/night premium.
    Low,
    /// Standard premium schedule.
    Medium,
    /// Steep night premium.
    High,
}

impl WageProfile {
    /// The six-slot daily multiplier pattern for this profile.
    pub fn multipliers(&self) -> &'static [f64] {
        match self {
            WageProfile::Low => &[1.0, 1.05, 1.1, 1.2, 1.3, 1.15],
            WageProfile::Medium => &[1.0, 1.1, 1.2, 1.35, 1.5, 1.3],
            WageProfile::High => &[1.0, 1.15, 1.3, 1.5, 1.7, 1.4],
        }
    }

    /// Tag fragment used in experiment names.
    pub fn tag(&self) -> &'static str {
        match self {
            WageProfile::Low => "wage-low",
            WageProfile::Medium => "wage-medium",
            WageProfile::High => "wage-high",
        }
    }
}

/// Deadline-weighting coefficients applied on top of raw profit.
///
/// `fitness = profit − alpha_deadline × deadline_violations
///                  − beta_late_units × late_units`
///
/// The "reinforced" configuration uses elevated coefficients, trading a
/// fixed amount of profit for each violation or late unit avoided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessConfig {
    /// Weight per order with at least one unit past its deadline (≥ 0).
    pub alpha_deadline: f64,
    /// Weight per unit scheduled past its order's deadline (≥ 0).
    pub beta_late_units: f64,
}

impl FitnessConfig {
    /// Baseline coefficients.
    pub fn baseline() -> Self {
        Self {
            alpha_deadline: 0.5,
            beta_late_units: 0.2,
        }
    }

    /// Reinforced coefficients: stronger deadline guidance.
    pub fn reinforced() -> Self {
        Self {
            alpha_deadline: 1.5,
            beta_late_units: 0.8,
        }
    }
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self::baseline()
    }
}
