//! Input validation for scheduling runs.
//!
//! Checks structural integrity of the order book, scenario, and fitness
//! configuration before any search begins. Configuration errors are the
//! only fatal error class in the engine: infeasibility (demand exceeding
//! capacity) and numerical degenerate cases (zero orders, zero capacity)
//! are handled downstream as valid outcomes, not reported here.
//!
//! All problems are collected and returned together rather than failing
//! on the first.

use std::fmt;

use crate::models::{FitnessConfig, Order, Scenario};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two orders share the same ID, or an ID is empty.
    InvalidId,
    /// An order field is out of range (units, revenue, cost, deadline,
    /// unit time).
    InvalidOrderField,
    /// A scenario field is out of range or inconsistent.
    InvalidScenarioField,
    /// A fitness coefficient is out of range.
    InvalidFitnessField,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the full input of one scheduling run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_input(
    orders: &[Order],
    scenario: &Scenario,
    fitness: &FitnessConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen_ids = std::collections::HashSet::new();
    for order in orders {
        if order.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidId,
                "Order with empty ID",
            ));
        } else if !seen_ids.insert(order.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidId,
                format!("Duplicate order ID: {}", order.id),
            ));
        }

        if order.units == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidOrderField,
                format!("Order '{}' requires zero units", order.id),
            ));
        }
        if !order.unit_revenue.is_finite() || order.unit_revenue < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidOrderField,
                format!("Order '{}' has invalid unit revenue", order.id),
            ));
        }
        if !order.unit_cost.is_finite() || order.unit_cost < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidOrderField,
                format!("Order '{}' has invalid unit cost", order.id),
            ));
        }
        if !order.deadline.is_finite() || order.deadline < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidOrderField,
                format!("Order '{}' has invalid deadline", order.id),
            ));
        }
        if !order.unit_time.is_finite() || order.unit_time <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidOrderField,
                format!("Order '{}' has non-positive unit time", order.id),
            ));
        }
    }

    // Zero capacity and zero horizon are valid degenerate scenarios.
    if !scenario.capacity_per_slot.is_finite() || scenario.capacity_per_slot < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidScenarioField,
            "Negative or non-finite slot capacity",
        ));
    }
    if !scenario.wage_per_slot.is_finite() || scenario.wage_per_slot < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidScenarioField,
            "Negative or non-finite wage per slot",
        ));
    }
    if scenario.slots_per_day == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidScenarioField,
            "slots_per_day must be positive",
        ));
    } else if scenario.wage_multipliers.len() != scenario.slots_per_day {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidScenarioField,
            format!(
                "Wage multiplier pattern has {} entries for {} slots per day",
                scenario.wage_multipliers.len(),
                scenario.slots_per_day
            ),
        ));
    }
    if scenario
        .wage_multipliers
        .iter()
        .any(|m| !m.is_finite() || *m < 0.0)
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidScenarioField,
            "Negative or non-finite wage multiplier",
        ));
    }
    if !scenario.late_penalty_rate.is_finite() || scenario.late_penalty_rate < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidScenarioField,
            "Negative or non-finite late penalty rate",
        ));
    }

    if !fitness.alpha_deadline.is_finite() || fitness.alpha_deadline < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidFitnessField,
            "alpha_deadline must be finite and non-negative",
        ));
    }
    if !fitness.beta_late_units.is_finite() || fitness.beta_late_units < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidFitnessField,
            "beta_late_units must be finite and non-negative",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_order(id: &str) -> Order {
        Order::new(id, 10)
            .with_unit_revenue(100.0)
            .with_unit_cost(40.0)
            .with_deadline(5.0)
            .with_unit_time(0.5)
    }

    #[test]
    fn test_valid_input_passes() {
        let orders = vec![valid_order("O1"), valid_order("O2")];
        let scenario = Scenario::new(8.0, 12);
        assert!(validate_input(&orders, &scenario, &FitnessConfig::baseline()).is_ok());
    }

    #[test]
    fn test_duplicate_and_empty_ids() {
        let orders = vec![valid_order("O1"), valid_order("O1"), valid_order("")];
        let scenario = Scenario::new(8.0, 12);
        let errors = validate_input(&orders, &scenario, &FitnessConfig::baseline()).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidId)
                .count(),
            2
        );
    }

    #[test]
    fn test_invalid_order_fields() {
        let mut bad = valid_order("O1");
        bad.units = 0;
        bad.unit_time = 0.0;
        bad.deadline = -1.0;
        let errors =
            validate_input(&[bad], &Scenario::new(8.0, 12), &FitnessConfig::baseline())
                .unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidOrderField)
                .count(),
            3
        );
    }

    #[test]
    fn test_wage_pattern_length_mismatch() {
        let mut scenario = Scenario::new(8.0, 12);
        scenario.slots_per_day = 6;
        scenario.wage_multipliers = vec![1.0, 1.1];
        let errors = validate_input(&[], &scenario, &FitnessConfig::baseline()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidScenarioField));
    }

    #[test]
    fn test_zero_capacity_and_horizon_are_valid() {
        let scenario = Scenario::new(0.0, 0);
        assert!(validate_input(&[], &scenario, &FitnessConfig::baseline()).is_ok());
    }

    #[test]
    fn test_negative_fitness_coefficients_rejected() {
        let fitness = FitnessConfig {
            alpha_deadline: -0.5,
            beta_late_units: f64::NAN,
        };
        let errors = validate_input(&[], &Scenario::new(8.0, 12), &fitness).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
