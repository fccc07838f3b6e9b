//! Bill validation at the boundary.
//!
//! The allocation engine trusts its input. Callers run `validate_bill` (or
//! `ensure_valid`) on anything that did not come out of the `BillState` editing
//! methods, such as bill files and saved history. `check_completeness` adds
//! warnings for states that are valid but not finished.

use crate::{
    core::bill::BillState,
    errors::{Error, Result},
};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Result of structural validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Human-readable reasons the bill is malformed
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// True when no structural problems were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Structural validation plus warnings about unfinished items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletenessReport {
    /// Structural result; decides validity on its own
    pub validation: ValidationReport,
    /// Things worth fixing before settling up
    pub warnings: Vec<String>,
}

impl CompletenessReport {
    /// True when the bill is valid and nothing is left unfinished.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.validation.is_valid() && self.warnings.is_empty()
    }
}

fn check_money(label: &str, amount: f64, errors: &mut Vec<String>) {
    if !amount.is_finite() {
        errors.push(format!("{label} is not a number"));
    } else if amount < 0.0 {
        errors.push(format!("{label} cannot be negative ({amount})"));
    }
}

/// Checks the structural invariants the engine relies on.
#[must_use]
pub fn validate_bill(state: &BillState) -> ValidationReport {
    let mut errors = Vec::new();

    let mut person_ids = HashSet::new();
    for person in &state.people {
        if person.id.as_str().trim().is_empty() {
            errors.push(format!("Person '{}' has an empty id", person.name));
        } else if !person_ids.insert(&person.id) {
            errors.push(format!("Duplicate person id '{}'", person.id));
        }
    }

    if state.payer_id.as_str().trim().is_empty() {
        errors.push("No payer selected".to_string());
    } else if !person_ids.contains(&state.payer_id) {
        errors.push(format!(
            "Payer '{}' is not one of the people on the bill",
            state.payer_id
        ));
    }

    let mut item_ids = HashSet::new();
    for item in &state.items {
        if !item_ids.insert(&item.id) {
            errors.push(format!("Duplicate item id '{}'", item.id));
        }
        check_money(&format!("Price of '{}'", item.name), item.price, &mut errors);

        let mut seen = HashSet::new();
        for consumer in &item.consumer_ids {
            if !person_ids.contains(consumer) {
                errors.push(format!(
                    "Item '{}' references unknown person '{consumer}'",
                    item.name
                ));
            } else if !seen.insert(consumer) {
                errors.push(format!(
                    "Item '{}' lists person '{consumer}' more than once",
                    item.name
                ));
            }
        }
    }

    check_money("Tax", state.overall_tax, &mut errors);

    debug!(errors = errors.len(), "Validated bill");
    ValidationReport { errors }
}

/// Validates and additionally flags items that are not ready to settle.
///
/// Warnings never make a bill invalid: a free item or one nobody has claimed yet
/// is a normal state while a bill is being entered.
#[must_use]
pub fn check_completeness(state: &BillState) -> CompletenessReport {
    let validation = validate_bill(state);
    let mut warnings = Vec::new();

    if state.items.is_empty() {
        warnings.push("The bill has no items".to_string());
    }
    for item in &state.items {
        if item.price == 0.0 {
            warnings.push(format!("Item '{}' has no price", item.name));
        }
        if item.consumer_ids.is_empty() {
            warnings.push(format!("Nobody is sharing item '{}'", item.name));
        }
    }

    CompletenessReport {
        validation,
        warnings,
    }
}

/// Returns `Error::InvalidBill` with every reason if the bill is malformed.
pub fn ensure_valid(state: &BillState) -> Result<()> {
    let report = validate_bill(state);
    if report.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidBill {
            reasons: report.errors,
        })
    }
}

/// Parses a bill from JSON and validates it.
///
/// Wrong field types and missing required fields fail to parse; structurally
/// inconsistent bills fail validation.
pub fn parse_bill_json(json: &str) -> Result<BillState> {
    let state: BillState = serde_json::from_str(json)?;
    ensure_valid(&state)?;
    Ok(state)
}
