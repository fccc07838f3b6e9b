//! Rounding primitives used wherever money is finalized.
//!
//! `round2` produces cents for anything shown to people; `round4` keeps
//! intermediate precision (allocated tax, running per-person totals) without
//! letting floating-point drift accumulate.
//!
//! Rounding itself is done in `Decimal` on the shortest decimal text of the
//! `f64`, so `1.235` rounds as written while a value just below it does not.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const CENTS_PER_DOLLAR: f64 = 100.0;

/// Rounds `value` to `decimals` places, half away from zero.
///
/// `f64`'s `Display` prints the shortest text that reads back to the same
/// value, which is the decimal the amount was entered as. Values `Decimal`
/// cannot hold (non-finite, or beyond its 28 digits) come back unchanged.
fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let Ok(exact) = Decimal::from_str(&value.to_string()) else {
        return value;
    };
    exact
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
        .parse()
        .unwrap_or(value)
}

/// Rounds to the nearest cent, half away from zero.
///
/// `1.235 -> 1.24`, `-1.235 -> -1.24`, `0.005 -> 0.01`, `0.004 -> 0.00`.
#[must_use]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Rounds to four decimal places, half away from zero.
#[must_use]
pub fn round4(value: f64) -> f64 {
    round_to(value, 4)
}

/// Converts a dollar amount to whole cents.
#[must_use]
pub fn to_cents(value: f64) -> i64 {
    // Cast safety: round2 output times 100 is integral; bill amounts are far below i64 range.
    #[allow(clippy::cast_possible_truncation)]
    let cents = (round2(value) * CENTS_PER_DOLLAR).round() as i64;
    cents
}

/// Converts whole cents back to a dollar amount.
#[must_use]
pub fn from_cents(cents: i64) -> f64 {
    // Cast safety: cent counts for a bill are far below 2^52.
    #[allow(clippy::cast_precision_loss)]
    let dollars = cents as f64 / CENTS_PER_DOLLAR;
    dollars
}

/// Formats an amount as `$X.XX`.
#[must_use]
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", round2(amount))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(1.235), 1.24);
        assert_eq!(round2(-1.235), -1.24);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(0.004), 0.0);
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(2.675), 2.68);
    }

    #[test]
    fn test_values_just_below_half_round_down() {
        let below = f64::from_bits(1.235_f64.to_bits() - 1);
        assert_eq!(round2(below), 1.23);
        assert_eq!(round2(-below), -1.23);
        assert_eq!(round4(1.234_449_999_999_999_8), 1.2344);
        assert_eq!(round2(0.004_999_999_999_999_9), 0.0);
    }

    #[test]
    fn test_non_finite_passes_through() {
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
        assert_eq!(round4(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    #[test]
    fn test_round2_leaves_cents_alone() {
        assert_eq!(round2(10.33), 10.33);
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(round2(15.0), 15.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(1.23455), 1.2346);
        assert_eq!(round4(0.00004), 0.0);
        assert_eq!(round4(0.00005), 0.0001);
        assert_eq!(round4(-2.00005), -2.0001);
        assert_eq!(round4(10.333_333_3), 10.3333);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        for value in [1.235, -1.235, 0.005, 3.333_333, 99.995, 12.344_95, 7.0] {
            assert_eq!(round2(round2(value)), round2(value));
            assert_eq!(round4(round4(value)), round4(value));
        }
    }

    #[test]
    fn test_cents_conversion() {
        assert_eq!(to_cents(10.34), 1034);
        assert_eq!(to_cents(0.1 + 0.2), 30);
        assert_eq!(to_cents(-1.235), -124);
        assert_eq!(from_cents(1034), 10.34);
        assert_eq!(from_cents(-1), -0.01);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(5.0), "$5.00");
        assert_eq!(format_money(10.335), "$10.34");
        assert_eq!(format_money(0.0), "$0.00");
    }
}
