//! Penny reconciliation.
//!
//! Rounding every person's share to the cent independently can leave the sum a
//! few cents away from the bill's grand total. This module moves whole cents
//! onto the people whose unrounded shares carried the largest sub-cent
//! remainders until the rounded shares add up to the grand total exactly.
//!
//! All arithmetic happens in integer cents; amounts only become `f64` again on
//! the way out.

use crate::core::{
    bill::{PersonAmounts, PersonId},
    rounding::{from_cents, round4, to_cents},
};
use tracing::{debug, trace, warn};

/// Ten-thousandths of a dollar per cent.
const UNITS_PER_CENT: i64 = 100;

/// Sub-cent remainder of an amount, in ten-thousandths of a dollar.
///
/// Equivalent to `|amount - floor(amount * 100) / 100|` measured on the
/// 4-decimal value, so `10.334` yields `40` and `-10.334` yields `60`.
fn sub_cent_remainder(amount: f64) -> i64 {
    // Cast safety: round4 output times 10_000 is integral and well within i64.
    #[allow(clippy::cast_possible_truncation)]
    let units = (round4(amount) * 10_000.0).round() as i64;
    units.rem_euclid(UNITS_PER_CENT)
}

/// Rounds each person's share to the cent so the shares sum to `grand_total`.
///
/// 1. Every amount is rounded to the cent; the discrepancy is the grand total
///    minus the sum of those rounded amounts.
/// 2. With no discrepancy the rounded amounts are returned as they are.
/// 3. Otherwise the people holding a share are ranked by the sub-cent remainder
///    of their unrounded amount, largest first; ties keep their original order.
///    People whose unrounded amount is exactly zero stay at zero.
/// 4. One cent (added for a shortfall, subtracted for an excess) goes to each of
///    the top-ranked people until the discrepancy is used up. Nobody receives
///    more than one cent, so a gap wider than the ranking is left in place.
///
/// The output keeps the entry order of `unrounded`. When the discrepancy is a
/// rounding residue (at most one cent per sharing person) the sum of the output
/// equals `round2(grand_total)` at the cent level. A wider gap means part of the
/// bill was never allocated, which `check_completeness` reports.
#[must_use]
pub fn penny_fix(unrounded: &PersonAmounts, grand_total: f64) -> PersonAmounts {
    let mut cents: Vec<(PersonId, i64)> = unrounded
        .iter()
        .map(|(id, amount)| (id.clone(), to_cents(amount)))
        .collect();

    let naive_sum: i64 = cents.iter().map(|(_, c)| c).sum();
    let discrepancy = to_cents(grand_total) - naive_sum;

    if discrepancy != 0 && !unrounded.is_empty() {
        let mut ranking: Vec<(usize, i64)> = unrounded
            .iter()
            .enumerate()
            .filter(|(_, (_, amount))| *amount != 0.0)
            .map(|(index, (_, amount))| (index, sub_cent_remainder(amount)))
            .collect();
        // sort_by is stable, so equal remainders keep people order
        ranking.sort_by(|a, b| b.1.cmp(&a.1));

        let adjustment = discrepancy.signum();
        let count = usize::try_from(discrepancy.unsigned_abs()).unwrap_or(usize::MAX);
        debug!(
            discrepancy_cents = discrepancy,
            sharing = ranking.len(),
            "Reconciling rounded shares"
        );
        if count > ranking.len() {
            warn!(
                unplaced_cents = count - ranking.len(),
                "Discrepancy exceeds one cent per person, leaving the rest unallocated"
            );
        }

        for (index, _) in ranking.iter().take(count) {
            let (id, amount) = &mut cents[*index];
            *amount += adjustment;
            trace!(person = %id, adjustment, "Applied penny adjustment");
        }
    }

    cents
        .into_iter()
        .map(|(id, c)| (id, from_cents(c)))
        .collect()
}
