//! Per-person totals and itemized breakdowns.
//!
//! Combines item prices, allocated tax and consumer lists into what each person
//! owes. Running totals are kept at four decimals; the final cent amounts come
//! from the penny reconciler so they add up to the grand total, less whatever
//! part of the bill nobody has claimed.

use crate::core::{
    bill::{BillState, ItemId, PersonAmounts, PersonId},
    reconcile::penny_fix,
    rounding::{round2, round4},
    tax::allocate_item_taxes,
};
use serde::Serialize;
use tracing::{debug, warn};

/// One item's contribution to a person's total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemShare {
    /// Item the share comes from
    pub item_id: ItemId,
    /// Item display name
    pub item_name: String,
    /// This person's share of the item including tax, rounded to the cent
    pub share: f64,
}

/// What one person owes and why
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonTotal {
    /// Person the total belongs to
    pub person_id: PersonId,
    /// Display name
    pub name: String,
    /// Final reconciled amount owed
    pub total: f64,
    /// Per-item contributions in item order
    pub items: Vec<ItemShare>,
}

/// Everything derived from a bill in one pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    /// Sum of pre-tax prices, rounded to the cent
    pub subtotal: f64,
    /// Subtotal plus tax, rounded to the cent
    pub grand_total: f64,
    /// Cost (with tax) of items or shares no person is attached to, rounded to the cent
    pub unallocated: f64,
    /// Running per-person totals at four decimals
    pub per_person_unrounded: PersonAmounts,
    /// Reconciled per-person totals at two decimals
    pub per_person_rounded: PersonAmounts,
    /// Breakdown per person, in people order
    pub person_totals: Vec<PersonTotal>,
}

/// Computes subtotal, grand total and every person's share of `state`.
///
/// Each item's cost (price plus allocated tax) is divided evenly between its
/// consumers. Items nobody consumes add to the totals but to nobody's share,
/// and people who consumed nothing keep a total of zero.
#[must_use]
pub fn compute_totals(state: &BillState) -> Totals {
    let item_taxes = allocate_item_taxes(&state.items, state.overall_tax);
    let subtotal = round2(state.raw_subtotal());
    let grand_total = round2(subtotal + state.overall_tax);

    let mut unrounded: PersonAmounts = state
        .people
        .iter()
        .map(|person| (person.id.clone(), 0.0))
        .collect();
    let mut breakdowns: Vec<Vec<ItemShare>> = vec![Vec::new(); state.people.len()];
    let mut unallocated = 0.0;

    for (item, tax) in state.items.iter().zip(item_taxes) {
        let item_total = item.price + tax;
        if item.consumer_ids.is_empty() {
            debug!(item = %item.id, "Item has no consumers, cost left unallocated");
            unallocated += item_total;
            continue;
        }

        // Cast safety: consumer lists are tiny.
        #[allow(clippy::cast_precision_loss)]
        let share = item_total / item.consumer_ids.len() as f64;

        for consumer in &item.consumer_ids {
            let Some(index) = state.people.iter().position(|p| &p.id == consumer) else {
                warn!(item = %item.id, consumer = %consumer, "Consumer does not resolve to a person");
                unallocated += share;
                continue;
            };
            if let Some(running) = unrounded.get_mut(consumer) {
                *running = round4(*running + share);
            }
            breakdowns[index].push(ItemShare {
                item_id: item.id.clone(),
                item_name: item.name.clone(),
                share: round2(share),
            });
        }
    }

    // Unclaimed cost is reported, not spread over people who did not consume it
    let unallocated = round2(unallocated);
    let allocated_total = round2(grand_total - unallocated);
    let rounded = penny_fix(&unrounded, allocated_total);

    let person_totals = state
        .people
        .iter()
        .zip(breakdowns)
        .map(|(person, items)| PersonTotal {
            person_id: person.id.clone(),
            name: person.name.clone(),
            total: rounded.get(&person.id).unwrap_or(0.0),
            items,
        })
        .collect();

    debug!(
        subtotal,
        grand_total,
        unallocated,
        people = state.people.len(),
        "Computed bill totals"
    );

    Totals {
        subtotal,
        grand_total,
        unallocated,
        per_person_unrounded: unrounded,
        per_person_rounded: rounded,
        person_totals,
    }
}
