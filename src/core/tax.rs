//! Proportional tax allocation.
//!
//! A bill carries one tax figure. Each item's share of it is proportional to the
//! item's pre-tax price and kept at four decimals. The per-item amounts are not
//! renormalized to add up to the exact tax; the penny reconciler restores the
//! end-to-end total at the cent level.

use crate::core::{bill::Item, rounding::round4};

/// Splits `overall_tax` across `items` in proportion to their prices.
///
/// The result is aligned with `items` by position. When the subtotal is zero
/// (no items, or all free) there is nothing to be proportional to and every
/// item gets zero.
#[must_use]
pub fn allocate_item_taxes(items: &[Item], overall_tax: f64) -> Vec<f64> {
    let subtotal: f64 = items.iter().map(|item| item.price).sum();

    if subtotal == 0.0 {
        return vec![0.0; items.len()];
    }

    items
        .iter()
        .map(|item| round4(overall_tax * item.price / subtotal))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    fn priced(prices: &[f64]) -> Vec<Item> {
        prices
            .iter()
            .enumerate()
            .map(|(i, price)| Item::new(format!("i{i}"), format!("Item {i}"), *price, &["p1"]))
            .collect()
    }

    #[test]
    fn test_allocation_is_proportional() {
        let taxes = allocate_item_taxes(&priced(&[10.0, 30.0]), 4.0);
        assert_eq!(taxes, vec![1.0, 3.0]);
    }

    #[test]
    fn test_allocation_keeps_four_decimals() {
        let taxes = allocate_item_taxes(&priced(&[1.0, 1.0, 1.0]), 1.0);
        assert_eq!(taxes, vec![0.3333, 0.3333, 0.3333]);
        // Not renormalized: the per-item amounts fall short of the tax by 0.0001
        let sum: f64 = taxes.iter().sum();
        assert!((sum - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_priced_single_item_gets_zero_tax() {
        let taxes = allocate_item_taxes(&priced(&[0.0]), 5.0);
        assert_eq!(taxes, vec![0.0]);
    }

    #[test]
    fn test_zero_subtotal_gives_all_zero() {
        let taxes = allocate_item_taxes(&priced(&[0.0, 0.0, 0.0]), 12.5);
        assert!(taxes.iter().all(|t| *t == 0.0));
        assert!(allocate_item_taxes(&[], 3.0).is_empty());
    }

    #[test]
    fn test_allocation_sums_to_tax_within_a_cent() {
        let cases: [(&[f64], f64); 4] = [
            (&[12.99, 7.49, 3.25], 2.13),
            (&[0.01, 100.0], 9.99),
            (&[5.55, 5.55, 5.55, 5.55, 5.55, 5.55, 5.55], 3.0),
            (&[19.0, 0.0, 7.5], 0.0),
        ];
        for (prices, tax) in cases {
            let sum: f64 = allocate_item_taxes(&priced(prices), tax).iter().sum();
            assert!((sum - tax).abs() < 0.01, "prices {prices:?} tax {tax} sum {sum}");
        }
    }

    #[test]
    fn test_zero_priced_item_among_others_gets_no_tax() {
        let taxes = allocate_item_taxes(&priced(&[0.0, 20.0]), 2.0);
        assert_eq!(taxes, vec![0.0, 2.0]);
    }
}
