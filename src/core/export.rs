//! Export formatting for settling up in Splitwise.
//!
//! Projects the reconciled totals into the list of exact amounts someone types
//! into Splitwise's "split by exact amounts" form, and renders it as plain text
//! that can be pasted or copied to the clipboard.

use crate::core::{
    bill::BillState,
    rounding::format_money,
    totals::compute_totals,
};
use serde::Serialize;

/// Header line of the export text.
pub const EXPORT_HEADER: &str = "Splitwise Split";
/// Instruction line placed before the per-person amounts.
pub const EXPORT_INSTRUCTIONS: &str = "Enter in Splitwise as \"Split by exact amounts\":";
/// Payer name used when the payer id does not resolve.
pub const UNKNOWN_PAYER: &str = "Unknown";

/// One person's exact amount for the settlement tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitwiseShare {
    /// Person display name
    pub name: String,
    /// Final reconciled amount owed
    pub amount: f64,
}

/// Everything the export text needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitwiseOutput {
    /// People with a positive share, largest first
    pub shares: Vec<SplitwiseShare>,
    /// Bill grand total
    pub grand_total: f64,
    /// Display name of whoever paid
    pub payer_name: String,
}

/// Builds the sorted list of positive shares for `state`.
///
/// People who owe nothing are left out. Shares are ordered by amount, largest
/// first; equal amounts keep the order people appear in the bill.
#[must_use]
pub fn build_splitwise_shares(state: &BillState) -> SplitwiseOutput {
    let totals = compute_totals(state);

    let mut shares: Vec<SplitwiseShare> = totals
        .person_totals
        .into_iter()
        .filter(|person| person.total > 0.0)
        .map(|person| SplitwiseShare {
            name: person.name,
            amount: person.total,
        })
        .collect();
    // Stable sort keeps people order for equal amounts
    shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    let payer_name = state
        .person_name(&state.payer_id)
        .unwrap_or(UNKNOWN_PAYER)
        .to_string();

    SplitwiseOutput {
        shares,
        grand_total: totals.grand_total,
        payer_name,
    }
}

/// Renders the export as fixed-format text.
///
/// ```text
/// Splitwise Split
/// Total: $15.00
/// Paid by: Alice
/// Enter in Splitwise as "Split by exact amounts":
/// Alice: $5.00
/// Bob: $5.00
/// Cara: $5.00
/// ```
#[must_use]
pub fn generate_splitwise_text(output: &SplitwiseOutput) -> String {
    let mut lines = vec![
        EXPORT_HEADER.to_string(),
        format!("Total: {}", format_money(output.grand_total)),
        format!("Paid by: {}", output.payer_name),
        EXPORT_INSTRUCTIONS.to_string(),
    ];
    lines.extend(
        output
            .shares
            .iter()
            .map(|share| format!("{}: {}", share.name, format_money(share.amount))),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{
        bill::{Item, PersonId},
        rounding::to_cents,
    };
    use crate::test_utils::{bill_with_people, dinner_bill};

    fn assert_shares_cover_total(output: &SplitwiseOutput) {
        let sum: i64 = output.shares.iter().map(|s| to_cents(s.amount)).sum();
        assert_eq!(sum, to_cents(output.grand_total));
    }

    #[test]
    fn test_shares_sorted_descending_and_positive() {
        let output = build_splitwise_shares(&dinner_bill());
        assert!(output.shares.iter().all(|s| s.amount > 0.0));
        assert!(
            output
                .shares
                .windows(2)
                .all(|pair| pair[0].amount >= pair[1].amount)
        );
        assert_shares_cover_total(&output);
        assert_eq!(output.shares[0].name, "Cara");
        assert_eq!(output.payer_name, "Alice");
    }

    #[test]
    fn test_person_with_nothing_is_left_out() {
        let mut bill = bill_with_people(&["p1", "p2", "p3"]);
        bill.add_item(Item::new("i1", "Fries", 6.0, &["p1", "p2"]))
            .unwrap();

        let output = build_splitwise_shares(&bill);
        let names: Vec<&str> = output.shares.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["P1", "P2"]);
        assert_eq!(output.grand_total, 6.0);
        assert_shares_cover_total(&output);
    }

    #[test]
    fn test_equal_amounts_keep_people_order() {
        let mut bill = bill_with_people(&["b", "a", "c"]);
        bill.add_item(Item::new("i1", "Pizza", 12.0, &["c", "a", "b"]))
            .unwrap();
        bill.set_overall_tax(3.0).unwrap();

        let output = build_splitwise_shares(&bill);
        let names: Vec<&str> = output.shares.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert!(output.shares.iter().all(|s| s.amount == 5.0));
        assert_shares_cover_total(&output);
    }

    #[test]
    fn test_unknown_payer_falls_back() {
        let mut bill = bill_with_people(&["p1"]);
        bill.payer_id = PersonId::new("ghost");
        let output = build_splitwise_shares(&bill);
        assert_eq!(output.payer_name, UNKNOWN_PAYER);
    }

    #[test]
    fn test_generate_text_format() {
        let mut bill = bill_with_people(&["alice", "bob", "cara"]);
        bill.add_item(Item::new("i1", "Pizza", 12.0, &["alice", "bob", "cara"]))
            .unwrap();
        bill.add_item(Item::new("i2", "Soda", 2.0, &["bob"])).unwrap();
        bill.set_overall_tax(3.5).unwrap();

        let text = generate_splitwise_text(&build_splitwise_shares(&bill));
        let expected = "Splitwise Split\n\
                        Total: $17.50\n\
                        Paid by: ALICE\n\
                        Enter in Splitwise as \"Split by exact amounts\":\n\
                        BOB: $7.50\n\
                        ALICE: $5.00\n\
                        CARA: $5.00";
        assert_eq!(text, expected);
        assert_shares_cover_total(&build_splitwise_shares(&bill));
    }

    #[test]
    fn test_generate_text_without_shares() {
        let output = SplitwiseOutput {
            shares: Vec::new(),
            grand_total: 0.0,
            payer_name: "Alice".to_string(),
        };
        let text = generate_splitwise_text(&output);
        assert_eq!(text.lines().count(), 4);
        assert!(text.ends_with("exact amounts\":"));
    }
}
