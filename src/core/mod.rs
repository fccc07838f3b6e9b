/// Bill model: people, items, and the editing rules that keep them consistent
pub mod bill;
/// Splitwise share list and export text
pub mod export;
/// Saved split history
pub mod history;
/// Penny reconciliation of rounded shares
pub mod reconcile;
/// Cent and four-decimal rounding
pub mod rounding;
/// Proportional tax allocation
pub mod tax;
/// Per-person totals and breakdowns
pub mod totals;
/// Boundary validation and completeness warnings
pub mod validation;

pub use export::{SplitwiseOutput, SplitwiseShare, build_splitwise_shares, generate_splitwise_text};
pub use reconcile::penny_fix;
pub use tax::allocate_item_taxes;
pub use totals::{PersonTotal, Totals, compute_totals};
