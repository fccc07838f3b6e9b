//! Split history - saving, listing and reloading past splits.
//!
//! A saved split stores the bill itself rather than the computed shares, so a
//! reloaded split always goes back through the same engine. The grand total and
//! payer name are denormalized onto the row for cheap history listings.

use crate::{
    core::{bill::BillState, export::build_splitwise_shares, validation::ensure_valid},
    entities::{Split, split},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Saves a validated bill under `title`.
///
/// # Errors
/// Returns an error if:
/// - The title is empty or whitespace-only (`Error::InvalidTitle`)
/// - The bill fails structural validation
/// - The database insert fails
pub async fn save_split(
    db: &DatabaseConnection,
    title: &str,
    bill: &BillState,
) -> Result<split::Model> {
    if title.trim().is_empty() {
        return Err(Error::InvalidTitle {
            title: title.to_string(),
        });
    }
    ensure_valid(bill)?;

    let output = build_splitwise_shares(bill);
    let split_model = split::ActiveModel {
        title: Set(title.trim().to_string()),
        bill_json: Set(serde_json::to_string(bill)?),
        grand_total: Set(output.grand_total),
        payer_name: Set(output.payer_name),
        people_count: Set(i32::try_from(bill.people.len()).unwrap_or(i32::MAX)),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let saved = split_model.insert(db).await?;
    info!(id = saved.id, title = %saved.title, "Saved split");
    Ok(saved)
}

/// Retrieves all saved splits, newest first.
pub async fn list_splits(db: &DatabaseConnection) -> Result<Vec<split::Model>> {
    Split::find()
        .order_by_desc(split::Column::CreatedAt)
        .order_by_desc(split::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a saved split by its ID, or `None` if it doesn't exist.
pub async fn get_split(db: &DatabaseConnection, split_id: i64) -> Result<Option<split::Model>> {
    Split::find_by_id(split_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Decodes and re-validates the bill stored in a saved split.
pub fn load_bill(saved: &split::Model) -> Result<BillState> {
    let bill: BillState = serde_json::from_str(&saved.bill_json)?;
    ensure_valid(&bill)?;
    Ok(bill)
}

/// Deletes a saved split.
///
/// # Errors
/// Returns `Error::SplitNotFound` if no split has this ID.
pub async fn delete_split(db: &DatabaseConnection, split_id: i64) -> Result<()> {
    let result = Split::delete_by_id(split_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::SplitNotFound { id: split_id });
    }
    debug!(id = split_id, "Deleted split");
    Ok(())
}

/// Deletes every saved split except the `keep` newest, returning how many were removed.
pub async fn prune_history(db: &DatabaseConnection, keep: u64) -> Result<u64> {
    let keep = usize::try_from(keep).unwrap_or(usize::MAX);
    let stale_ids: Vec<i64> = list_splits(db)
        .await?
        .into_iter()
        .skip(keep)
        .map(|s| s.id)
        .collect();

    if stale_ids.is_empty() {
        return Ok(0);
    }

    let result = Split::delete_many()
        .filter(split::Column::Id.is_in(stale_ids))
        .exec(db)
        .await?;
    info!(removed = result.rows_affected, keep, "Pruned split history");
    Ok(result.rows_affected)
}
