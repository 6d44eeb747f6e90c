//! Inventory reconciliation: keeps item quantities consistent with completed
//! transfers.

use chrono::{DateTime, Utc};

use supplytrack_core::{DomainError, DomainResult, EntityKind};
use supplytrack_inventory::InventoryItem;
use supplytrack_transfers::Transfer;

use super::table::Table;

/// Apply the stock movement of a transfer that is being completed.
///
/// Works on a copy of the item and writes it back only on success, so a
/// failure (missing item, insufficient stock) leaves the table untouched.
/// Callers must hold the store lock for the whole status change.
pub(crate) fn apply_transfer<'a>(
    items: &'a mut Table<InventoryItem>,
    transfer: &Transfer,
    now: DateTime<Utc>,
) -> DomainResult<&'a InventoryItem> {
    let mut item = items
        .get(transfer.item_id())
        .cloned()
        .ok_or_else(|| DomainError::not_found(EntityKind::Inventory))?;

    let before = item.quantity();
    item.apply_movement(transfer.movement(), now)?;

    tracing::info!(
        item_id = %transfer.item_id(),
        transfer_type = %transfer.transfer_type(),
        quantity_before = before,
        quantity_after = item.quantity(),
        "inventory reconciled"
    );

    Ok(items.upsert(item))
}
