//! Dashboard statistics, recomputed from the store on every request.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use supplytrack_core::{DomainError, DomainResult};
use supplytrack_ledger::{ContractStatus, TransactionStatus};
use supplytrack_transfers::TransferStatus;

use crate::store::StoreState;

/// Aggregate snapshot. All counts are zero over an empty store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Sum of quantities across every inventory item.
    pub total_inventory: u64,
    /// Transfers still waiting in `pending` or `pending_approval`.
    pub pending_transfers: usize,
    /// Transfers completed on the current calendar day.
    pub completed_today: usize,
    pub total_items: usize,
    pub active_contracts: usize,
    pub completed_transactions: usize,
}

impl Statistics {
    /// "Today" is the calendar date of `now` in `tz`; a transfer finished at
    /// 23:59 yesterday does not count, even one minute later.
    ///
    /// A total stock count that does not fit in `u64` is an invariant
    /// violation, the same as an overflowing movement on a single item.
    pub(crate) fn aggregate<Tz: TimeZone>(
        state: &StoreState,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> DomainResult<Self> {
        let today = now.with_timezone(tz).date_naive();
        let total_inventory = state
            .items
            .iter()
            .try_fold(0u64, |acc, item| acc.checked_add(item.quantity()))
            .ok_or_else(|| DomainError::invariant("total inventory overflows u64"))?;

        Ok(Self {
            total_inventory,
            pending_transfers: state
                .transfers
                .iter()
                .filter(|t| {
                    matches!(
                        t.status(),
                        TransferStatus::Pending | TransferStatus::PendingApproval
                    )
                })
                .count(),
            completed_today: state
                .transfers
                .iter()
                .filter_map(|t| t.completed_at())
                .filter(|at| at.with_timezone(tz).date_naive() == today)
                .count(),
            total_items: state.items.len(),
            active_contracts: state
                .contracts
                .iter()
                .filter(|c| c.status() == ContractStatus::Active)
                .count(),
            completed_transactions: state
                .transactions
                .iter()
                .filter(|t| t.status() == TransactionStatus::Completed)
                .count(),
        })
    }
}
