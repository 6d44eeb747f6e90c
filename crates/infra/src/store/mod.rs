//! Authoritative in-memory entity store.
//!
//! One `EntityStore` is built at process start and shared (`Arc`) with every
//! request handler. All tables sit behind a single mutex: each operation,
//! including the read-modify-write of a transfer completion, runs to
//! completion before the next one starts.

mod reconciler;
mod table;

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Local, TimeZone};

use supplytrack_core::{
    Clock, ContractId, DomainError, DomainResult, Entity, EntityKind, IdSequence, ItemId,
    SystemClock, TransactionId, TransferId, UserId,
};
use supplytrack_inventory::{InventoryItem, InventoryItemPatch, NewInventoryItem};
use supplytrack_ledger::{
    ContractFilter, NewSmartContract, NewTransaction, SmartContract, SmartContractPatch,
    Transaction, TransactionFilter,
};
use supplytrack_parties::{NewUser, User};
use supplytrack_transfers::{NewTransfer, Transfer, TransferFilter, TransferStatus};

use crate::statistics::Statistics;

pub use table::Table;

#[derive(Debug)]
pub(crate) struct StoreState {
    pub(crate) users: Table<User>,
    pub(crate) items: Table<InventoryItem>,
    pub(crate) transfers: Table<Transfer>,
    pub(crate) transactions: Table<Transaction>,
    pub(crate) contracts: Table<SmartContract>,
    transfer_ids: IdSequence,
    transaction_ids: IdSequence,
    contract_ids: IdSequence,
}

impl StoreState {
    fn new() -> Self {
        Self {
            users: Table::new(),
            items: Table::new(),
            transfers: Table::new(),
            transactions: Table::new(),
            contracts: Table::new(),
            transfer_ids: IdSequence::transfers(),
            transaction_ids: IdSequence::transactions(),
            contract_ids: IdSequence::contracts(),
        }
    }
}

/// Use the caller's id if it is free, otherwise draw the next generated one.
fn resolve_id(
    explicit: Option<String>,
    sequence: &mut IdSequence,
    kind: EntityKind,
    taken: impl Fn(&str) -> bool,
) -> DomainResult<String> {
    match explicit {
        Some(id) if taken(&id) => Err(DomainError::conflict(format!("{kind} {id} already exists"))),
        Some(id) => Ok(id),
        None => Ok(sequence.next_free(taken)),
    }
}

fn not_found<E: Entity>() -> DomainError {
    DomainError::not_found(E::KIND)
}

/// In-memory store for users, inventory, transfers, transactions and contracts.
pub struct EntityStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::new()),
            clock,
        }
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|_| DomainError::unavailable("entity store lock poisoned"))
    }

    // -------------------------
    // Users
    // -------------------------

    pub fn get_user(&self, id: &UserId) -> DomainResult<User> {
        self.lock()?.users.get(id).cloned().ok_or_else(not_found::<User>)
    }

    pub fn list_users(&self) -> DomainResult<Vec<User>> {
        Ok(self.lock()?.users.iter().cloned().collect())
    }

    pub fn create_user(&self, new: NewUser) -> DomainResult<User> {
        let user = User::create(new, self.clock.now())?;
        let mut state = self.lock()?;
        if state.users.contains(user.id()) {
            return Err(DomainError::conflict(format!("user {} already exists", user.id())));
        }

        tracing::info!(user_id = %user.id(), "user created");
        Ok(state.users.upsert(user).clone())
    }

    // -------------------------
    // Inventory
    // -------------------------

    pub fn get_inventory_item(&self, id: &ItemId) -> DomainResult<InventoryItem> {
        self.lock()?
            .items
            .get(id)
            .cloned()
            .ok_or_else(not_found::<InventoryItem>)
    }

    pub fn list_inventory_items(&self) -> DomainResult<Vec<InventoryItem>> {
        Ok(self.lock()?.items.iter().cloned().collect())
    }

    /// Insert a new item. An id that is already stocked is a conflict.
    pub fn create_inventory_item(&self, new: NewInventoryItem) -> DomainResult<InventoryItem> {
        let item = InventoryItem::create(new, self.clock.now())?;
        let mut state = self.lock()?;
        if state.items.contains(item.id()) {
            return Err(DomainError::conflict(format!(
                "inventory item {} already exists",
                item.id()
            )));
        }

        tracing::info!(item_id = %item.id(), quantity = item.quantity(), "inventory item created");
        Ok(state.items.upsert(item).clone())
    }

    /// Insert or wholesale replace an item. A replaced item keeps its
    /// original `created_at`.
    pub fn upsert_inventory_item(&self, new: NewInventoryItem) -> DomainResult<InventoryItem> {
        let mut item = InventoryItem::create(new, self.clock.now())?;
        let mut state = self.lock()?;
        if let Some(existing) = state.items.get(item.id()) {
            item = item.with_created_at(existing.created_at());
            tracing::info!(item_id = %item.id(), quantity = item.quantity(), "inventory item replaced");
        } else {
            tracing::info!(item_id = %item.id(), quantity = item.quantity(), "inventory item created");
        }
        Ok(state.items.upsert(item).clone())
    }

    pub fn update_inventory_item(
        &self,
        id: &ItemId,
        patch: InventoryItemPatch,
    ) -> DomainResult<InventoryItem> {
        let now = self.clock.now();
        let mut state = self.lock()?;
        let mut item = state.items.get(id).cloned().ok_or_else(not_found::<InventoryItem>)?;
        item.apply_patch(patch, now)?;

        tracing::info!(item_id = %id, quantity = item.quantity(), "inventory item updated");
        Ok(state.items.upsert(item).clone())
    }

    // -------------------------
    // Transfers
    // -------------------------

    pub fn get_transfer(&self, id: &TransferId) -> DomainResult<Transfer> {
        self.lock()?
            .transfers
            .get(id)
            .cloned()
            .ok_or_else(not_found::<Transfer>)
    }

    pub fn list_transfers(&self, filter: TransferFilter) -> DomainResult<Vec<Transfer>> {
        Ok(self
            .lock()?
            .transfers
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }

    /// Record a new transfer against an existing item. Stock is not touched
    /// until the transfer completes.
    pub fn create_transfer(&self, mut new: NewTransfer) -> DomainResult<Transfer> {
        new.validate()?;
        let now = self.clock.now();

        let mut state = self.lock()?;
        let StoreState {
            items,
            transfers,
            transfer_ids,
            ..
        } = &mut *state;

        if !items.contains(&ItemId::from(new.item_id.as_str())) {
            return Err(not_found::<InventoryItem>());
        }

        let id = resolve_id(new.id.take(), transfer_ids, EntityKind::Transfer, |id| {
            transfers.contains(&TransferId::from(id))
        })?;
        let transfer = Transfer::create(TransferId::from(id), new, now)?;

        tracing::info!(
            transfer_id = %transfer.id(),
            item_id = %transfer.item_id(),
            transfer_type = %transfer.transfer_type(),
            quantity = transfer.quantity(),
            status = %transfer.status(),
            "transfer created"
        );
        Ok(transfers.upsert(transfer).clone())
    }

    /// Transfer state machine entry point.
    ///
    /// Moving into `completed` reconciles the referenced item first; if that
    /// fails, neither the transfer nor the item changes.
    pub fn set_transfer_status(
        &self,
        id: &TransferId,
        next: TransferStatus,
    ) -> DomainResult<Transfer> {
        let now = self.clock.now();
        let mut state = self.lock()?;
        let StoreState {
            items, transfers, ..
        } = &mut *state;

        let mut transfer = transfers.get(id).cloned().ok_or_else(not_found::<Transfer>)?;
        let previous = transfer.status();

        let outcome = transfer.transition(next, now).and_then(|()| {
            if next == TransferStatus::Completed {
                reconciler::apply_transfer(items, &transfer, now).map(|_| ())
            } else {
                Ok(())
            }
        });

        if let Err(e) = outcome {
            tracing::warn!(transfer_id = %id, from = %previous, to = %next, error = %e, "transfer status change rejected");
            return Err(e);
        }

        tracing::info!(transfer_id = %id, from = %previous, to = %next, "transfer status changed");
        Ok(transfers.upsert(transfer).clone())
    }

    // -------------------------
    // Transactions
    // -------------------------

    pub fn get_transaction(&self, id: &TransactionId) -> DomainResult<Transaction> {
        self.lock()?
            .transactions
            .get(id)
            .cloned()
            .ok_or_else(not_found::<Transaction>)
    }

    pub fn list_transactions(&self, filter: TransactionFilter) -> DomainResult<Vec<Transaction>> {
        Ok(self
            .lock()?
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }

    pub fn create_transaction(&self, mut new: NewTransaction) -> DomainResult<Transaction> {
        new.validate()?;
        let now = self.clock.now();

        let mut state = self.lock()?;
        let StoreState {
            transactions,
            transaction_ids,
            ..
        } = &mut *state;

        let id = resolve_id(new.id.take(), transaction_ids, EntityKind::Transaction, |id| {
            transactions.contains(&TransactionId::from(id))
        })?;
        let tx = Transaction::create(TransactionId::from(id), new, now)?;

        tracing::info!(transaction_id = %tx.id(), amount = tx.amount(), "transaction recorded");
        Ok(transactions.upsert(tx).clone())
    }

    // -------------------------
    // Smart contracts
    // -------------------------

    pub fn get_contract(&self, id: &ContractId) -> DomainResult<SmartContract> {
        self.lock()?
            .contracts
            .get(id)
            .cloned()
            .ok_or_else(not_found::<SmartContract>)
    }

    pub fn list_contracts(&self, filter: ContractFilter) -> DomainResult<Vec<SmartContract>> {
        Ok(self
            .lock()?
            .contracts
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    pub fn create_contract(&self, mut new: NewSmartContract) -> DomainResult<SmartContract> {
        new.validate()?;
        let now = self.clock.now();

        let mut state = self.lock()?;
        let StoreState {
            contracts,
            contract_ids,
            ..
        } = &mut *state;

        let id = resolve_id(new.id.take(), contract_ids, EntityKind::Contract, |id| {
            contracts.contains(&ContractId::from(id))
        })?;
        let contract = SmartContract::create(ContractId::from(id), new, now)?;

        tracing::info!(contract_id = %contract.id(), "smart contract created");
        Ok(contracts.upsert(contract).clone())
    }

    pub fn update_contract(
        &self,
        id: &ContractId,
        patch: SmartContractPatch,
    ) -> DomainResult<SmartContract> {
        let now = self.clock.now();
        let mut state = self.lock()?;
        let mut contract = state
            .contracts
            .get(id)
            .cloned()
            .ok_or_else(not_found::<SmartContract>)?;
        contract.apply_patch(patch, now)?;

        tracing::info!(contract_id = %id, status = contract.status().as_str(), "smart contract updated");
        Ok(state.contracts.upsert(contract).clone())
    }

    // -------------------------
    // Statistics
    // -------------------------

    /// Dashboard aggregates, with "today" judged in the server's local time.
    pub fn statistics(&self) -> DomainResult<Statistics> {
        self.statistics_in(&Local)
    }

    pub fn statistics_in<Tz: TimeZone>(&self, tz: &Tz) -> DomainResult<Statistics> {
        let now = self.clock.now();
        let state = self.lock()?;
        Statistics::aggregate(&state, now, tz)
    }
}
