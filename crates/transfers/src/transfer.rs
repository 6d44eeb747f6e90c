use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use supplytrack_core::{DomainResult, Entity, EntityKind, ItemId, TransferId, Validator};
use supplytrack_inventory::StockMovement;

use crate::status::{TransferStatus, TransferType};

/// Entity: Transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    id: TransferId,
    #[serde(rename = "type")]
    transfer_type: TransferType,
    item_id: ItemId,
    quantity: u64,
    from: Option<String>,
    to: Option<String>,
    notes: Option<String>,
    status: TransferStatus,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Payload: create a transfer. `id` is generated when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewTransfer {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub transfer_type: TransferType,
    pub item_id: String,
    pub quantity: u64,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<TransferStatus>,
}

impl NewTransfer {
    pub fn new(transfer_type: TransferType, item_id: impl Into<String>, quantity: u64) -> Self {
        Self {
            id: None,
            transfer_type,
            item_id: item_id.into(),
            quantity,
            from: None,
            to: None,
            notes: None,
            status: None,
        }
    }

    pub fn with_status(mut self, status: TransferStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Structural checks; whether `item_id` exists is the store's concern.
    pub fn validate(&self) -> DomainResult<()> {
        let mut v = Validator::new();
        if let Some(id) = &self.id {
            v.require_non_blank("id", id);
        }
        v.require_non_blank("itemId", &self.item_id)
            .check(self.quantity > 0, "quantity", "must be positive")
            .check(
                self.status.is_none_or(TransferStatus::is_initial),
                "status",
                "must be pending or pending_approval",
            )
            .finish()
    }
}

impl Transfer {
    /// Build a transfer from a validated payload under an already-chosen id.
    pub fn create(id: TransferId, new: NewTransfer, now: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;

        Ok(Self {
            id,
            transfer_type: new.transfer_type,
            item_id: ItemId::from(new.item_id),
            quantity: new.quantity,
            from: new.from,
            to: new.to,
            notes: new.notes,
            status: new.status.unwrap_or(TransferStatus::Pending),
            created_at: now,
            last_updated: now,
            completed_at: None,
        })
    }

    pub fn transfer_type(&self) -> TransferType {
        self.transfer_type
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn from_party(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn to_party(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn status(&self) -> TransferStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Stock change this transfer causes once completed.
    pub fn movement(&self) -> StockMovement {
        self.transfer_type.movement(self.quantity)
    }

    /// Move to `next` if the transition table allows it.
    ///
    /// `completed_at` is stamped only when entering `completed`; it is never
    /// cleared. Reconciling stock is the caller's job: the store transitions a
    /// copy and keeps it only once the item has been updated.
    pub fn transition(&mut self, next: TransferStatus, now: DateTime<Utc>) -> DomainResult<()> {
        self.status.ensure_transition(next)?;

        self.status = next;
        self.last_updated = now;
        if next == TransferStatus::Completed {
            self.completed_at = Some(now);
        }
        Ok(())
    }
}

impl Entity for Transfer {
    type Id = TransferId;

    const KIND: EntityKind = EntityKind::Transfer;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Equality filters for listing transfers.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TransferFilter {
    pub status: Option<TransferStatus>,
    pub transfer_type: Option<TransferType>,
}

impl TransferFilter {
    pub fn matches(&self, transfer: &Transfer) -> bool {
        self.status.is_none_or(|s| s == transfer.status)
            && self.transfer_type.is_none_or(|t| t == transfer.transfer_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use supplytrack_core::DomainError;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn test_transfer(status: TransferStatus) -> Transfer {
        Transfer::create(
            TransferId::from("T-1"),
            NewTransfer::new(TransferType::Outgoing, "SKU-1", 4).with_status(status),
            test_time(),
        )
        .unwrap()
    }

    #[test]
    fn create_defaults_to_pending() {
        let transfer = Transfer::create(
            TransferId::from("T-1"),
            NewTransfer::new(TransferType::Incoming, "SKU-1", 2),
            test_time(),
        )
        .unwrap();
        assert_eq!(transfer.status(), TransferStatus::Pending);
        assert_eq!(transfer.completed_at(), None);
        assert_eq!(transfer.movement(), StockMovement::Incoming(2));
    }

    #[test]
    fn create_rejects_zero_quantity_and_non_initial_status() {
        let new = NewTransfer::new(TransferType::Outgoing, "", 0).with_status(TransferStatus::Completed);
        match new.validate().unwrap_err() {
            DomainError::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["itemId", "quantity", "status"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn completing_stamps_completed_at_once() {
        let mut transfer = test_transfer(TransferStatus::Pending);
        let done_at = transfer.created_at() + Duration::minutes(3);

        transfer.transition(TransferStatus::Completed, done_at).unwrap();
        assert_eq!(transfer.status(), TransferStatus::Completed);
        assert_eq!(transfer.completed_at(), Some(done_at));

        let err = transfer
            .transition(TransferStatus::Completed, done_at + Duration::minutes(1))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(transfer.completed_at(), Some(done_at));
    }

    #[test]
    fn non_completing_transitions_leave_completed_at_alone() {
        let mut transfer = test_transfer(TransferStatus::PendingApproval);
        transfer.transition(TransferStatus::Accepted, test_time()).unwrap();
        assert_eq!(transfer.completed_at(), None);

        transfer.transition(TransferStatus::Declined, test_time()).unwrap();
        assert_eq!(transfer.completed_at(), None);
        assert!(transfer.status().is_terminal());
    }

    #[test]
    fn filter_matches_exact_status_only() {
        let pending = test_transfer(TransferStatus::Pending);
        let awaiting = test_transfer(TransferStatus::PendingApproval);
        let filter = TransferFilter {
            status: Some(TransferStatus::Pending),
            transfer_type: None,
        };
        assert!(filter.matches(&pending));
        assert!(!filter.matches(&awaiting));

        let by_type = TransferFilter {
            status: None,
            transfer_type: Some(TransferType::Incoming),
        };
        assert!(!by_type.matches(&pending));
    }

    #[test]
    fn new_transfer_reads_type_key() {
        let new: NewTransfer = serde_json::from_value(serde_json::json!({
            "type": "outgoing",
            "itemId": "SKU-1",
            "quantity": 4,
            "status": "pending"
        }))
        .unwrap();
        assert_eq!(new.transfer_type, TransferType::Outgoing);
        assert_eq!(new.status, Some(TransferStatus::Pending));
    }

    #[test]
    fn party_labels_and_notes_are_kept() {
        let new: NewTransfer = serde_json::from_value(serde_json::json!({
            "type": "outgoing",
            "itemId": "SKU-1",
            "quantity": 4,
            "from": "Warehouse A",
            "to": "Acme Corp",
            "notes": "fragile"
        }))
        .unwrap();
        let transfer = Transfer::create(TransferId::from("T-1"), new, test_time()).unwrap();

        assert_eq!(transfer.from_party(), Some("Warehouse A"));
        assert_eq!(transfer.to_party(), Some("Acme Corp"));
        assert_eq!(transfer.notes(), Some("fragile"));

        let json = serde_json::to_value(&transfer).unwrap();
        assert_eq!(json["notes"], "fragile");
        assert_eq!(json["from"], "Warehouse A");
    }
}
