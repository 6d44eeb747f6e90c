use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use supplytrack_core::{DomainError, DomainResult, Entity, EntityKind, ItemId, Validator};

use crate::movement::StockMovement;

/// Informational stock status.
///
/// Set by operators; never derived from the quantity.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    #[default]
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

/// Entity: InventoryItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    category: Option<String>,
    location: Option<String>,
    quantity: u64,
    status: ItemStatus,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

/// Payload: create an inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewInventoryItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub quantity: u64,
    #[serde(default)]
    pub status: ItemStatus,
}

impl NewInventoryItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            location: None,
            quantity,
            status: ItemStatus::default(),
        }
    }
}

/// Payload: partial update. Only mutable fields are listed.
///
/// `category` and `location` are cleared by sending `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InventoryItemPatch {
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "supplytrack_core::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "supplytrack_core::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<Option<String>>,
    pub quantity: Option<u64>,
    pub status: Option<ItemStatus>,
}

impl InventoryItem {
    /// Build a new item from a validated payload, stamping both timestamps.
    pub fn create(new: NewInventoryItem, now: DateTime<Utc>) -> DomainResult<Self> {
        Validator::new()
            .require_non_blank("id", &new.id)
            .require_non_blank("name", &new.name)
            .finish()?;

        Ok(Self {
            id: ItemId::from(new.id),
            name: new.name,
            category: new.category,
            location: new.location,
            quantity: new.quantity,
            status: new.status,
            created_at: now,
            last_updated: now,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Keep the original creation time when an item is replaced wholesale.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Shallow-merge a patch and refresh `last_updated`.
    pub fn apply_patch(&mut self, patch: InventoryItemPatch, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(name) = &patch.name {
            Validator::new().require_non_blank("name", name).finish()?;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.last_updated = now;
        Ok(())
    }

    /// Quantity the item would hold after `movement`, without mutating.
    pub fn quantity_after(&self, movement: StockMovement) -> DomainResult<u64> {
        match movement {
            StockMovement::Incoming(q) => self.quantity.checked_add(q).ok_or_else(|| {
                DomainError::invariant(format!("stock overflow for item {}", self.id))
            }),
            StockMovement::Outgoing(q) => {
                self.quantity
                    .checked_sub(q)
                    .ok_or_else(|| DomainError::InsufficientQuantity {
                        item_id: self.id.to_string(),
                        available: self.quantity,
                        requested: q,
                    })
            }
        }
    }

    /// Apply a stock movement. On error the item is left untouched.
    pub fn apply_movement(&mut self, movement: StockMovement, now: DateTime<Utc>) -> DomainResult<()> {
        self.quantity = self.quantity_after(movement)?;
        self.last_updated = now;
        Ok(())
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    const KIND: EntityKind = EntityKind::Inventory;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn test_item(quantity: u64) -> InventoryItem {
        InventoryItem::create(NewInventoryItem::new("SKU-1", "Widget", quantity), test_time()).unwrap()
    }

    #[test]
    fn create_stamps_both_timestamps() {
        let now = test_time();
        let item = InventoryItem::create(NewInventoryItem::new("SKU-1", "Widget", 10), now).unwrap();
        assert_eq!(item.id().as_str(), "SKU-1");
        assert_eq!(item.quantity(), 10);
        assert_eq!(item.status(), ItemStatus::InStock);
        assert_eq!(item.created_at(), now);
        assert_eq!(item.last_updated(), now);
    }

    #[test]
    fn create_rejects_blank_id_and_name() {
        let err = InventoryItem::create(NewInventoryItem::new(" ", "", 1), test_time()).unwrap_err();
        match err {
            DomainError::Validation(fields) => assert_eq!(fields.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn outgoing_movement_below_zero_is_rejected_without_mutation() {
        let mut item = test_item(3);
        let before = item.clone();

        let err = item
            .apply_movement(StockMovement::Outgoing(4), test_time() + Duration::seconds(1))
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::InsufficientQuantity {
                item_id: "SKU-1".to_string(),
                available: 3,
                requested: 4,
            }
        );
        assert_eq!(item, before);
    }

    #[test]
    fn movements_refresh_last_updated() {
        let mut item = test_item(10);
        let later = item.last_updated() + Duration::minutes(1);

        item.apply_movement(StockMovement::Incoming(5), later).unwrap();
        assert_eq!(item.quantity(), 15);
        assert_eq!(item.last_updated(), later);
    }

    #[test]
    fn status_is_not_derived_from_quantity() {
        let mut item = test_item(1);
        item.apply_movement(StockMovement::Outgoing(1), test_time()).unwrap();
        assert_eq!(item.quantity(), 0);
        assert_eq!(item.status(), ItemStatus::InStock);
    }

    #[test]
    fn patch_merges_only_supplied_fields() {
        let mut item = test_item(10);
        let later = item.last_updated() + Duration::minutes(1);

        item.apply_patch(
            InventoryItemPatch {
                location: Some(Some("Dock 4".to_string())),
                status: Some(ItemStatus::OnHold),
                ..InventoryItemPatch::default()
            },
            later,
        )
        .unwrap();

        assert_eq!(item.name(), "Widget");
        assert_eq!(item.location(), Some("Dock 4"));
        assert_eq!(item.status(), ItemStatus::OnHold);
        assert_eq!(item.quantity(), 10);
        assert_eq!(item.last_updated(), later);
    }

    #[test]
    fn null_in_patch_clears_optional_fields() {
        let mut item = test_item(10);
        item.apply_patch(
            InventoryItemPatch {
                category: Some(Some("Parts".to_string())),
                location: Some(Some("Dock 4".to_string())),
                ..InventoryItemPatch::default()
            },
            test_time(),
        )
        .unwrap();

        let patch: InventoryItemPatch =
            serde_json::from_value(serde_json::json!({ "location": null })).unwrap();
        item.apply_patch(patch, test_time()).unwrap();

        assert_eq!(item.category(), Some("Parts"));
        assert_eq!(item.location(), None);
    }

    #[test]
    fn patch_rejects_unknown_keys() {
        let res: Result<InventoryItemPatch, _> =
            serde_json::from_value(serde_json::json!({ "id": "SKU-2" }));
        assert!(res.is_err());
    }

    #[test]
    fn status_uses_display_labels_on_the_wire() {
        let json = serde_json::to_value(ItemStatus::OutOfStock).unwrap();
        assert_eq!(json, serde_json::json!("Out of Stock"));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: stock equals the start quantity plus every accepted
        /// movement, and rejected movements change nothing.
        #[test]
        fn stock_is_conserved_across_movements(
            start in 0u64..1_000,
            moves in prop::collection::vec((any::<bool>(), 1u64..500), 1..40)
        ) {
            let mut item = test_item(start);
            let mut expected = start as i128;

            for (incoming, q) in moves {
                let movement = if incoming {
                    StockMovement::Incoming(q)
                } else {
                    StockMovement::Outgoing(q)
                };

                let before = item.quantity();
                match item.apply_movement(movement, test_time()) {
                    Ok(()) => {
                        expected += if incoming { q as i128 } else { -(q as i128) };
                    }
                    Err(DomainError::InsufficientQuantity { available, requested, .. }) => {
                        prop_assert!(!incoming);
                        prop_assert_eq!(available, before);
                        prop_assert_eq!(requested, q);
                        prop_assert_eq!(item.quantity(), before);
                    }
                    Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                }

                prop_assert!(expected >= 0);
                prop_assert_eq!(item.quantity() as i128, expected);
            }
        }
    }
}
