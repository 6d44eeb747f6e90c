//! Inventory domain module.
//!
//! This crate contains business rules for inventory items, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod item;
pub mod movement;

pub use item::{InventoryItem, InventoryItemPatch, ItemStatus, NewInventoryItem};
pub use movement::StockMovement;
