//! `supplytrack-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod patch;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult, EntityKind, FieldViolation, Validator};
pub use id::{ContractId, IdSequence, ItemId, TransactionId, TransferId, UserId};
