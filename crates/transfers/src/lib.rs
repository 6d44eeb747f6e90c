//! Transfer domain module.
//!
//! A transfer records the intent to move a quantity of one inventory item
//! between two parties. This crate owns the transfer entity and its status
//! rules; applying the stock change is the store's job.

pub mod status;
pub mod transfer;

pub use status::{TransferStatus, TransferType};
pub use transfer::{NewTransfer, Transfer, TransferFilter};
