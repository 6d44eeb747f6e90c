//! Strongly-typed identifiers used across the domain.
//!
//! All identifiers are human-readable codes (`SKU-1`, `T-4301`, ...), either
//! supplied by the caller or generated by an [`IdSequence`]. Caller-supplied
//! ids are checked by each payload's `Validator` before they are wrapped.

use serde::{Deserialize, Serialize};

/// Identifier of an inventory item (externally assigned SKU-style code).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// Identifier of a transfer (`T-<n>` when generated).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferId(String);

/// Identifier of a financial transaction (`TX-<n>` when generated).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

/// Identifier of a smart contract record (`SC-<n>` when generated).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(String);

/// Identifier of a user (actor identity).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

macro_rules! impl_string_id {
    ($t:ty) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_string_id!(ItemId);
impl_string_id!(TransferId);
impl_string_id!(TransactionId);
impl_string_id!(ContractId);
impl_string_id!(UserId);

/// Per-kind monotonically increasing id generator.
///
/// `last` is the most recently issued (or seeded) value, so the first call to
/// [`IdSequence::next_id`] yields `seed + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    prefix: &'static str,
    last: u64,
}

impl IdSequence {
    pub const TRANSFER_SEED: u64 = 4300;
    pub const TRANSACTION_SEED: u64 = 3939;
    pub const CONTRACT_SEED: u64 = 1231;

    pub fn new(prefix: &'static str, seed: u64) -> Self {
        Self { prefix, last: seed }
    }

    pub fn transfers() -> Self {
        Self::new("T", Self::TRANSFER_SEED)
    }

    pub fn transactions() -> Self {
        Self::new("TX", Self::TRANSACTION_SEED)
    }

    pub fn contracts() -> Self {
        Self::new("SC", Self::CONTRACT_SEED)
    }

    pub fn last(&self) -> u64 {
        self.last
    }

    /// Advance the counter and format the new value with the kind's prefix.
    pub fn next_id(&mut self) -> String {
        self.last += 1;
        format!("{}-{}", self.prefix, self.last)
    }

    /// Advance until the generated id is not already taken.
    pub fn next_free(&mut self, mut taken: impl FnMut(&str) -> bool) -> String {
        loop {
            let id = self.next_id();
            if !taken(&id) {
                return id;
            }
        }
    }
}
