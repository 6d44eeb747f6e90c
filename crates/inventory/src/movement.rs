use serde::{Deserialize, Serialize};

/// A signed change to an item's stock, expressed as direction + amount.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", content = "quantity", rename_all = "lowercase")]
pub enum StockMovement {
    /// Stock arriving (e.g. a completed incoming transfer).
    Incoming(u64),
    /// Stock leaving (e.g. a completed outgoing transfer).
    Outgoing(u64),
}

impl StockMovement {
    pub fn quantity(self) -> u64 {
        match self {
            StockMovement::Incoming(q) | StockMovement::Outgoing(q) => q,
        }
    }
}
