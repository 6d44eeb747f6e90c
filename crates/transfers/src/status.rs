use core::str::FromStr;

use serde::{Deserialize, Serialize};

use supplytrack_core::{DomainError, DomainResult};
use supplytrack_inventory::StockMovement;

/// Direction of a transfer relative to our own stock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    Incoming,
    Outgoing,
}

impl TransferType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransferType::Incoming => "incoming",
            TransferType::Outgoing => "outgoing",
        }
    }

    /// The stock change a completed transfer of this type causes.
    pub fn movement(self, quantity: u64) -> StockMovement {
        match self {
            TransferType::Incoming => StockMovement::Incoming(quantity),
            TransferType::Outgoing => StockMovement::Outgoing(quantity),
        }
    }
}

impl core::fmt::Display for TransferType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incoming" => Ok(TransferType::Incoming),
            "outgoing" => Ok(TransferType::Outgoing),
            _ => Err(DomainError::validation("type", "must be one of: incoming, outgoing")),
        }
    }
}

/// Transfer lifecycle status.
///
/// ```text
/// pending ──────────┬──> accepted ──┬──> completed
/// pending_approval ─┤               └──> declined
///                   ├──> completed
///                   └──> declined
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Pending,
    PendingApproval,
    Accepted,
    Declined,
    Completed,
}

impl TransferStatus {
    pub const ALL: [TransferStatus; 5] = [
        TransferStatus::Pending,
        TransferStatus::PendingApproval,
        TransferStatus::Accepted,
        TransferStatus::Declined,
        TransferStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransferStatus::Pending => "pending",
            TransferStatus::PendingApproval => "pending_approval",
            TransferStatus::Accepted => "accepted",
            TransferStatus::Declined => "declined",
            TransferStatus::Completed => "completed",
        }
    }

    /// Statuses a transfer may be created in.
    pub fn is_initial(self) -> bool {
        matches!(self, TransferStatus::Pending | TransferStatus::PendingApproval)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TransferStatus::Declined | TransferStatus::Completed)
    }

    /// Transition table. Same-state moves are never allowed.
    pub fn can_transition_to(self, next: TransferStatus) -> bool {
        use TransferStatus::*;

        matches!(
            (self, next),
            (Pending | PendingApproval, Accepted | Declined | Completed)
                | (Accepted, Completed | Declined)
        )
    }

    pub fn ensure_transition(self, next: TransferStatus) -> DomainResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(DomainError::invalid_transition(self, next))
        }
    }
}

impl core::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransferStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation(
                    "status",
                    "must be one of: pending, pending_approval, accepted, declined, completed",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use super::TransferStatus::*;

    #[test]
    fn entry_states_can_reach_every_outcome() {
        for from in [Pending, PendingApproval] {
            assert!(from.can_transition_to(Accepted));
            assert!(from.can_transition_to(Declined));
            assert!(from.can_transition_to(Completed));
        }
    }

    #[test]
    fn accepted_can_only_be_finalized_or_declined() {
        assert!(Accepted.can_transition_to(Completed));
        assert!(Accepted.can_transition_to(Declined));
        assert!(!Accepted.can_transition_to(Pending));
        assert!(!Accepted.can_transition_to(PendingApproval));
    }

    #[test]
    fn declined_cannot_be_completed() {
        let err = Declined.ensure_transition(Completed).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: "declined".to_string(),
                to: "completed".to_string(),
            }
        );
    }

    #[test]
    fn statuses_round_trip_through_their_wire_names() {
        for status in TransferStatus::ALL {
            assert_eq!(status.as_str().parse::<TransferStatus>().unwrap(), status);
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::json!(status.as_str()));
        }
        assert!("Pending".parse::<TransferStatus>().is_err());
    }

    #[test]
    fn transfer_type_maps_to_stock_movement() {
        assert_eq!(TransferType::Incoming.movement(3), StockMovement::Incoming(3));
        assert_eq!(TransferType::Outgoing.movement(3), StockMovement::Outgoing(3));
        assert!("sideways".parse::<TransferType>().is_err());
    }

    fn any_status() -> impl Strategy<Value = TransferStatus> {
        prop::sample::select(TransferStatus::ALL.to_vec())
    }

    proptest! {
        /// Property: terminal states accept nothing and no state moves to itself
        /// or back to an entry state.
        #[test]
        fn terminal_and_entry_rules_hold(from in any_status(), to in any_status()) {
            if from.is_terminal() || from == to || to.is_initial() {
                prop_assert!(!from.can_transition_to(to));
            }
        }
    }
}
