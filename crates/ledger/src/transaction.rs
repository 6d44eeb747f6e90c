use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use supplytrack_core::{
    ContractId, DomainError, DomainResult, Entity, EntityKind, TransactionId, TransferId, Validator,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Payment,
    Refund,
    ContractExecution,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Payment => "payment",
            TransactionType::Refund => "refund",
            TransactionType::ContractExecution => "contract_execution",
        }
    }
}

impl FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(TransactionType::Payment),
            "refund" => Ok(TransactionType::Refund),
            "contract_execution" => Ok(TransactionType::ContractExecution),
            _ => Err(DomainError::validation(
                "type",
                "must be one of: payment, refund, contract_execution",
            )),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

/// Entity: Transaction (a recorded financial or contract event).
///
/// Transactions are append-only; there is no update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: TransactionId,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    amount: u64,
    currency: String,
    status: TransactionStatus,
    transfer_id: Option<TransferId>,
    contract_id: Option<ContractId>,
    tx_hash: Option<String>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Payload: record a transaction. `id` is generated when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewTransaction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Amount in minor units (e.g. cents).
    pub amount: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub transfer_id: Option<String>,
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

impl NewTransaction {
    pub fn new(transaction_type: TransactionType, amount: u64, status: TransactionStatus) -> Self {
        Self {
            id: None,
            transaction_type,
            amount,
            currency: default_currency(),
            status,
            transfer_id: None,
            contract_id: None,
            tx_hash: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut v = Validator::new();
        if let Some(id) = &self.id {
            v.require_non_blank("id", id);
        }
        v.require_non_blank("currency", &self.currency).finish()
    }
}

impl Transaction {
    /// `completed_at` is stamped only if the transaction is recorded as completed.
    pub fn create(id: TransactionId, new: NewTransaction, now: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;

        let completed_at = (new.status == TransactionStatus::Completed).then_some(now);
        Ok(Self {
            id,
            transaction_type: new.transaction_type,
            amount: new.amount,
            currency: new.currency,
            status: new.status,
            transfer_id: new.transfer_id.map(TransferId::from),
            contract_id: new.contract_id.map(ContractId::from),
            tx_hash: new.tx_hash,
            created_at: now,
            completed_at,
        })
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn transfer_id(&self) -> Option<&TransferId> {
        self.transfer_id.as_ref()
    }

    pub fn contract_id(&self) -> Option<&ContractId> {
        self.contract_id.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

impl Entity for Transaction {
    type Id = TransactionId;

    const KIND: EntityKind = EntityKind::Transaction;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.transaction_type.is_none_or(|t| t == tx.transaction_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_transactions_carry_completed_at() {
        let now = Utc::now();
        let tx = Transaction::create(
            TransactionId::from("TX-1"),
            NewTransaction::new(TransactionType::Payment, 1_500, TransactionStatus::Completed),
            now,
        )
        .unwrap();
        assert_eq!(tx.completed_at(), Some(now));
        assert_eq!(tx.currency(), "USD");
    }

    #[test]
    fn pending_transactions_have_no_completed_at() {
        let tx = Transaction::create(
            TransactionId::from("TX-2"),
            NewTransaction::new(TransactionType::Refund, 200, TransactionStatus::Pending),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(tx.completed_at(), None);
    }

    #[test]
    fn back_references_are_kept() {
        let mut new = NewTransaction::new(TransactionType::ContractExecution, 0, TransactionStatus::Failed);
        new.transfer_id = Some("T-4301".to_string());
        new.contract_id = Some("SC-1232".to_string());

        let tx = Transaction::create(TransactionId::from("TX-3"), new, Utc::now()).unwrap();
        assert_eq!(tx.transfer_id().map(|t| t.as_str()), Some("T-4301"));
        assert_eq!(tx.contract_id().map(|c| c.as_str()), Some("SC-1232"));
    }

    #[test]
    fn payload_defaults_currency_and_status() {
        let new: NewTransaction = serde_json::from_value(serde_json::json!({
            "type": "payment",
            "amount": 100
        }))
        .unwrap();
        assert_eq!(new.currency, "USD");
        assert_eq!(new.status, TransactionStatus::Pending);
    }

    #[test]
    fn filter_by_type() {
        let tx = Transaction::create(
            TransactionId::from("TX-4"),
            NewTransaction::new(TransactionType::Payment, 1, TransactionStatus::Pending),
            Utc::now(),
        )
        .unwrap();
        let refunds = TransactionFilter {
            transaction_type: Some(TransactionType::Refund),
        };
        assert!(!refunds.matches(&tx));
        assert!(TransactionFilter::default().matches(&tx));
    }
}
