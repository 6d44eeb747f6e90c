use serde::Deserialize;

use supplytrack_core::DomainResult;
use supplytrack_ledger::{ContractFilter, TransactionFilter};
use supplytrack_transfers::{TransferFilter, TransferStatus};

// -------------------------
// Query DTOs
// -------------------------

/// `?status=&type=` on `GET /transfers`. Values are parsed strictly so a typo
/// is a validation error rather than an empty list.
#[derive(Debug, Default, Deserialize)]
pub struct TransferQuery {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub transfer_type: Option<String>,
}

impl TransferQuery {
    pub fn into_filter(self) -> DomainResult<TransferFilter> {
        Ok(TransferFilter {
            status: self.status.as_deref().map(str::parse).transpose()?,
            transfer_type: self.transfer_type.as_deref().map(str::parse).transpose()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

impl TransactionQuery {
    pub fn into_filter(self) -> DomainResult<TransactionFilter> {
        Ok(TransactionFilter {
            transaction_type: self.transaction_type.as_deref().map(str::parse).transpose()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContractQuery {
    pub status: Option<String>,
}

impl ContractQuery {
    pub fn into_filter(self) -> DomainResult<ContractFilter> {
        Ok(ContractFilter {
            status: self.status.as_deref().map(str::parse).transpose()?,
        })
    }
}

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetTransferStatusRequest {
    pub status: String,
}

impl SetTransferStatusRequest {
    pub fn parse_status(&self) -> DomainResult<TransferStatus> {
        self.status.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplytrack_core::DomainError;
    use supplytrack_transfers::TransferType;

    #[test]
    fn transfer_query_parses_both_filters() {
        let q = TransferQuery {
            status: Some("pending_approval".to_string()),
            transfer_type: Some("incoming".to_string()),
        };
        let filter = q.into_filter().unwrap();
        assert_eq!(filter.status, Some(TransferStatus::PendingApproval));
        assert_eq!(filter.transfer_type, Some(TransferType::Incoming));
    }

    #[test]
    fn unknown_filter_values_are_validation_errors() {
        let q = TransferQuery {
            status: Some("done".to_string()),
            transfer_type: None,
        };
        assert!(matches!(q.into_filter(), Err(DomainError::Validation(_))));

        let q = ContractQuery {
            status: Some("active".to_string()),
        };
        assert!(matches!(q.into_filter(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn empty_queries_match_everything() {
        assert_eq!(TransferQuery::default().into_filter().unwrap(), TransferFilter::default());
        assert_eq!(
            TransactionQuery::default().into_filter().unwrap(),
            TransactionFilter::default()
        );
    }
}
