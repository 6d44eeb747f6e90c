//! Financial records: payments/transactions and smart contract labels.
//!
//! Smart contracts here are descriptive records only; nothing is executed or
//! verified against a chain.

pub mod contract;
pub mod transaction;

pub use contract::{ContractFilter, ContractStatus, NewSmartContract, SmartContract, SmartContractPatch};
pub use transaction::{
    NewTransaction, Transaction, TransactionFilter, TransactionStatus, TransactionType,
};
