use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use supplytrack_core::{ContractId, DomainError, DomainResult, Entity, EntityKind, Validator};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    #[default]
    Active,
    Inactive,
}

impl ContractStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContractStatus::Active => "Active",
            ContractStatus::Inactive => "Inactive",
        }
    }
}

impl FromStr for ContractStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(ContractStatus::Active),
            "Inactive" => Ok(ContractStatus::Inactive),
            _ => Err(DomainError::validation("status", "must be one of: Active, Inactive")),
        }
    }
}

/// Entity: SmartContract. A labelled record; no on-chain behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartContract {
    id: ContractId,
    name: String,
    description: Option<String>,
    network: Option<String>,
    parties: Vec<String>,
    status: ContractStatus,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewSmartContract {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub parties: Vec<String>,
    #[serde(default)]
    pub status: ContractStatus,
}

impl NewSmartContract {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            network: None,
            parties: Vec::new(),
            status: ContractStatus::default(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut v = Validator::new();
        if let Some(id) = &self.id {
            v.require_non_blank("id", id);
        }
        v.require_non_blank("name", &self.name)
            .check(
                self.parties.iter().all(|p| !p.trim().is_empty()),
                "parties",
                "must not contain empty entries",
            )
            .finish()
    }
}

/// Payload: partial update. `description` and `network` are cleared by `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SmartContractPatch {
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "supplytrack_core::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "supplytrack_core::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub network: Option<Option<String>>,
    pub parties: Option<Vec<String>>,
    pub status: Option<ContractStatus>,
}

impl SmartContract {
    pub fn create(id: ContractId, new: NewSmartContract, now: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;

        Ok(Self {
            id,
            name: new.name,
            description: new.description,
            network: new.network,
            parties: new.parties,
            status: new.status,
            created_at: now,
            last_updated: now,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parties(&self) -> &[String] {
        &self.parties
    }

    pub fn status(&self) -> ContractStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn apply_patch(&mut self, patch: SmartContractPatch, now: DateTime<Utc>) -> DomainResult<()> {
        let mut v = Validator::new();
        if let Some(name) = &patch.name {
            v.require_non_blank("name", name);
        }
        if let Some(parties) = &patch.parties {
            v.check(
                parties.iter().all(|p| !p.trim().is_empty()),
                "parties",
                "must not contain empty entries",
            );
        }
        v.finish()?;

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(network) = patch.network {
            self.network = network;
        }
        if let Some(parties) = patch.parties {
            self.parties = parties;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.last_updated = now;
        Ok(())
    }
}

impl Entity for SmartContract {
    type Id = ContractId;

    const KIND: EntityKind = EntityKind::Contract;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ContractFilter {
    pub status: Option<ContractStatus>,
}

impl ContractFilter {
    pub fn matches(&self, contract: &SmartContract) -> bool {
        self.status.is_none_or(|s| s == contract.status)
    }
}
