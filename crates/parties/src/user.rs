use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use supplytrack_core::{DomainResult, Entity, EntityKind, UserId, Validator};

/// Entity: User.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    email: Option<String>,
    role: Option<String>,
    created_at: DateTime<Utc>,
}

/// Payload: register a user. Users carry externally assigned ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl NewUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            role: None,
        }
    }
}

impl User {
    pub fn create(new: NewUser, now: DateTime<Utc>) -> DomainResult<Self> {
        Validator::new()
            .require_non_blank("id", &new.id)
            .require_non_blank("name", &new.name)
            .check(
                new.email.as_deref().is_none_or(|e| e.contains('@')),
                "email",
                "must be a valid email address",
            )
            .finish()?;

        Ok(Self {
            id: UserId::from(new.id),
            name: new.name,
            email: new.email,
            role: new.role,
            created_at: now,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }
}

impl Entity for User {
    type Id = UserId;

    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
