//! Account Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Account UUID
pub type AccountUuid = TypedUuid<AccountRecord>;

/// Whether an account orders food or sells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountRole {
    User,
    Partner,
}

impl AccountRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Partner => "partner",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown account role \"{0}\"")]
pub struct UnknownAccountRole(pub String);

impl FromStr for AccountRole {
    type Err = UnknownAccountRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "partner" => Ok(Self::Partner),
            other => Err(UnknownAccountRole(other.to_string())),
        }
    }
}

/// Account Record
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub uuid: AccountUuid,
    pub name: String,
    pub role: AccountRole,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse_from_their_storage_names() {
        assert_eq!("user".parse::<AccountRole>().ok(), Some(AccountRole::User));
        assert_eq!(
            "partner".parse::<AccountRole>().ok(),
            Some(AccountRole::Partner)
        );
        assert!("admin".parse::<AccountRole>().is_err());
    }

    #[test]
    fn roles_display_as_storage_names() {
        assert_eq!(AccountRole::Partner.to_string(), "partner");
        assert_eq!(AccountRole::User.as_str(), "user");
    }
}
