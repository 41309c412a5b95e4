//! Account Data

use crate::domain::accounts::records::{AccountRole, AccountUuid};

/// New Account Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub uuid: AccountUuid,
    pub name: String,
    pub role: AccountRole,
}
