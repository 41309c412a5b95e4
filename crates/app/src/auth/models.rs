//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::accounts::records::{AccountRole, AccountUuid};

/// The authenticated account behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub uuid: AccountUuid,
    pub role: AccountRole,
}

impl Actor {
    #[must_use]
    pub fn is_partner(&self) -> bool {
        self.role == AccountRole::Partner
    }
}

/// Session data used while authenticating a request.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub account_uuid: AccountUuid,
    pub role: AccountRole,

    /// SHA-256 hex digest of the session's verifier input.
    pub token_hash: String,
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub uuid: Uuid,
    pub account_uuid: AccountUuid,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// Session metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct SessionMetadata {
    pub uuid: Uuid,
    pub account_uuid: AccountUuid,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub metadata: SessionMetadata,
}
