//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{
        Actor, AuthServiceError, IssuedSession, NewSession, SessionTokenVersion,
        format_session_token, generate_session_secret, parse_session_token,
        repository::PgAuthRepository, session_verifier, verifiers_match,
    },
    domain::accounts::records::AccountUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new session for the given account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn issue_session(
        &self,
        account_uuid: AccountUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session_uuid = Uuid::now_v7();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid, version, &secret);

        let token_hash = session_verifier(&session_uuid, version, &account_uuid, &secret);

        let metadata = self
            .repository
            .create_session(&NewSession {
                uuid: session_uuid,
                account_uuid,
                token_hash,
                expires_at,
            })
            .await?;

        Ok(IssuedSession { token, metadata })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_session(&self, token: &str) -> Result<Actor, AuthServiceError> {
        let parsed = parse_session_token(token).map_err(|_token_error| AuthServiceError::NotFound)?;

        let session = self
            .repository
            .find_active_session(parsed.session_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let expected = session_verifier(
            &parsed.session_uuid,
            parsed.version,
            &session.account_uuid,
            &parsed.secret,
        );

        if !verifiers_match(&session.token_hash, &expected) {
            return Err(AuthServiceError::NotFound);
        }

        Ok(Actor {
            uuid: session.account_uuid,
            role: session.role,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw session token into the account it belongs to.
    async fn authenticate_session(&self, token: &str) -> Result<Actor, AuthServiceError>;
}
