use clap::Args;
use jiff::Timestamp;
use reelbite_app::{
    auth::PgAuthService,
    database::{self, Db},
    domain::accounts::{AccountsService, PgAccountsService, records::AccountUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct IssueSessionArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Account that should own the session
    #[arg(long)]
    account_uuid: Uuid,

    /// Optional session expiration timestamp (RFC 3339)
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: IssueSessionArgs) -> Result<(), String> {
    if let Some(expires_at) = args.expires_at
        && expires_at <= Timestamp::now()
    {
        return Err("expires-at must be in the future".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let account = PgAccountsService::new(Db::new(pool.clone()))
        .get_account(AccountUuid::from_uuid(args.account_uuid))
        .await
        .map_err(|error| format!("failed to load account: {error}"))?;

    let issued = PgAuthService::new(pool)
        .issue_session(account.uuid, args.expires_at)
        .await
        .map_err(|error| format!("failed to issue session: {error}"))?;

    println!("session_uuid: {}", issued.metadata.uuid);
    println!("account_uuid: {}", account.uuid);
    println!("session_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
