use clap::{Args, ValueEnum};
use jiff::Timestamp;
use reelbite_app::{
    auth::PgAuthService,
    database::{self, Db},
    domain::accounts::{
        AccountsService, PgAccountsService,
        data::NewAccount,
        records::{AccountRole, AccountUuid},
    },
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    User,
    Partner,
}

impl From<RoleArg> for AccountRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::User => Self::User,
            RoleArg::Partner => Self::Partner,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CreateAccountArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Whether the account orders food or sells it
    #[arg(long, value_enum)]
    role: RoleArg,

    /// Optional session expiration timestamp (RFC 3339)
    #[arg(long)]
    session_expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: CreateAccountArgs) -> Result<(), String> {
    if let Some(expires_at) = args.session_expires_at
        && expires_at <= Timestamp::now()
    {
        return Err("session-expires-at must be in the future".to_string());
    }

    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let account = PgAccountsService::new(Db::new(pool.clone()))
        .create_account(NewAccount {
            uuid: AccountUuid::new(),
            name: args.name,
            role: args.role.into(),
        })
        .await
        .map_err(|error| format!("failed to create account: {error}"))?;

    let issued = PgAuthService::new(pool)
        .issue_session(account.uuid, args.session_expires_at)
        .await
        .map_err(|error| format!("failed to issue session: {error}"))?;

    println!("account_uuid: {}", account.uuid);
    println!("account_role: {}", account.role);
    println!("session_uuid: {}", issued.metadata.uuid);
    if let Some(expires_at) = issued.metadata.expires_at {
        println!("session_expires_at: {expires_at}");
    }
    println!("session_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
