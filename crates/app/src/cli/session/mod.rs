use clap::{Args, Subcommand};

mod issue;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionSubcommand {
    /// Issue another session for an existing account
    Issue(issue::IssueSessionArgs),
    /// Revoke a session by UUID
    Revoke(revoke::RevokeSessionArgs),
}

pub(crate) async fn run(command: SessionCommand) -> Result<(), String> {
    match command.command {
        SessionSubcommand::Issue(args) => issue::run(args).await,
        SessionSubcommand::Revoke(args) => revoke::run(args).await,
    }
}
