//! CLI command definitions and dispatch.

pub mod auth;
pub mod notification;

use clap::{Parser, Subcommand};

use staywatch_core::error::AppError;

use crate::client::{AuthClient, NotificationClient};
use crate::output::OutputFormat;

/// StayWatch — guest-service and safety notifications from the terminal
#[derive(Debug, Parser)]
#[command(name = "staywatch", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the StayWatch server
    #[arg(long, env = "STAYWATCH_SERVER", default_value = "http://localhost:3000")]
    pub server: String,

    /// Bearer token from `staywatch login`
    #[arg(long, env = "STAYWATCH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and print a bearer token
    Login(auth::LoginArgs),
    /// Create an account and print a bearer token
    Register(auth::RegisterArgs),
    /// List notifications
    List(notification::ListArgs),
    /// Show one guest's notifications grouped by day
    Timeline(notification::TimelineArgs),
    /// Change a notification's status
    SetStatus(notification::SetStatusArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => auth::login(args, &self.auth_client()?, self.format).await,
            Commands::Register(args) => {
                auth::register(args, &self.auth_client()?, self.format).await
            }
            Commands::List(args) => {
                notification::list(args, &self.notification_client()?, self.format).await
            }
            Commands::Timeline(args) => {
                notification::timeline(args, &self.notification_client()?, self.format).await
            }
            Commands::SetStatus(args) => {
                notification::set_status(args, &self.notification_client()?).await
            }
        }
    }

    fn auth_client(&self) -> Result<AuthClient, AppError> {
        Ok(AuthClient::new(&self.server)?)
    }

    fn notification_client(&self) -> Result<NotificationClient, AppError> {
        let token = self.token.as_deref().filter(|t| !t.is_empty()).ok_or_else(|| {
            AppError::authentication(
                "Not signed in: run `staywatch login` and set STAYWATCH_TOKEN or pass --token",
            )
        })?;
        Ok(NotificationClient::new(&self.server, token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "staywatch", "--token", "t", "list", "--status", "pending", "--search", "pool",
        ])
        .unwrap();
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.status.as_deref(), Some("pending"));
                assert_eq!(args.search.as_deref(), Some("pool"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_missing_token_is_authentication_error() {
        let cli = Cli::try_parse_from(["staywatch", "--server", "http://127.0.0.1:9", "list"])
            .unwrap();
        if cli.token.is_none() {
            let err = cli.notification_client().unwrap_err();
            assert_eq!(err.kind, staywatch_core::ErrorKind::Authentication);
        }
    }
}
