//! `login` and `register` commands.

use clap::Args;
use dialoguer::Password;

use staywatch_core::error::AppError;
use staywatch_entity::user::{Credentials, Registration};

use crate::client::{AuthClient, AuthSession};
use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,
    /// Password; prompted when omitted
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for `register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Account email
    #[arg(long)]
    pub email: String,
    /// Display name
    #[arg(long)]
    pub name: Option<String>,
    /// Password; prompted twice when omitted
    #[arg(long)]
    pub password: Option<String>,
}

fn prompt_error(e: dialoguer::Error) -> AppError {
    AppError::validation(format!("Could not read password: {e}"))
}

/// Sign in and print the session.
pub async fn login(
    args: &LoginArgs,
    client: &AuthClient,
    format: OutputFormat,
) -> Result<(), AppError> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(prompt_error)?,
    };

    let session = client
        .login(&Credentials {
            email: args.email.clone(),
            password,
        })
        .await?;
    print_session(&session, format);
    Ok(())
}

/// Create an account and print the session.
pub async fn register(
    args: &RegisterArgs,
    client: &AuthClient,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (password, confirm_password) = match &args.password {
        Some(password) => (password.clone(), None),
        None => {
            let password = Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(prompt_error)?;
            (password.clone(), Some(password))
        }
    };

    let session = client
        .register(&Registration {
            email: args.email.clone(),
            password,
            display_name: args.name.clone(),
            confirm_password,
        })
        .await?;
    print_session(&session, format);
    Ok(())
}

fn print_session(session: &AuthSession, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(session),
        OutputFormat::Table => {
            let who = session.display_name.as_deref().unwrap_or(&session.email);
            output::print_success(&format!("Signed in as {who}"));
            output::print_kv("User ID", &session.user_id);
            output::print_kv("Expires in", &format!("{}s", session.expires_in));
            output::print_kv("Open", &session.redirect_to);
            println!();
            println!("export STAYWATCH_TOKEN={}", session.id_token);
        }
    }
}
