//! Account and session CLI commands

use clap::Args;
use zeroize::Zeroizing;

use crate::auth::{AuthService, RegisterInput, Session};
use crate::config::settings::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::storage::Storage;

/// Arguments for `register`
#[derive(Args)]
pub struct RegisterArgs {
    /// Username
    pub username: String,
    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
    /// Email address
    #[arg(short, long)]
    pub email: Option<String>,
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,
    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,
}

/// Arguments for `login`
#[derive(Args)]
pub struct LoginArgs {
    /// Username
    pub username: String,
    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

fn read_password(given: Option<String>, confirm: bool) -> ExpenseResult<Zeroizing<String>> {
    if let Some(password) = given {
        return Ok(Zeroizing::new(password));
    }

    let password = Zeroizing::new(rpassword::prompt_password("Password: ")?);
    if confirm {
        let again = Zeroizing::new(rpassword::prompt_password("Confirm password: ")?);
        if *password != *again {
            return Err(ExpenseError::Validation("Passwords do not match".into()));
        }
    }

    Ok(password)
}

pub fn handle_register(storage: &Storage, settings: &Settings, args: RegisterArgs) -> ExpenseResult<()> {
    let service = AuthService::new(storage, settings)?;
    let password = read_password(args.password, true)?;

    let outcome = service.register(RegisterInput {
        username: args.username.clone(),
        password: password.to_string(),
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
    })?;

    if !outcome.success {
        return Err(ExpenseError::Validation(outcome.message));
    }

    println!("Registered user: {}", args.username.trim());
    println!("Run 'expense login {}' to start a session.", args.username.trim());
    Ok(())
}

pub fn handle_login(storage: &Storage, settings: &Settings, args: LoginArgs) -> ExpenseResult<()> {
    let service = AuthService::new(storage, settings)?;
    let password = read_password(args.password, false)?;

    let session = service.start_session(&args.username, &password)?;

    println!("Logged in as {}", session.username);
    println!(
        "  Session expires: {}",
        session.expires_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

pub fn handle_logout(storage: &Storage, settings: &Settings) -> ExpenseResult<()> {
    let service = AuthService::new(storage, settings)?;

    if service.logout()? {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

pub fn handle_whoami(storage: &Storage, settings: &Settings) -> ExpenseResult<()> {
    let service = AuthService::new(storage, settings)?;
    let session = service.current_session()?;
    let user = service.current_user()?;

    println!("User: {}", user.display_name());
    println!("  Username: {}", user.username);
    if let Some(email) = &user.email {
        println!("  Email:    {}", email);
    }
    println!("  ID:       {}", user.id);
    println!(
        "  Session expires: {}",
        session.expires_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

/// The logged-in session; commands acting for a user call this first
pub fn require_session(storage: &Storage, settings: &Settings) -> ExpenseResult<Session> {
    AuthService::new(storage, settings)?.current_session()
}
