//! Login, registration and logout commands

use std::io::Write;
use tracing::error;
use crate::state::{AppContext, RegistrationForm};
use crate::utils::errors::Result;
use super::CommandStatus;

/// Sign in, then continue to the page the user was headed for
pub async fn handle_login(
    ctx: &AppContext,
    username: &str,
    password: &str,
    out: &mut dyn Write,
) -> Result<CommandStatus> {
    let login_path = ctx.router.table().login_path();
    if ctx.navigator.current_path() != login_path {
        ctx.router.visit(login_path);
    }

    match ctx.session_store.login(username, password).await {
        Ok(user) => {
            let route = ctx.router.complete_login();
            writeln!(out, "Signed in as {}.", user.display_name())?;
            writeln!(out, "Now at {} ({}).", ctx.navigator.current_path(), route)?;
            Ok(CommandStatus::Done)
        }
        Err(e) => {
            error!(username = %username, error = %e, "Login error");
            writeln!(out, "✗ {}", e.user_message("Login failed. Please try again."))?;
            Ok(CommandStatus::Failed)
        }
    }
}

pub async fn handle_register(
    ctx: &AppContext,
    form: &RegistrationForm,
    out: &mut dyn Write,
) -> Result<CommandStatus> {
    ctx.router.visit("/register");

    match ctx.session_store.register(form).await {
        Ok(user) => {
            let route = ctx.router.visit(ctx.router.table().home_path());
            writeln!(out, "Registered and signed in as {}.", user.display_name())?;
            writeln!(out, "Now at {} ({}).", ctx.navigator.current_path(), route)?;
            Ok(CommandStatus::Done)
        }
        Err(e) => {
            writeln!(out, "✗ {}", e.user_message("Registration failed. Please try again."))?;
            Ok(CommandStatus::Failed)
        }
    }
}

pub fn handle_logout(ctx: &AppContext, out: &mut dyn Write) -> Result<CommandStatus> {
    let was_signed_in = ctx.session_store.is_authenticated();
    ctx.session_store.logout();
    ctx.router.visit("/");
    if was_signed_in {
        writeln!(out, "Signed out.")?;
    } else {
        writeln!(out, "No active session.")?;
    }
    Ok(CommandStatus::Done)
}

pub fn handle_whoami(ctx: &AppContext, out: &mut dyn Write) -> Result<CommandStatus> {
    match ctx.session_store.user() {
        Some(user) => {
            writeln!(out, "{}", user.username)?;
            if !user.full_name.is_empty() {
                writeln!(out, "  name:  {}", user.full_name)?;
            }
            if !user.email.is_empty() {
                writeln!(out, "  email: {}", user.email)?;
            }
        }
        None => writeln!(out, "Not signed in.")?,
    }
    Ok(CommandStatus::Done)
}
