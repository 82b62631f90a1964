//! Console command handlers
//!
//! Each handler drives the same controllers a page would and writes what
//! the page would show.

pub mod dashboard;
pub mod events;
pub mod members;
pub mod navigation;
pub mod session;

use std::io::{BufRead, Write};
use crate::middleware::Route;
use crate::state::{AppContext, CrudController, CrudResource, MutationOutcome};
use crate::utils::errors::Result;

/// How a command ended, for the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Done,
    Failed,
}

impl CommandStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandStatus::Done)
    }
}

/// Visit a protected page. Returns false (after saying so) when the guard
/// sent the user to login instead.
pub fn enter_admin_page(ctx: &AppContext, path: &str, out: &mut dyn Write) -> Result<bool> {
    match ctx.router.visit(path) {
        Route::AdminLogin => {
            writeln!(
                out,
                "Not signed in. Redirected to {} (will return to {} after login).",
                ctx.router.table().login_path(),
                path
            )?;
            Ok(false)
        }
        _ => Ok(true),
    }
}

/// Print the page's success and error notices
pub fn write_notices<S: CrudResource>(page: &CrudController<S>, out: &mut dyn Write) -> Result<()> {
    if let Some(success) = page.success_notice() {
        writeln!(out, "✓ {}", success)?;
    }
    if let Some(error) = page.error_notice() {
        writeln!(out, "✗ {}", error)?;
    }
    Ok(())
}

/// Map a mutation outcome to a command status after printing notices
pub fn finish_mutation<S: CrudResource>(
    page: &CrudController<S>,
    outcome: &MutationOutcome,
    out: &mut dyn Write,
) -> Result<CommandStatus> {
    write_notices(page, out)?;
    Ok(match outcome {
        MutationOutcome::Applied(_) => CommandStatus::Done,
        MutationOutcome::Cancelled => {
            writeln!(out, "Cancelled.")?;
            CommandStatus::Done
        }
        MutationOutcome::Rejected(_) => CommandStatus::Failed,
    })
}

/// Ask a yes/no question on the given input
pub fn confirm(prompt: &str, input: &mut dyn BufRead, out: &mut dyn Write) -> bool {
    if write!(out, "{} [y/N] ", prompt).and_then(|_| out.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
