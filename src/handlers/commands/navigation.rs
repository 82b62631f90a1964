//! `open <path>`: visit any route through the guard

use std::io::Write;
use crate::state::AppContext;
use crate::utils::errors::Result;
use super::CommandStatus;

pub fn handle_open(ctx: &AppContext, path: &str, out: &mut dyn Write) -> Result<CommandStatus> {
    let route = ctx.router.visit(path);
    let location = ctx.navigator.current();
    writeln!(out, "{} -> {} ({})", path, location.path, route.title())?;
    if let Some(from) = location.from {
        writeln!(out, "Sign in to continue to {}.", from)?;
    }
    Ok(CommandStatus::Done)
}
