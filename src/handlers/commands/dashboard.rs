//! Admin dashboard command

use std::io::Write;
use chrono::Utc;
use crate::state::AppContext;
use crate::utils::errors::Result;
use crate::utils::helpers::format_event_date;
use crate::views::Dashboard;
use super::{enter_admin_page, CommandStatus};

pub async fn handle_dashboard(ctx: &AppContext, out: &mut dyn Write) -> Result<CommandStatus> {
    let home = ctx.router.table().home_path().to_string();
    if !enter_admin_page(ctx, &home, out)? {
        return Ok(CommandStatus::Failed);
    }

    let dashboard = Dashboard::load(
        &ctx.services.event_service,
        &ctx.services.member_service,
        Utc::now(),
    )
    .await;

    if let Some(user) = ctx.session_store.user() {
        writeln!(out, "Welcome back, {}!", user.display_name())?;
    }
    if !dashboard.loaded {
        writeln!(out, "✗ Could not load dashboard data.")?;
        return Ok(CommandStatus::Failed);
    }

    let stats = &dashboard.stats;
    writeln!(out, "Total events:    {}", stats.total_events)?;
    writeln!(out, "Active members:  {}", stats.active_members)?;
    writeln!(out, "Upcoming events: {}", stats.upcoming_count)?;
    if stats.next_events.is_empty() {
        writeln!(out, "No upcoming events.")?;
    } else {
        writeln!(out, "Next up:")?;
        for event in &stats.next_events {
            writeln!(out, "  {} - {}", format_event_date(&event.date), event.title)?;
        }
    }
    Ok(CommandStatus::Done)
}
