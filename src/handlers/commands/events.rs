//! Event commands: the public events page and the events admin page

use std::io::{BufRead, Write};
use chrono::Utc;
use clap::Args;
use crate::models::{CreateEventRequest, Event, EventCategory};
use crate::state::{AppContext, PageState};
use crate::utils::errors::Result;
use crate::utils::helpers::{format_event_date, truncate_text};
use crate::views::partition_events;
use super::{confirm, enter_admin_page, finish_mutation, CommandStatus};

const ADMIN_EVENTS_PATH: &str = "/admin/events";

/// Event form fields; unset fields keep their current value
#[derive(Debug, Clone, Default, Args)]
pub struct EventFields {
    #[arg(long)]
    pub title: Option<String>,
    /// YYYY-MM-DD or an ISO timestamp
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub registration_form_url: Option<String>,
    #[arg(long)]
    pub photo_gallery_url: Option<String>,
    /// cultural, sports, academic, social or other
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub max_participants: Option<i32>,
}

impl EventFields {
    pub fn apply(&self, form: &mut CreateEventRequest) {
        if let Some(title) = &self.title {
            form.title = title.clone();
        }
        if let Some(date) = &self.date {
            form.date = date.clone();
        }
        if let Some(description) = &self.description {
            form.description = description.clone();
        }
        if let Some(url) = &self.image_url {
            form.image_url = Some(url.clone());
        }
        if let Some(url) = &self.registration_form_url {
            form.registration_form_url = Some(url.clone());
        }
        if let Some(url) = &self.photo_gallery_url {
            form.photo_gallery_url = Some(url.clone());
        }
        if let Some(category) = &self.category {
            form.category = Some(EventCategory::parse(category));
        }
        if let Some(location) = &self.location {
            form.location = Some(location.clone());
        }
        if let Some(max) = self.max_participants {
            form.max_participants = Some(max);
        }
    }
}

fn write_event_line(event: &Event, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "  [{}] {} - {}{}",
        event.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
        format_event_date(&event.date),
        event.title,
        event
            .location
            .as_deref()
            .map(|loc| format!(" @ {}", loc))
            .unwrap_or_default()
    )?;
    Ok(())
}

/// Public events page: upcoming and past
pub async fn handle_public_events(ctx: &AppContext, out: &mut dyn Write) -> Result<CommandStatus> {
    ctx.router.visit("/events");
    let events = match ctx.services.event_service.list().await {
        Ok(events) => events,
        Err(e) => {
            writeln!(out, "✗ {}", e.user_message("Failed to fetch events"))?;
            return Ok(CommandStatus::Failed);
        }
    };

    let split = partition_events(&events, Utc::now());
    writeln!(out, "Upcoming Events ({})", split.upcoming.len())?;
    for event in &split.upcoming {
        write_event_line(event, out)?;
    }
    writeln!(out, "Past Events ({})", split.past.len())?;
    for event in &split.past {
        write_event_line(event, out)?;
    }
    if events.is_empty() {
        writeln!(out, "Check back soon for upcoming events!")?;
    }
    Ok(CommandStatus::Done)
}

/// Admin events page listing
pub async fn handle_events_list(ctx: &AppContext, out: &mut dyn Write) -> Result<CommandStatus> {
    if !enter_admin_page(ctx, ADMIN_EVENTS_PATH, out)? {
        return Ok(CommandStatus::Failed);
    }

    let mut page = ctx.events_page();
    page.mount().await?;
    if let PageState::Error(message) = page.state() {
        writeln!(out, "✗ {}", message)?;
        return Ok(CommandStatus::Failed);
    }

    let split = partition_events(page.records(), Utc::now());
    writeln!(out, "Events ({} total, {} upcoming)", page.records().len(), split.upcoming.len())?;
    for event in page.records() {
        write_event_line(event, out)?;
    }
    Ok(CommandStatus::Done)
}

/// Single event details
pub async fn handle_event_show(ctx: &AppContext, id: i64, out: &mut dyn Write) -> Result<CommandStatus> {
    match ctx.services.event_service.get(id).await {
        Ok(event) => {
            writeln!(out, "{}", event.title)?;
            writeln!(out, "  date:        {}", format_event_date(&event.date))?;
            if let Some(category) = &event.category {
                writeln!(out, "  category:    {}", category)?;
            }
            if let Some(location) = &event.location {
                writeln!(out, "  location:    {}", location)?;
            }
            if let Some(max) = event.max_participants {
                writeln!(out, "  capacity:    {}/{}", event.current_participants.unwrap_or(0), max)?;
            }
            if let Some(url) = &event.registration_form_url {
                writeln!(out, "  register at: {}", url)?;
            }
            writeln!(out, "  {}", truncate_text(&event.description, 200))?;
            Ok(CommandStatus::Done)
        }
        Err(e) => {
            writeln!(out, "✗ {}", e.user_message("Failed to fetch event"))?;
            Ok(CommandStatus::Failed)
        }
    }
}

/// Add (no id) or edit (with id) through the admin page's form
pub async fn handle_event_save(
    ctx: &AppContext,
    id: Option<i64>,
    fields: &EventFields,
    out: &mut dyn Write,
) -> Result<CommandStatus> {
    if !enter_admin_page(ctx, ADMIN_EVENTS_PATH, out)? {
        return Ok(CommandStatus::Failed);
    }

    let mut page = ctx.events_page();
    page.mount().await?;
    if let PageState::Error(message) = page.state() {
        writeln!(out, "✗ {}", message)?;
        return Ok(CommandStatus::Failed);
    }

    match id {
        Some(id) => page.open_edit(id)?,
        None => page.open_add()?,
    }
    if let Some(form) = page.form_mut() {
        fields.apply(form);
    }

    let outcome = page.submit().await?;
    finish_mutation(&page, &outcome, out)
}

/// Delete after confirmation (skipped with `assume_yes`)
pub async fn handle_event_delete(
    ctx: &AppContext,
    id: i64,
    assume_yes: bool,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<CommandStatus> {
    if !enter_admin_page(ctx, ADMIN_EVENTS_PATH, out)? {
        return Ok(CommandStatus::Failed);
    }

    let mut page = ctx.events_page();
    page.mount().await?;
    if let PageState::Error(message) = page.state() {
        writeln!(out, "✗ {}", message)?;
        return Ok(CommandStatus::Failed);
    }

    let outcome = page
        .delete(id, |event| {
            assume_yes
                || confirm(
                    &format!("Are you sure you want to delete \"{}\"?", event.title),
                    input,
                    out,
                )
        })
        .await?;
    finish_mutation(&page, &outcome, out)
}
