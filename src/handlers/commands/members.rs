//! Member commands: the public members page and the members admin page

use std::io::{BufRead, Write};
use clap::Args;
use crate::models::{CreateMemberRequest, Member};
use crate::state::{AppContext, PageState};
use crate::utils::errors::Result;
use crate::utils::helpers::initials;
use crate::views::partition_members;
use super::{confirm, enter_admin_page, finish_mutation, CommandStatus};

const ADMIN_MEMBERS_PATH: &str = "/admin/members";

/// Member form fields; unset fields keep their current value
#[derive(Debug, Clone, Default, Args)]
pub struct MemberFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

impl MemberFields {
    pub fn apply(&self, form: &mut CreateMemberRequest) {
        if let Some(name) = &self.name {
            form.name = name.clone();
        }
        if let Some(position) = &self.position {
            form.position = position.clone();
        }
        if let Some(email) = &self.email {
            form.email = email.clone();
        }
        if let Some(url) = &self.image_url {
            form.image_url = Some(url.clone());
        }
        if let Some(description) = &self.description {
            form.description = Some(description.clone());
        }
        if let Some(active) = self.active {
            form.active = Some(active);
        }
    }
}

fn write_member_line(member: &Member, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "  [{}] {} - {} <{}>{}",
        member.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
        member.name,
        member.position,
        member.email,
        if member.active { "" } else { " (inactive)" }
    )?;
    Ok(())
}

/// Public profile card: the photo URL, or initials when there is none
fn write_profile_line(member: &Member, out: &mut dyn Write) -> Result<()> {
    let avatar = match member.image_url.as_deref().filter(|_| member.has_photo()) {
        Some(url) => url.to_string(),
        None => format!("({})", initials(&member.name)),
    };
    writeln!(out, "  {} {} - {}", avatar, member.name, member.position)?;
    if let Some(description) = &member.description {
        writeln!(out, "      {}", description)?;
    }
    Ok(())
}

/// Public members page: leadership team first, then everyone else active
pub async fn handle_public_members(ctx: &AppContext, out: &mut dyn Write) -> Result<CommandStatus> {
    ctx.router.visit("/members");
    let members = match ctx.services.member_service.list().await {
        Ok(members) => members,
        Err(e) => {
            writeln!(out, "✗ {}", e.user_message("Failed to fetch members"))?;
            return Ok(CommandStatus::Failed);
        }
    };

    let split = partition_members(&members, ctx.leadership_roles());
    writeln!(out, "Leadership Team ({})", split.leadership.len())?;
    for member in &split.leadership {
        write_profile_line(member, out)?;
    }
    writeln!(out, "Members ({})", split.regular.len())?;
    for member in &split.regular {
        write_profile_line(member, out)?;
    }
    Ok(CommandStatus::Done)
}

/// Admin members page listing
pub async fn handle_members_list(ctx: &AppContext, out: &mut dyn Write) -> Result<CommandStatus> {
    if !enter_admin_page(ctx, ADMIN_MEMBERS_PATH, out)? {
        return Ok(CommandStatus::Failed);
    }

    let mut page = ctx.members_page();
    page.mount().await?;
    if let PageState::Error(message) = page.state() {
        writeln!(out, "✗ {}", message)?;
        return Ok(CommandStatus::Failed);
    }

    let split = partition_members(page.records(), ctx.leadership_roles());
    writeln!(
        out,
        "Members ({} total, {} active, {} inactive, {} without photo)",
        page.records().len(),
        split.active.len(),
        split.inactive.len(),
        split.without_photo.len()
    )?;
    for member in page.records() {
        write_member_line(member, out)?;
    }
    Ok(CommandStatus::Done)
}

pub async fn handle_member_show(ctx: &AppContext, id: i64, out: &mut dyn Write) -> Result<CommandStatus> {
    match ctx.services.member_service.get(id).await {
        Ok(member) => {
            writeln!(out, "{} ({})", member.name, member.position)?;
            writeln!(out, "  email:  {}", member.email)?;
            writeln!(out, "  status: {}", if member.active { "active" } else { "inactive" })?;
            if let Some(description) = &member.description {
                writeln!(out, "  {}", description)?;
            }
            Ok(CommandStatus::Done)
        }
        Err(e) => {
            writeln!(out, "✗ {}", e.user_message("Failed to fetch member"))?;
            Ok(CommandStatus::Failed)
        }
    }
}

/// Add (no id) or edit (with id) through the admin page's form
pub async fn handle_member_save(
    ctx: &AppContext,
    id: Option<i64>,
    fields: &MemberFields,
    out: &mut dyn Write,
) -> Result<CommandStatus> {
    if !enter_admin_page(ctx, ADMIN_MEMBERS_PATH, out)? {
        return Ok(CommandStatus::Failed);
    }

    let mut page = ctx.members_page();
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
pub async fn handle_member_delete(
    ctx: &AppContext,
    id: i64,
    assume_yes: bool,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<CommandStatus> {
    if !enter_admin_page(ctx, ADMIN_MEMBERS_PATH, out)? {
        return Ok(CommandStatus::Failed);
    }

    let mut page = ctx.members_page();
    page.mount().await?;
    if let PageState::Error(message) = page.state() {
        writeln!(out, "✗ {}", message)?;
        return Ok(CommandStatus::Failed);
    }

    let outcome = page
        .delete(id, |member| {
            assume_yes
                || confirm(
                    &format!("Are you sure you want to delete {}?", member.name),
                    input,
                    out,
                )
        })
        .await?;
    finish_mutation(&page, &outcome, out)
}
