//! Aarya Club console
//!
//! Main application entry point

use std::io::{self, Write};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use AaryaClub::{
    config::Settings,
    handlers::commands::{
        dashboard, events, members, navigation, session,
        events::EventFields,
        members::MemberFields,
        CommandStatus,
    },
    state::{AppContext, RegistrationForm},
    utils::logging,
};

#[derive(Debug, Parser)]
#[command(name = "aarya-club", version, about = "Aarya Club admin console")]
struct Cli {
    /// Configuration file (extension optional; missing is fine)
    #[arg(long, global = true, default_value = "config")]
    config: String,

    /// Override the API base URL (`/api` is appended when missing)
    #[arg(long, global = true, env = "AARYA_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in as an administrator
    Login {
        username: String,
        #[arg(long, env = "AARYA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        full_name: String,
        #[arg(long, env = "AARYA_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Admin dashboard summary
    Dashboard,
    /// Events pages
    Events {
        #[command(subcommand)]
        action: EventAction,
    },
    /// Members pages
    Members {
        #[command(subcommand)]
        action: MemberAction,
    },
    /// Visit a path through the route guard
    Open { path: String },
}

#[derive(Debug, Subcommand)]
enum EventAction {
    /// Public view: upcoming and past events
    Public,
    /// Admin list
    List,
    Show { id: i64 },
    Add {
        #[command(flatten)]
        fields: EventFields,
    },
    Edit {
        id: i64,
        #[command(flatten)]
        fields: EventFields,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
enum MemberAction {
    /// Public view: leadership team and members
    Public,
    /// Admin list
    List,
    Show { id: i64 },
    Add {
        #[command(flatten)]
        fields: MemberFields,
    },
    Edit {
        id: i64,
        #[command(flatten)]
        fields: MemberFields,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let mut settings = Settings::from_file(&cli.config)
        .with_context(|| format!("failed to load configuration from '{}'", cli.config))?;
    if let Some(api_url) = cli.api_url.clone() {
        settings.api.base_url = api_url;
    }
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let log_guard = logging::init_logging(&settings.logging)?;
    debug!("Starting {}", AaryaClub::info());

    let ctx = AppContext::bootstrap(settings)?;
    info!(
        authenticated = ctx.session_store.is_authenticated(),
        "Session restored"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let status = run(&ctx, cli.command, &mut out).await?;
    out.flush()?;
    drop(log_guard);

    if !status.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

async fn run(ctx: &AppContext, command: Commands, out: &mut dyn Write) -> anyhow::Result<CommandStatus> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let status = match command {
        Commands::Login { username, password } => {
            session::handle_login(ctx, &username, &password, out).await?
        }
        Commands::Register {
            username,
            email,
            full_name,
            password,
            confirm_password,
        } => {
            let form = RegistrationForm {
                username,
                email,
                full_name,
                password,
                confirm_password,
            };
            session::handle_register(ctx, &form, out).await?
        }
        Commands::Logout => session::handle_logout(ctx, out)?,
        Commands::Whoami => session::handle_whoami(ctx, out)?,
        Commands::Dashboard => dashboard::handle_dashboard(ctx, out).await?,
        Commands::Events { action } => match action {
            EventAction::Public => events::handle_public_events(ctx, out).await?,
            EventAction::List => events::handle_events_list(ctx, out).await?,
            EventAction::Show { id } => events::handle_event_show(ctx, id, out).await?,
            EventAction::Add { fields } => events::handle_event_save(ctx, None, &fields, out).await?,
            EventAction::Edit { id, fields } => {
                events::handle_event_save(ctx, Some(id), &fields, out).await?
            }
            EventAction::Delete { id, yes } => {
                events::handle_event_delete(ctx, id, yes, &mut input, out).await?
            }
        },
        Commands::Members { action } => match action {
            MemberAction::Public => members::handle_public_members(ctx, out).await?,
            MemberAction::List => members::handle_members_list(ctx, out).await?,
            MemberAction::Show { id } => members::handle_member_show(ctx, id, out).await?,
            MemberAction::Add { fields } => members::handle_member_save(ctx, None, &fields, out).await?,
            MemberAction::Edit { id, fields } => {
                members::handle_member_save(ctx, Some(id), &fields, out).await?
            }
            MemberAction::Delete { id, yes } => {
                members::handle_member_delete(ctx, id, yes, &mut input, out).await?
            }
        },
        Commands::Open { path } => navigation::handle_open(ctx, &path, out)?,
    };

    Ok(status)
}
