use std::path::PathBuf;
use std::rc::Rc;

use bloodconnect::config::{ClientConfig, ConfigError, SessionConfig};
use bloodconnect::net::api::HttpBackend;
use bloodconnect::net::error::ApiError;
use bloodconnect::net::realtime::{self, RealtimeError};
use bloodconnect::net::types::{DonorPatch, DonorStatus};
use bloodconnect::page::terminal::TerminalPage;
use bloodconnect::session::{LoginOutcome, SessionController, SessionError};
use bloodconnect::state::prefs::Language;
use bloodconnect::state::session::Session;
use bloodconnect::util::dark_mode::ThemeToggle;
use bloodconnect::util::file_store::FileStore;
use bloodconnect::util::storage::{Storage, StorageError};
use bloodconnect::util::timer::TokioTimer;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("backend request failed: {0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Realtime(#[from] RealtimeError),
    #[error("{0} failed")]
    ActionFailed(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "bloodconnect", about = "BloodConnect session and donor CLI")]
struct Cli {
    #[arg(long, env = "BLOODCONNECT_API_BASE_URL")]
    api_base_url: Option<String>,

    #[arg(long, env = "BLOODCONNECT_WS_URL")]
    ws_url: Option<String>,

    #[arg(long, env = "BLOODCONNECT_STORAGE_PATH", help = "JSON file holding session and preferences")]
    storage: Option<PathBuf>,

    #[arg(long, help = "Fabricate sessions and simulate backend success")]
    demo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and print the dashboard page for the account's role.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BLOODCONNECT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// Print the saved session.
    Whoami,
    /// Switch page language and print the translated labels.
    Lang { lang: Language },
    /// Toggle dark mode, or print the saved theme with --show.
    Theme {
        #[arg(long, default_value_t = false)]
        show: bool,
    },
    Donor(DonorCommand),
    /// Print a line per real-time update until the server closes.
    Watch,
    /// Check backend health.
    Ping,
}

#[derive(Args, Debug)]
struct DonorCommand {
    #[command(subcommand)]
    command: DonorSubcommand,
}

#[derive(Subcommand, Debug)]
enum DonorSubcommand {
    Status {
        donor_id: String,
        status: DonorStatus,
    },
    Accept {
        donor_id: String,
        request_id: String,
    },
    Update {
        donor_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        area: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    Dashboard {
        donor_id: String,
    },
}

struct CliContext {
    config: ClientConfig,
    storage: Storage,
    page: Rc<TerminalPage>,
}

impl CliContext {
    fn controller(&self) -> SessionController {
        SessionController::new(
            SessionConfig::from(&self.config),
            self.storage.clone(),
            Rc::new(HttpBackend::new(self.config.api_base_url.clone())),
            self.page.clone(),
            Rc::new(TokioTimer),
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // .env is optional
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(api_base_url) = cli.api_base_url {
        let storage_path = config.storage_path;
        let demo_mode = config.demo_mode;
        config = ClientConfig { storage_path, demo_mode, ..ClientConfig::for_api(&api_base_url) };
    }
    if let Some(ws_url) = cli.ws_url {
        config.ws_url = ws_url;
    }
    if let Some(path) = cli.storage {
        config.storage_path = path;
    }
    config.demo_mode |= cli.demo;

    let store = FileStore::open(&config.storage_path)?;
    let ctx = CliContext { storage: Storage::new(Rc::new(store)), page: Rc::new(TerminalPage::new()), config };

    match cli.command {
        Command::Login { email, password } => run_login(&ctx, &email, &password).await,
        Command::Logout => {
            ctx.controller().logout();
            Ok(())
        }
        Command::Whoami => run_whoami(&ctx),
        Command::Lang { lang } => {
            ctx.controller().toggle_lang(lang);
            Ok(())
        }
        Command::Theme { show } => {
            run_theme(&ctx, show);
            Ok(())
        }
        Command::Donor(donor) => run_donor(&ctx, donor).await,
        Command::Watch => run_watch(&ctx).await,
        Command::Ping => run_ping(&ctx).await,
    }
}

async fn run_login(ctx: &CliContext, email: &str, password: &str) -> Result<(), CliError> {
    let outcome = ctx.controller().login(email, password).await?;
    let session = outcome.session();
    let mode = match &outcome {
        LoginOutcome::Authenticated(_) => "authenticated",
        LoginOutcome::Demo(_) => "demo",
        LoginOutcome::Degraded { .. } => "local",
    };
    println!("{} ({}, {}) [{mode}]", session.name, session.role, session.user_id);
    Ok(())
}

fn run_whoami(ctx: &CliContext) -> Result<(), CliError> {
    match ctx.storage.load::<Session>() {
        Some(session) => println!("{}", serde_json::to_string_pretty(&session)?),
        None => println!("not signed in"),
    }
    Ok(())
}

fn run_theme(ctx: &CliContext, show: bool) {
    let toggle = ThemeToggle::new(ctx.storage.clone(), ctx.page.clone());
    if show {
        println!("{}", toggle.read_preference().as_str());
        return;
    }
    toggle.initialize();
    toggle.toggle();
}

async fn run_donor(ctx: &CliContext, donor: DonorCommand) -> Result<(), CliError> {
    let controller = ctx.controller();
    match donor.command {
        DonorSubcommand::Status { donor_id, status } => {
            if !controller.update_donor_status(&donor_id, status).await {
                return Err(CliError::ActionFailed("status update"));
            }
        }
        DonorSubcommand::Accept { donor_id, request_id } => {
            if !controller.accept_request(&donor_id, &request_id).await {
                return Err(CliError::ActionFailed("accept request"));
            }
        }
        DonorSubcommand::Update { donor_id, name, age, phone, city, area, address } => {
            let patch = DonorPatch { name, age, phone, city, area, address };
            if patch.is_empty() {
                tracing::warn!(%donor_id, "no profile fields given");
            }
            if !controller.update_donor_info(&donor_id, &patch).await {
                return Err(CliError::ActionFailed("profile update"));
            }
        }
        DonorSubcommand::Dashboard { donor_id } => {
            let Some(dashboard) = controller.donor_dashboard(&donor_id).await else {
                return Err(CliError::ActionFailed("dashboard fetch"));
            };
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        }
    }
    Ok(())
}

async fn run_watch(ctx: &CliContext) -> Result<(), CliError> {
    let received = realtime::watch(&ctx.config.ws_url, ctx.page.as_ref()).await?;
    println!("{received} updates");
    Ok(())
}

async fn run_ping(ctx: &CliContext) -> Result<(), CliError> {
    let health = HttpBackend::new(ctx.config.api_base_url.clone()).health().await?;
    println!("{} ({} donors, {} recipients)", health.status, health.donors, health.recipients);
    Ok(())
}
