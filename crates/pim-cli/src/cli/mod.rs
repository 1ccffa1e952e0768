//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use pim_core::api::ApiClient;
use pim_core::config::{Config, paths};
use pim_core::session::Session;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pim")]
#[command(version = "0.1")]
#[command(about = "Terminal client for the particles note service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the API base URL from config
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show config, session, and backend reachability
    Status,
    /// Clear the persisted session
    Logout,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Persist the API base URL in the config file
    SetApiUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;
    let base_url = cli
        .api_url
        .unwrap_or_else(|| config.effective_api_base_url());
    url::Url::parse(&base_url).with_context(|| format!("invalid API base URL '{base_url}'"))?;
    let api = ApiClient::new(base_url);

    match cli.command {
        None => {
            let _guard = init_logging()?;
            tracing::info!(base_url = api.base_url(), "starting TUI");
            pim_tui::run(api)
        }
        Some(Commands::Status) => status(&api).await,
        Some(Commands::Logout) => logout(),
        Some(Commands::Config { command }) => config_command(command),
    }
}

fn config_command(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            println!("{}", paths::config_path().display());
            Ok(())
        }
        ConfigCommands::SetApiUrl { url } => {
            url::Url::parse(&url).with_context(|| format!("invalid API base URL '{url}'"))?;
            Config::save_api_base_url(&url).context("save config")?;
            println!("api url set to {url}");
            Ok(())
        }
    }
}

/// File logging for the TUI: stderr is owned by the alternate screen, so
/// everything goes to a daily-rotated file under the logs directory.
///
/// The returned guard flushes buffered log lines on drop.
fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = paths::logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("create logs dir {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "pim.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env("PIM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

async fn status(api: &ApiClient) -> Result<()> {
    println!("config:  {}", paths::config_path().display());
    println!("api url: {}", api.base_url());

    match Session::load() {
        Ok(Some(session)) => println!("session: {}", session.username),
        Ok(None) => println!("session: none"),
        Err(error) => println!("session: unreadable ({error:#})"),
    }

    match api.health().await {
        Ok(()) => println!("backend: reachable"),
        Err(failure) => println!("backend: unreachable ({failure})"),
    }
    Ok(())
}

fn logout() -> Result<()> {
    match Session::load().context("read session")? {
        Some(session) => {
            Session::clear().context("clear session")?;
            println!("Logged out {}.", session.username);
        }
        None => println!("No active session."),
    }
    Ok(())
}
