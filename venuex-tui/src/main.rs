mod app;
mod event;
mod theme;
mod ui;
mod views;

use anyhow::{Context, Result};
use app::{App, Command};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use event::{AppEvent, EventReader};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use venuex_core::{
    ensure_data_dir, load_venues_from_file, sample_venues, ChatBackend, ChatRequest, ChatSession,
    CliErrorDisplay, HttpChatClient, LoggingConfig, VenuexConfig, VenuexResult,
};

#[derive(Parser)]
#[command(name = "venuex-tui", version, about = "VenueX sports venue assistant")]
struct Args {
    /// Backend base URL
    #[arg(long, env = "VENUEX_API_URL")]
    api_url: Option<String>,

    /// Identity sent with every chat request
    #[arg(long, env = "VENUEX_USER_ID")]
    user_id: Option<String>,

    #[arg(short, long)]
    theme: Option<usize>,

    /// JSON file with a venue listing for the Venues tab
    #[arg(long)]
    venues: Option<PathBuf>,
}

type Term = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).map_err(|e| {
        eprintln!("{}", CliErrorDisplay::new(&e));
        e
    })?;

    init_logging(&config.logging)?;
    info!(backend = %config.api.base_url, "Starting venuex-tui");

    let venues = match args.venues {
        Some(ref path) => load_venues_from_file(path)
            .with_context(|| format!("Failed to load venues from {}", path.display()))?,
        None => sample_venues(),
    };

    let client = Arc::new(HttpChatClient::new(&config.api)?);
    let session = ChatSession::from_config(&config.chat);
    info!(user_id = %session.user_id(), "Chat session ready");

    let mut app = App::new(session, venues, config.api.base_url.clone());
    app.set_theme(config.tui.theme);
    let app = Arc::new(Mutex::new(app));

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &app, &client, &config).await;
    restore_terminal(&mut terminal)?;

    app.lock().await.session.shutdown();

    if let Err(ref e) = result {
        error!("Application error: {:#}", e);
    }
    result
}

fn load_config(args: &Args) -> VenuexResult<VenuexConfig> {
    let mut config = VenuexConfig::load()?;
    if let Some(ref url) = args.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(ref user_id) = args.user_id {
        config.chat.user_id = Some(user_id.clone());
    }
    if let Some(theme) = args.theme {
        config.tui.theme = theme;
    }
    config.validate()?;
    Ok(config)
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let path = if logging.file_path.is_empty() {
        ensure_data_dir()?.join("venuex-tui.log")
    } else {
        PathBuf::from(&logging.file_path)
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let directive = if logging.level.contains('=') {
        logging.level.clone()
    } else {
        format!("venuex_tui={0},venuex_core={0}", logging.level)
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json_format {
        registry
            .with(fmt::layer().json().with_writer(std::sync::Mutex::new(file)))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file)),
            )
            .init();
    }
    Ok(())
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run(
    terminal: &mut Term,
    app: &Arc<Mutex<App>>,
    client: &Arc<HttpChatClient>,
    config: &VenuexConfig,
) -> Result<()> {
    let events = EventReader::new(config.tui.tick_rate_ms);
    let health_interval = Duration::from_secs(config.tui.health_interval_secs.max(1));

    let mut last_health = Instant::now();
    spawn_health(Arc::clone(app), Arc::clone(client));

    loop {
        {
            let app_guard = app.lock().await;
            terminal.draw(|f| ui::render(f, &app_guard))?;
            if !app_guard.running {
                break;
            }
        }

        match events.next()? {
            AppEvent::Key(key) => {
                let command = app.lock().await.handle_key(key);
                match command {
                    Some(Command::SendChat(request)) => {
                        spawn_chat(Arc::clone(app), Arc::clone(client), request);
                    }
                    Some(Command::CheckHealth) => {
                        spawn_health(Arc::clone(app), Arc::clone(client));
                        last_health = Instant::now();
                    }
                    None => {}
                }
            }
            AppEvent::Tick => {
                if last_health.elapsed() >= health_interval {
                    spawn_health(Arc::clone(app), Arc::clone(client));
                    last_health = Instant::now();
                }
            }
        }
    }

    Ok(())
}

/// Sends one chat request; the app lock is not held while waiting.
fn spawn_chat(app: Arc<Mutex<App>>, client: Arc<HttpChatClient>, request: ChatRequest) {
    tokio::spawn(async move {
        let result = client.send(&request).await;
        let mut guard = app.lock().await;
        guard.finish_chat(result);
    });
}

fn spawn_health(app: Arc<Mutex<App>>, client: Arc<HttpChatClient>) {
    tokio::spawn(async move {
        let result = client.health().await;
        let mut guard = app.lock().await;
        guard.apply_health(result);
    });
}
