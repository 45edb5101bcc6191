// src/main.rs

use anyhow::Context;
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rollcall::api::ApiClient;
use rollcall::app::{App, AppEvent, Command};
use rollcall::chart;
use rollcall::config::{get_config, initialize_config};
use rollcall::key_handlers::handle_key;
use rollcall::logging;
use rollcall::ui;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Raw terminal events plus the spinner tick.
enum Event {
    Input(CEvent),
    Tick,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    initialize_config().context("failed to initialize configuration")?;
    let config = get_config();
    let _logger =
        logging::init(&config.log_level, &config.log_dir).context("failed to start logging")?;

    log::info!("starting rollcall against {}", config.base_url);

    let api = Arc::new(
        ApiClient::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
        .context("failed to build api client")?,
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.admin_token.clone());
    app.logs.add(format!("Connecting to {}.", config.base_url));
    let res = run_app(&mut terminal, app, api).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    api: Arc<ApiClient>,
) -> anyhow::Result<()> {
    let (input_tx, mut input_rx) = mpsc::channel::<Event>(100);
    let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(100);

    // Terminal events come off a dedicated thread; ticks drive the
    // spinner even while nobody types.
    std::thread::spawn(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = Duration::from_millis(100);
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(ev) = event::read() {
                    if input_tx.blocking_send(Event::Input(ev)).is_err() {
                        return;
                    }
                }
            }
            if last_tick.elapsed() >= Duration::from_millis(250) {
                if input_tx.blocking_send(Event::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    // One health check at startup, so an unreachable backend shows up
    // in the activity feed before the first query is typed.
    {
        let api = api.clone();
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            let result = api.health().await;
            let _ = event_tx.send(AppEvent::HealthChecked { result }).await;
        });
    }

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        let app_event = tokio::select! {
            Some(event) = input_rx.recv() => match event {
                Event::Input(CEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_key(key, &app)
                }
                Event::Input(_) => None,
                Event::Tick => Some(AppEvent::Tick),
            },
            Some(event) = event_rx.recv() => Some(event),
            else => break,
        };

        if let Some(event) = app_event {
            if let Some(command) = app.dispatch(event) {
                run_command(&mut app, command, &api, &event_tx);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Executes the follow-up work a dispatch step asked for. Requests go to
/// a task so the loop keeps drawing; exports are quick local writes.
fn run_command(
    app: &mut App,
    command: Command,
    api: &Arc<ApiClient>,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    match command {
        Command::SendChat { seq, request } => {
            let api = api.clone();
            let event_tx = event_tx.clone();
            tokio::spawn(async move {
                let result = api.chat(&request).await;
                let _ = event_tx
                    .send(AppEvent::RequestFinished { seq, result })
                    .await;
            });
        }
        Command::ExportChart {
            message_id,
            chart: payload,
        } => match chart::export(Path::new("."), message_id, &payload) {
            Ok(path) => {
                log::info!("chart exported to {}", path.display());
                app.logs.add(format!("Chart saved to {}.", path.display()));
            }
            Err(e) => {
                log::warn!("chart export failed: {}", e);
                app.logs.add(format!("Chart export failed: {}", e));
            }
        },
    }
}
