mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use controller::AppController;
use model::{detect_system_hint, select_daily_song, AppModel, PreferenceStore, ThemeResolver};
use view::{AppView, RenderState};

const PREFERENCES_FILE: &str = ".cache/preferences.json";

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== homepage-rs starting ===");

    let config = Arc::new(config::load(Path::new(config::CONFIG_FILE)));

    // Theme: stored preference + terminal background hint
    let store = PreferenceStore::new(PREFERENCES_FILE);
    let system_hint = detect_system_hint();
    let resolver = ThemeResolver::new(store, system_hint);

    let model = Arc::new(Mutex::new(AppModel::new(config.clone(), resolver)));

    // Song of the day: picked once at startup, overridable for demos
    let override_index = daily_song_override();
    let today = chrono::Local::now().date_naive();
    let daily = select_daily_song(&config.songs, today, override_index.as_deref()).cloned();
    match &daily {
        Some(song) => tracing::info!(title = %song.title, "daily song selected"),
        None => tracing::info!("song catalog is empty"),
    }
    model.lock().await.set_daily_song(daily).await;

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let controller = AppController::new(model.clone(), config);

    let res = run_app(&mut terminal, model, controller, system_hint).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("homepage-rs shutting down");
    Ok(())
}

/// `--daily-song <n>` (or `--daily-song=<n>`), the query-parameter analog.
fn daily_song_override() -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--daily-song" {
            return args.next();
        }
        if let Some(value) = arg.strip_prefix("--daily-song=") {
            return Some(value.to_string());
        }
    }
    None
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
    mut last_hint: Option<model::Theme>,
) -> io::Result<()> {
    let mut last_hint_check = Instant::now();
    const HINT_CHECK_INTERVAL: Duration = Duration::from_secs(2);

    loop {
        let now = Instant::now();

        // A change of the terminal background hint clears the explicit choice
        if now.duration_since(last_hint_check) >= HINT_CHECK_INTERVAL {
            last_hint_check = now;
            let hint = detect_system_hint();
            if hint != last_hint {
                tracing::debug!(?hint, "system theme hint changed");
                last_hint = hint;
                model.lock().await.system_hint_changed(hint).await;
            }
        }

        // Advance timers and snapshot the state for this frame
        let (theme, ui, toasts, preview, daily, config, should_quit) = {
            let model = model.lock().await;
            model.tick(now).await;
            controller.tick(now).await;
            (
                model.effective_theme().await,
                model.get_ui_state().await,
                model.get_toasts().await,
                model.get_preview().await,
                model.get_daily_song().await,
                model.config(),
                model.should_quit().await,
            )
        };

        terminal.draw(|f| {
            AppView::render(
                f,
                &RenderState {
                    theme,
                    ui: &ui,
                    toasts: &toasts,
                    preview: preview.as_ref(),
                    daily: daily.as_ref(),
                    config: &config,
                },
            );
        })?;

        // Handle input with a short poll time for smooth toast timing
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    let _ = controller.handle_key_event(key).await;
                }
                Event::Mouse(mouse) => {
                    let _ = controller.handle_mouse_event(mouse).await;
                }
                _ => {}
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
