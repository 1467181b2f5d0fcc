//! WeatherHub - current weather in the terminal
//!
//! 1. Event (keyboard) -> WeatherDisplay::handle_event() -> Actions
//! 2. Actions dispatched to the Store
//! 3. Reducer updates state and returns effects
//! 4. Effects run as tasks on the TaskManager (API calls, geolocation)
//! 5. If state changed, re-render
//!
//! # Usage
//!
//! ```sh
//! OPENWEATHER_API_KEY=... weatherhub --city Paris
//! weatherhub --locator fixed --lat 48.85 --lon 2.35 --allow-location
//! ```

use std::cell::RefCell;
use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use weatherhub::cli::{Args, ConfigError, Settings};
use weatherhub::components::{WeatherDisplay, WeatherDisplayProps};
use weatherhub::{logging, Component, EventOutcome, Runtime};
use weatherhub_core::{reducer, Action, AppState, EffectHandler, Store, TracingMiddleware};

/// Spinner frame interval
const LOADING_ANIM_TICK_MS: u64 = 100;

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    let settings = match Settings::try_from(args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    if let Some(log_path) = logging::init(settings.log_file.as_deref()) {
        info!(log = %log_path.display(), city = %settings.city, "Starting WeatherHub");
    }

    let handler = match build_handler(&settings) {
        Ok(handler) => handler,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if !handler.has_credentials() {
        warn!("No API key configured; lookups will fail until OPENWEATHER_API_KEY is set");
    }

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, settings, handler).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        warn!(error = %e, "WeatherHub exited with an error");
    }
    result
}

fn build_handler(settings: &Settings) -> Result<EffectHandler, ConfigError> {
    Ok(EffectHandler::new(
        settings.build_client()?,
        settings.build_locator()?,
    ))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    settings: Settings,
    handler: EffectHandler,
) -> io::Result<()> {
    let state = AppState::new(settings.city)
        .with_unit(settings.unit)
        .with_theme(settings.theme)
        .with_credentials(handler.has_credentials())
        .with_location_consent(settings.allow_location);
    let store = Store::with_middleware(state, reducer, TracingMiddleware::new());

    let mut runtime = Runtime::new(store, handler);

    // Tick timer for the loading spinner
    runtime
        .subscriptions()
        .interval("tick", Duration::from_millis(LOADING_ANIM_TICK_MS), || {
            Action::Tick
        });

    // Auto-refresh timer
    if let Some(period) = settings.refresh_interval {
        runtime
            .subscriptions()
            .interval("refresh", period, || Action::WeatherFetch);
    }

    // Fetch the initial city on start
    runtime.enqueue(Action::WeatherFetch);

    let ui = RefCell::new(WeatherDisplay::new());

    runtime
        .run(
            terminal,
            |frame, area, state| {
                ui.borrow_mut()
                    .render(frame, area, WeatherDisplayProps { state });
            },
            |event, state| {
                EventOutcome::from_actions(
                    ui.borrow_mut()
                        .handle_event(event, WeatherDisplayProps { state }),
                )
            },
        )
        .await
}
