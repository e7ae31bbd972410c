mod api;
mod app;
mod cli;
mod event;
mod help;
mod keys;
mod loading;
mod logging;
mod scroll;
mod search;
mod settings;
mod store;
mod theme;
mod tui;
mod views;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use ratatui::Frame;
use ratatui::layout::Size;
use tracing::{info, warn};

use api::OmdbClient;
use app::{App, Message, View};
use cli::Cli;
use event::Event;
use settings::Settings;
use theme::{ResolvedTheme, ThemeVariant, default_for_variant, detect_terminal_theme};
use tui::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run_tui(cli).await
}

fn resolve_theme(cli: &Cli, settings: &Settings) -> ResolvedTheme {
    // Priority: CLI flag > settings file > terminal background
    let variant = if cli.dark {
        ThemeVariant::Dark
    } else if cli.light {
        ThemeVariant::Light
    } else if let Some(variant) = settings.theme {
        variant
    } else {
        detect_terminal_theme()
    };
    default_for_variant(variant)
}

async fn run_tui(cli: Cli) -> Result<()> {
    let config_dir = settings::config_dir(cli.config_dir.as_ref());
    let settings = match &config_dir {
        Some(dir) => Settings::load(&settings::settings_path(dir))?,
        None => Settings::default(),
    };

    if let Some(dir) = &config_dir {
        let log_path = settings::log_path(dir);
        if let Err(e) = logging::init(&log_path, cli.verbose) {
            eprintln!("Logging disabled: {:#}", e);
        } else if cli.verbose {
            eprintln!("Logging to {}", log_path.display());
        }
    }

    // Before touching the terminal, so the error prints normally.
    let credential = settings::resolve_credential(cli.api_key.as_deref(), &settings)?;
    let base_url = cli.base_url.clone().or_else(|| settings.base_url.clone());
    let client = OmdbClient::new(credential, base_url).context("Failed to build OMDb client")?;

    let resolved_theme = resolve_theme(&cli, &settings);
    info!(theme = %resolved_theme.name, variant = ?resolved_theme.variant, "starting");

    let mut terminal = tui::init()?;
    let mut app = App::new(resolved_theme, Arc::new(client));
    let mut events = EventHandler::new(100);
    let mut last_size: Option<Size> = None;

    app.init(cli.term.as_deref());

    let outcome = run_loop(&mut terminal, &mut app, &mut events, &mut last_size).await;

    app.teardown();
    events.stop();
    tui::restore()?;
    if let Err(e) = &outcome {
        warn!(error = %e, "event loop ended with an error");
    }
    outcome
}

async fn run_loop(
    terminal: &mut tui::Tui,
    app: &mut App,
    events: &mut EventHandler,
    last_size: &mut Option<Size>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(app, frame))?;

        // The scroll trigger depends on how many rows fit.
        let size = terminal.size()?;
        if *last_size != Some(size) {
            if last_size.map(|s| s.width) != Some(size.width) {
                app.update(Message::UpdateViewportWidth(size.width));
            }
            if last_size.map(|s| s.height) != Some(size.height) {
                app.update(Message::UpdateViewportHeight(size.height));
            }
            *last_size = Some(size);
        }

        while let Ok(result) = app.result_rx.try_recv() {
            app.handle_async_result(result);
        }

        if app.should_quit {
            return Ok(());
        }

        match events.next().await? {
            Event::Key(key) => {
                if let Some(msg) = keys::handle_key(key, app) {
                    app.update(msg);
                }
            }
            Event::Tick | Event::Resize => {}
        }
    }
}

fn render(app: &App, frame: &mut Frame) {
    use ratatui::layout::{Constraint, Layout};

    let area = frame.area();

    let (main_area, debug_area) = if app.debug.visible {
        let chunks = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(App::DEBUG_PANE_HEIGHT),
        ])
        .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    match &app.view {
        View::Search => views::search::render(frame, app, main_area),
        View::Detail { .. } => views::detail::render(frame, app, main_area),
    }

    if let Some(debug_area) = debug_area {
        views::debug::render(frame, app, debug_area);
    }

    views::help_overlay::render(frame, app, main_area);
}
