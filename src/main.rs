mod config;
mod controller;
mod error;
mod lcd;
mod logging;
mod model;
mod view;

use std::io;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};

use config::{Cli, Command, Settings};
use controller::{AppController, KeyAction, Simulator};
use lcd::{Discard, FrameSink, LcdDevice};
use model::DisplayRenderer;
use view::LcdView;

const EVENT_QUEUE: usize = 64;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== lcd-nowplaying starting ===");

    let settings = config::resolve(&cli).context("Invalid configuration")?;
    tracing::info!(
        device = %settings.device.display(),
        columns = settings.columns,
        tick_interval_ms = settings.tick_interval_ms,
        "Settings resolved"
    );

    let renderer = DisplayRenderer::new(settings.renderer_config());

    let res = match cli.command.clone().unwrap_or(Command::Serve) {
        Command::Serve => serve(renderer, &settings).await,
        Command::Simulate { mirror } => simulate(renderer, &settings, mirror).await,
    };

    if let Err(err) = &res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("lcd-nowplaying shutting down");
    res
}

fn ticker(settings: &Settings) -> Interval {
    let mut ticker = tokio::time::interval(settings.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Drive the LCD from JSON-lines events on stdin until input ends or Ctrl-C.
async fn serve(renderer: DisplayRenderer, settings: &Settings) -> Result<()> {
    let mut device = LcdDevice::new(&settings.device);
    if let Err(e) = device.open() {
        tracing::warn!(error = %e, "LCD device unavailable, retrying on every frame");
    }

    let mut controller = AppController::new(renderer, Box::new(device));

    let (tx, mut rx) = mpsc::channel(EVENT_QUEUE);
    controller::spawn_stdin_reader(tx)?;

    let mut ticker = ticker(settings);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => controller.tick(),
            event = rx.recv() => match event {
                Some(event) => controller.handle_event(event),
                None => {
                    tracing::info!("Event input closed");
                    break;
                }
            },
            _ = &mut shutdown => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    controller.shutdown();
    Ok(())
}

/// Preview the LCD in the terminal, with the keyboard standing in for a player.
async fn simulate(renderer: DisplayRenderer, settings: &Settings, mirror: bool) -> Result<()> {
    let sink: Box<dyn FrameSink> = if mirror {
        Box::new(LcdDevice::new(&settings.device))
    } else {
        Box::new(Discard)
    };
    let mirror_path = mirror.then(|| settings.device.display().to_string());

    let mut controller = AppController::new(renderer, sink);
    let mut simulator = Simulator::default();

    tracing::info!(mirror, "Starting simulator...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_simulator(
        &mut terminal,
        &mut controller,
        &mut simulator,
        settings,
        mirror_path.as_deref(),
    )
    .await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.shutdown();
    res
}

async fn run_simulator(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut AppController,
    simulator: &mut Simulator,
    settings: &Settings,
    mirror: Option<&str>,
) -> Result<()> {
    let mut keys = EventStream::new();
    let mut ticker = ticker(settings);

    loop {
        terminal.draw(|f| {
            LcdView::render(f, controller.renderer(), mirror);
        })?;

        tokio::select! {
            _ = ticker.tick() => controller.tick(),
            key = keys.next() => match key {
                Some(Ok(Event::Key(key))) => match simulator.handle_key_event(key) {
                    KeyAction::Events(events) => {
                        for event in events {
                            controller.handle_event(event);
                        }
                    }
                    KeyAction::Quit => break,
                    KeyAction::Ignore => {}
                },
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal input"),
                None => break,
            },
        }
    }

    Ok(())
}
