//! A scrolling profile screen whose collapsing header fades with the list.
//!
//! The header sits on top of the list as its sticky first item.  Scrolled to
//! the very top, the avatar and label are shown; scrolled anywhere else they
//! fade out.  The menu button (or `Home`) glides the list back to the top.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

use crate::app::{
    clock::FrameClock,
    event::{spawn_input_reader, InputEvent},
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::scroll::{scroll_channel, ScrollRequest};
use crate::ui::{avatar::AvatarImage, screen};

/// Frame interval while something is animating.
const FRAME: Duration = Duration::from_millis(16);
/// Input poll interval; an idle poll still redraws once.
const POLL: Duration = Duration::from_millis(250);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Profile screen with a collapsing header")]
struct Cli {
    /// Number of placeholder rows under the header.
    #[arg(long)]
    items: Option<usize>,

    /// Keep the header fully shown instead of fading it.
    #[arg(long = "static")]
    static_header: bool,

    /// Length of a full show/hide transition, in milliseconds.
    #[arg(long = "duration-ms")]
    duration_ms: Option<u64>,

    /// Layout units per pixel; larger values draw a smaller header.
    #[arg(long)]
    scale: Option<u16>,

    /// Text under the avatar.
    #[arg(long)]
    label: Option<String>,

    /// Image file to show in the avatar circle.
    #[arg(long)]
    avatar: Option<PathBuf>,

    /// Start with the scroll readout hidden.
    #[arg(long = "no-debug")]
    no_debug: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Persist the effective configuration, then continue.
    #[arg(long = "save-config")]
    save_config: bool,
}

impl Cli {
    /// Layer command-line overrides on top of the loaded config.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(items) = self.items {
            config.item_count = items;
        }
        if self.static_header {
            config.animate_header = false;
        }
        if let Some(ms) = self.duration_ms {
            config.animation_ms = ms;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(ref label) = self.label {
            config.label = label.clone();
        }
        if let Some(ref avatar) = self.avatar {
            config.avatar = Some(avatar.clone());
        }
        if self.no_debug {
            config.show_debug = false;
        }
        config.normalise();
    }
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("could not create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // Never pollute stdout; the terminal UI draws there.
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = AppConfig::load();
    cli.apply(&mut config);
    if cli.save_config {
        config.save()?;
    }
    tracing::info!(
        items = config.item_count,
        animate = config.animate_header,
        ms = config.animation_ms,
        scale = config.scale,
        "starting"
    );

    let avatar = AvatarImage::load_or_placeholder(config.avatar.as_deref());
    let (scroll_handle, scroll_rx) = scroll_channel();
    let mut state = AppState::new(config, avatar, scroll_handle);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut state, scroll_rx).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

/// Event loop: advance, draw, then wait for input, a scroll request, or the
/// next frame while animating.
async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    mut scroll_rx: UnboundedReceiver<ScrollRequest>,
) -> Result<()> {
    let mut events = spawn_input_reader(POLL);
    let mut clock = FrameClock::new(Instant::now(), FRAME);

    loop {
        state.frame(clock.tick(Instant::now()));

        terminal.draw(|frame| screen::draw(frame, state))?;

        if !state.is_animating() {
            clock.idle();
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    InputEvent::Key(k) => handler::handle_key(state, k),
                    InputEvent::Mouse(m) => handler::handle_mouse(state, m),
                    InputEvent::Resize | InputEvent::Idle => {}
                }
            }

            Some(request) = scroll_rx.recv() => {
                state.list.handle_request(request);
            }

            _ = tokio::time::sleep(FRAME), if state.is_animating() => {}

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
