//! A horizontally scrolling portfolio in the terminal.
//!
//! The page tracks which section and subsection is in view and keeps the nav
//! highlight, the marquee label and the sticky title in step with it.  Run
//! with `--write-config` to dump the effective configuration to disk.

mod app;
mod config;
mod core;
mod error;
mod ui;

use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::time::MissedTickBehavior;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::site::Site;
use crate::ui::{
    chrome::{FooterBar, MarqueeBar, NavBar, StickyTitleBar},
    page::PageWidget,
};

/// Frames per marquee column step.
const MARQUEE_FRAMES_PER_STEP: u64 = 8;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Horizontally scrolling portfolio")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/folio/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame interval in milliseconds; detection runs at most once per frame.
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Number of marquee display slots.
    #[arg(long)]
    marquee_slots: Option<usize>,

    /// Run without the sticky title bar.
    #[arg(long)]
    no_sticky_title: bool,

    /// Run without the floating footer.
    #[arg(long)]
    no_footer: bool,

    /// Write the effective configuration to disk and exit.
    #[arg(long)]
    write_config: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only emits when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // the TUI owns stdout
        .init();

    let cli = Cli::parse();

    // ── configuration ─────────────────────────────────────────
    let mut config = AppConfig::load(cli.config.as_deref());
    if let Some(ms) = cli.frame_ms {
        config.frame_ms = ms.clamp(4, 100);
    }
    if let Some(slots) = cli.marquee_slots {
        config.marquee_slots = slots.min(8);
    }
    if cli.write_config {
        let path = config.save(cli.config.as_deref())?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut options = config.view_options();
    if cli.no_sticky_title {
        options.sticky_title = false;
    }
    if cli.no_footer {
        options.footer = None;
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout_handle = stdout();
    execute!(stdout_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut state = AppState::new(
        Site::portfolio(),
        config,
        &options,
        (size.width, size.height),
        Instant::now(),
    );

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, state: &mut AppState) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut frames = tokio::time::interval(state.config.frame_interval());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        terminal.draw(|frame| draw(frame, state))?;

        // Marquee fades and the footer countdown; nothing to wait for when
        // the queue is empty.
        let deadline = state.controller.next_deadline();

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                let now = Instant::now();
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k, now),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m, now),
                    AppEvent::Resize(w, h) => state.on_resize(w, h, now),
                }
            }

            _ = sleep_until(deadline) => {
                state.controller.on_timers(Instant::now());
            }

            _ = frames.tick() => {
                state.on_frame(Instant::now());
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at.into()).await,
        None => std::future::pending().await,
    }
}

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = state.layout;
    let view = state.controller.view();

    frame.render_widget(NavBar { items: &view.nav }, layout.nav_area);
    frame.render_widget(
        MarqueeBar {
            slots: view.marquee.slots(),
            tick: state.tick / MARQUEE_FRAMES_PER_STEP,
        },
        layout.marquee_area,
    );
    if let Some(title) = view.sticky_title.as_deref() {
        frame.render_widget(StickyTitleBar { text: title }, layout.title_area);
    }

    frame.render_widget(
        PageWidget {
            site: &state.site,
            layout: &state.page,
            labels: state.controller.labels(),
            offset: state.scroll.position(),
            focused: state.controller.active().subsection.as_deref(),
        },
        layout.page_area,
    );

    if view.footer.is_some() {
        let hint = state.config.footer_hint();
        frame.render_widget(
            FooterBar {
                visible: view.footer_visible(),
                hint: &hint,
                progress: state.progress(),
            },
            layout.footer_area,
        );
    }
}
