//! A terminal reader whose floating label follows the section under the
//! viewport's center line.
//!
//! Run the binary with a text file to scroll through it, or without one to
//! see the built-in sample.  Run with `--dump` to print the label position
//! for every scroll offset instead of opening the TUI.

mod app;
mod config;
mod core;
mod document;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Frame, Terminal};
use tokio::time::MissedTickBehavior;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::config::{AppConfig, LabelsKind, ProfileKind, WindowKind};
use crate::core::animator::{AnimatorSettings, Evaluation, LabelAnimator, LabelFrame, Viewport};
use crate::document::Document;
use crate::ui::{
    document_view::DocumentView, label::LabelOverlay, layout::AppLayout, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll a document with a section label that follows the center line")]
struct Cli {
    /// Text file to open; `# ` lines start sections.  Defaults to a sample.
    path: Option<PathBuf>,

    /// Config file (defaults to `$XDG_CONFIG_HOME/scroll-label/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the offset profile.
    #[arg(long, value_enum)]
    profile: Option<ProfileKind>,

    /// Override how a section's active window is measured.
    #[arg(long, value_enum)]
    window: Option<WindowKind>,

    /// Override the number of labels.
    #[arg(long, value_enum)]
    labels: Option<LabelsKind>,

    /// Print one line per scroll position and exit.
    #[arg(long)]
    dump: bool,

    /// Viewport width for `--dump`.
    #[arg(long, default_value_t = 80)]
    width: u16,

    /// Viewport height for `--dump`.
    #[arg(long, default_value_t = 24)]
    height: u16,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(profile) = self.profile {
            config.profile = profile;
        }
        if let Some(window) = self.window {
            config.active_window = window;
        }
        if let Some(labels) = self.labels {
            config.label_mode = labels;
        }
    }
}

// ───────────────────────────────────────── dump ──────────────

fn describe(frame: &LabelFrame) -> String {
    match frame.section {
        None => "-".to_string(),
        Some(index) => format!(
            "#{index} {:<16} p={:+.3} offset={:+7.2}{}",
            format!("{:?}", frame.title),
            frame.progress,
            frame.offset_px,
            if frame.visible { "" } else { " (hidden)" },
        ),
    }
}

/// Print the resolver output for every scroll position, top to bottom.
fn dump(document: &Document, settings: AnimatorSettings, width: u16, height: u16) {
    let layout = document.layout(usize::from(width));
    let mut animator = LabelAnimator::new(settings);
    animator.rebuild(&layout);

    if !animator.is_active() {
        println!("no sections: nothing to animate");
        return;
    }

    let half = i64::from(height / 2);
    let last = layout.total_rows() as i64 - 1 - half;
    for scroll_top in -half..=last.max(-half) {
        let viewport = Viewport::new(scroll_top as f64, f64::from(height));
        let line = match animator.evaluate(viewport) {
            Evaluation::Inactive => "-".to_string(),
            Evaluation::Single(frame) => describe(&frame),
            Evaluation::Dual(dual) => {
                format!("{}  | next {}", describe(&dual.primary), describe(&dual.secondary))
            }
        };
        println!("{scroll_top:>5} center={:>7.1}  {line}", viewport.center());
    }
}

// ───────────────────────────────────────── draw ──────────────

fn status_text(state: &AppState) -> String {
    let label = match state.evaluation.primary() {
        Some(frame) => match frame.section {
            Some(index) => format!(
                "§{}/{} {}  p={:.2}  offset={:+.1}",
                index + 1,
                state.animator.sections().len(),
                if frame.visible { frame.title.as_str() } else { "(unlabeled)" },
                frame.progress,
                frame.offset_px
            ),
            None => "no section".to_string(),
        },
        None => "nothing to animate".to_string(),
    };
    let motion = if state.scroll.is_animating() { " ~" } else { "" };
    format!(
        " {label}{motion}  | frames {} coalesced {} | j/k scroll  space/b page  g/G ends  q quit",
        state.frames.evaluations(),
        state.frames.coalesced()
    )
}

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());
    let area = layout.document_area;

    let active = state.evaluation.primary().and_then(|f| f.section);
    frame.render_widget(
        DocumentView::new(&state.layout, state.scroll.top_row()).active(active),
        area,
    );

    match &state.evaluation {
        Evaluation::Inactive => {}
        Evaluation::Single(label) => {
            frame.render_widget(LabelOverlay::new(label, Theme::label_style()), area);
        }
        Evaluation::Dual(dual) => {
            frame.render_widget(
                LabelOverlay::new(&dual.secondary, Theme::secondary_label_style()),
                area,
            );
            frame.render_widget(LabelOverlay::new(&dual.primary, Theme::label_style()), area);
        }
    }

    let status = Paragraph::new(status_text(state)).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("invalid configuration")?;
    let settings = config.animator_settings()?;

    let document = match &cli.path {
        Some(path) => Document::load(path)?,
        None => Document::sample(),
    };

    // ── headless mode ─────────────────────────────────────────
    if cli.dump {
        dump(&document, settings, cli.width, cli.height);
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    let (width, height) = crossterm::terminal::size()?;
    let mut state = AppState::new(document, &config, settings, width, height);

    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(50));
    let mut frames = tokio::time::interval(config.frame_interval());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // ── event loop ────────────────────────────────────────────
    // Events only signal; the frame tick evaluates at most once and redraws
    // when something changed.
    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => state.resize(w, h),
                }
            }

            _ = frames.tick() => {
                if state.tick() {
                    terminal.draw(|frame| draw(frame, &state))?;
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
