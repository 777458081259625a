//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! Scroll and resize only *signal* the frame scheduler; [`AppState::tick`]
//! does the evaluation, once per frame.

use crate::config::AppConfig;
use crate::core::animator::{AnimatorSettings, Evaluation, LabelAnimator, Viewport};
use crate::document::{Document, DocumentLayout};
use crate::ui::layout::AppLayout;
use crate::ui::smooth_scroll::SmoothScroll;

use super::frame::FrameScheduler;

/// Fraction of the remaining scroll distance covered per frame.
const SCROLL_SPEED: f64 = 0.35;

pub struct AppState {
    pub document: Document,
    /// The document wrapped to the current pane width.
    pub layout: DocumentLayout,
    pub animator: LabelAnimator,
    pub frames: FrameScheduler,
    pub scroll: SmoothScroll,
    /// Document pane size in cells.
    pub pane_width: u16,
    pub pane_height: u16,
    /// Result of the last evaluated frame; what the UI draws.
    pub evaluation: Evaluation,
    /// Rows per mouse-wheel notch.
    pub scroll_step: u16,
    pub should_quit: bool,
}

impl AppState {
    /// Build state for a terminal of `width` × `height` cells.  The first
    /// frame is already scheduled.
    pub fn new(
        document: Document,
        config: &AppConfig,
        settings: AnimatorSettings,
        width: u16,
        height: u16,
    ) -> Self {
        let pane = AppLayout::from_size(width, height).document_area;
        let layout = document.layout(usize::from(pane.width));
        let mut animator = LabelAnimator::new(settings);
        animator.rebuild(&layout);

        let mut state = Self {
            document,
            layout,
            animator,
            frames: FrameScheduler::new(),
            scroll: SmoothScroll::new(SCROLL_SPEED),
            pane_width: pane.width,
            pane_height: pane.height,
            evaluation: Evaluation::Inactive,
            scroll_step: config.scroll_step,
            should_quit: false,
        };
        state.frames.request();
        state
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.scroll.position(), f64::from(self.pane_height))
    }

    /// Scroll range: from the first row sitting on the center line to the
    /// last row sitting on it.
    fn scroll_bounds(&self) -> (f64, f64) {
        let half = f64::from(self.pane_height / 2);
        let total = self.layout.total_rows() as f64;
        (-half, (total - 1.0 - half).max(-half))
    }

    fn clamp_scroll(&self, row: f64) -> f64 {
        let (min, max) = self.scroll_bounds();
        row.clamp(min, max)
    }

    /// Glide by `rows` (negative = up).
    pub fn scroll_by(&mut self, rows: f64) {
        let target = self.clamp_scroll(self.scroll.target() + rows);
        self.scroll.set_target(target);
        self.frames.request();
    }

    /// Move by `rows` at once, dropping any glide in progress.
    pub fn jump_by(&mut self, rows: f64) {
        let to = self.clamp_scroll(self.scroll.position() + rows);
        self.scroll.jump_to(to);
        self.frames.request();
    }

    pub fn scroll_to_start(&mut self) {
        let (min, _) = self.scroll_bounds();
        self.scroll.set_target(min);
        self.frames.request();
    }

    pub fn scroll_to_end(&mut self) {
        let (_, max) = self.scroll_bounds();
        self.scroll.set_target(max);
        self.frames.request();
    }

    pub fn page(&self) -> f64 {
        f64::from(self.pane_height.saturating_sub(2).max(1))
    }

    /// Terminal resized: re-wrap if the width changed, rebuild the geometry
    /// cache, and schedule a frame.
    pub fn resize(&mut self, width: u16, height: u16) {
        let pane = AppLayout::from_size(width, height).document_area;
        if pane.width != self.pane_width {
            self.layout = self.document.layout(usize::from(pane.width));
        }
        self.pane_width = pane.width;
        self.pane_height = pane.height;
        self.animator.rebuild(&self.layout);

        let position = self.clamp_scroll(self.scroll.position());
        let target = self.clamp_scroll(self.scroll.target());
        self.scroll.jump_to(position);
        self.scroll.set_target(target);
        self.frames.request();
    }

    /// Advance one frame.  Returns `true` when a new evaluation ran and the
    /// screen needs redrawing.
    pub fn tick(&mut self) -> bool {
        if self.scroll.tick() {
            self.frames.request();
        }
        if !self.frames.begin_frame() {
            return false;
        }
        if self.animator.is_active() {
            self.evaluation = self.animator.evaluate(self.viewport());
        } else {
            self.evaluation = Evaluation::Inactive;
        }
        self.frames.finish_frame();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::animator::LabelFrame;

    const TEXT: &str = "# One\na\nb\nc\nd\ne\nf\ng\n# Two\na\nb\nc\nd\ne\nf\ng\n# Three\na\n";

    fn state(height: u16) -> AppState {
        let config = AppConfig::default();
        let settings = config.animator_settings().unwrap();
        AppState::new(Document::parse(TEXT), &config, settings, 40, height)
    }

    fn primary(state: &AppState) -> LabelFrame {
        state.evaluation.primary().cloned().unwrap()
    }

    #[test]
    fn first_tick_evaluates() {
        let mut state = state(11);
        assert!(state.tick());
        assert!(!state.tick());
        assert_eq!(state.frames.evaluations(), 1);
        // Pane is 10 rows; center row 5 sits in section One (rows 0..9).
        assert_eq!(primary(&state).title, "One");
    }

    #[test]
    fn scroll_burst_is_one_evaluation() {
        let mut state = state(11);
        state.tick();

        for _ in 0..10 {
            state.jump_by(1.0);
        }
        assert!(state.tick());
        assert!(!state.tick());
        assert_eq!(state.frames.evaluations(), 2);
        // Center 15 → section Two (rows 9..18).
        assert_eq!(primary(&state).title, "Two");
    }

    #[test]
    fn glide_keeps_signalling_until_settled() {
        let mut state = state(11);
        state.tick();
        state.scroll_by(8.0);

        let mut frames = 0;
        while state.tick() {
            frames += 1;
            assert!(frames < 100);
        }
        assert!(frames > 1);
        assert_eq!(state.scroll.position(), 8.0);
    }

    #[test]
    fn resize_rescales_offsets() {
        let mut state = state(11);
        state.jump_by(-5.0); // center on row 0, p = 0
        state.tick();
        let short = primary(&state).offset_px;

        // Pane height doubles; the same center needs a new scroll position.
        state.resize(40, 21);
        state.jump_by(-5.0);
        state.tick();
        let tall = primary(&state).offset_px;

        assert!((short - 3.5).abs() < 1e-9);
        assert!((tall - 7.0).abs() < 1e-9);
    }

    #[test]
    fn width_change_rebuilds_geometry() {
        let mut state = AppState::new(
            Document::parse("# Long\none two three four five six seven eight\n# Next\nx\n"),
            &AppConfig::default(),
            AnimatorSettings::default(),
            80,
            11,
        );
        let before = state.animator.sections()[1].extent.top;
        state.resize(10, 11);
        let after = state.animator.sections()[1].extent.top;
        assert!(after > before);
    }

    #[test]
    fn scroll_is_clamped_to_document() {
        let mut state = state(11);
        state.jump_by(-1000.0);
        assert_eq!(state.scroll.position(), -5.0);
        state.jump_by(1000.0);
        assert_eq!(state.scroll.position(), state.layout.total_rows() as f64 - 6.0);
    }

    #[test]
    fn empty_document_is_inactive() {
        let mut state = AppState::new(
            Document::default(),
            &AppConfig::default(),
            AnimatorSettings::default(),
            40,
            11,
        );
        assert!(state.tick());
        assert_eq!(state.evaluation, Evaluation::Inactive);
    }
}
