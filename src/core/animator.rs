//! The label animator: geometry cache + selection + mapping in one instance.
//!
//! [`LabelAnimator::evaluate`] is pure given the cache and the viewport it is
//! handed, so a stale frame that runs after newer scroll simply recomputes
//! against whatever values it is given.  Pixel offsets are derived from the
//! viewport height on every call and never stored.

use tracing::trace;

use super::geometry::{GeometryCache, Section, SectionSource, WindowMode};
use super::mapping::OffsetProfile;
use super::selection::{progress_of, select_active, ProgressClamp, Selection};

/// One label or two (current + next).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMode {
    #[default]
    Single,
    Dual,
}

/// Validated animator settings.  Built by `config`, which rejects bad values
/// before an animator ever exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorSettings {
    pub profile: OffsetProfile,
    /// Offset at the start of entry, in viewport heights (positive = below).
    pub start_offset_vh: f64,
    /// Offset after exit, in viewport heights (negative = above).
    pub end_offset_vh: f64,
    pub clamp: ProgressClamp,
    pub window: WindowMode,
    pub labels: LabelMode,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            profile: OffsetProfile::default(),
            start_offset_vh: 0.35,
            end_offset_vh: -0.35,
            clamp: ProgressClamp::default(),
            window: WindowMode::Bounds,
            labels: LabelMode::Single,
        }
    }
}

/// Current scroll position and viewport size, both in document units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_top: f64, height: f64) -> Self {
        Self { scroll_top, height }
    }

    /// Visual center in document coordinates.
    pub fn center(&self) -> f64 {
        self.scroll_top + self.height / 2.0
    }
}

// ───────────────────────────────────────── results ───────────

/// What the presentation layer should show for one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFrame {
    /// Section the label belongs to, even when it is hidden for lack of a
    /// title.  `None` means no section at all.
    pub section: Option<usize>,
    pub title: String,
    pub progress: f64,
    /// Vertical displacement from the label's resting position.
    pub offset_px: f64,
    pub visible: bool,
}

impl LabelFrame {
    pub fn hidden() -> Self {
        Self {
            section: None,
            title: String::new(),
            progress: 0.0,
            offset_px: 0.0,
            visible: false,
        }
    }

    fn for_section(section: &Section, progress: f64, offset_px: f64) -> Self {
        Self {
            section: Some(section.index),
            title: section.title.clone(),
            progress,
            offset_px,
            visible: section.is_labeled(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DualFrame {
    pub primary: LabelFrame,
    /// The section after the primary, in document order.
    pub secondary: LabelFrame,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// Nothing to animate.
    Inactive,
    Single(LabelFrame),
    Dual(DualFrame),
}

impl Evaluation {
    /// The primary label, if any.
    pub fn primary(&self) -> Option<&LabelFrame> {
        match self {
            Evaluation::Inactive => None,
            Evaluation::Single(frame) => Some(frame),
            Evaluation::Dual(dual) => Some(&dual.primary),
        }
    }
}

// ───────────────────────────────────────── animator ──────────

#[derive(Debug, Clone)]
pub struct LabelAnimator {
    settings: AnimatorSettings,
    cache: GeometryCache,
}

impl LabelAnimator {
    pub fn new(settings: AnimatorSettings) -> Self {
        Self {
            cache: GeometryCache::new(settings.window),
            settings,
        }
    }

    /// Re-read section geometry.  Call on startup and after anything that
    /// can move sections around (resize, document reload).
    pub fn rebuild<S: SectionSource + ?Sized>(&mut self, source: &S) {
        self.cache.rebuild(source);
    }

    pub fn sections(&self) -> &[Section] {
        self.cache.sections()
    }

    pub fn is_active(&self) -> bool {
        !self.cache.is_empty()
    }

    pub fn evaluate(&self, viewport: Viewport) -> Evaluation {
        if !self.is_active() {
            return Evaluation::Inactive;
        }
        match self.settings.labels {
            LabelMode::Single => Evaluation::Single(self.evaluate_single(viewport)),
            LabelMode::Dual => Evaluation::Dual(self.evaluate_dual(viewport)),
        }
    }

    /// Offsets in pixels for the current viewport height.
    fn offsets_px(&self, viewport: Viewport) -> (f64, f64) {
        (
            self.settings.start_offset_vh * viewport.height,
            self.settings.end_offset_vh * viewport.height,
        )
    }

    fn select(&self, viewport: Viewport) -> Option<Selection> {
        select_active(viewport.center(), self.cache.sections(), self.settings.clamp)
    }

    pub fn evaluate_single(&self, viewport: Viewport) -> LabelFrame {
        let Some(selection) = self.select(viewport) else {
            return LabelFrame::hidden();
        };
        let (start, end) = self.offsets_px(viewport);
        let section = &self.cache.sections()[selection.index];
        let offset = self.settings.profile.map(selection.progress, start, end);
        trace!(
            "evaluate: center={:.1} section={} (center {:.1}) p={:.3} offset={:.2} contained={}",
            viewport.center(),
            selection.index,
            section.center(),
            selection.progress,
            offset,
            selection.contained
        );
        LabelFrame::for_section(section, selection.progress, offset)
    }

    /// Current + next labels, each on its own progress, both mapped linearly.
    pub fn evaluate_dual(&self, viewport: Viewport) -> DualFrame {
        let Some(selection) = self.select(viewport) else {
            return DualFrame {
                primary: LabelFrame::hidden(),
                secondary: LabelFrame::hidden(),
            };
        };
        let (start, end) = self.offsets_px(viewport);
        let linear = OffsetProfile::Linear;
        let sections = self.cache.sections();

        let current = &sections[selection.index];
        let primary = LabelFrame::for_section(
            current,
            selection.progress,
            linear.map(selection.progress, start, end),
        );

        let secondary = match sections.get(selection.index + 1) {
            Some(next) => {
                let p = progress_of(next, viewport.center(), self.settings.clamp);
                LabelFrame::for_section(next, p, linear.map(p, start, end))
            }
            None => LabelFrame::hidden(),
        };

        DualFrame { primary, secondary }
    }
}
