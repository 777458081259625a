//! Section geometry snapshot.
//!
//! The [`GeometryCache`] is the one place layout is read.  It asks a
//! [`SectionSource`] for every section's extent and title, derives the active
//! window each section is "current" in, and keeps the result until the next
//! [`GeometryCache::rebuild`].  Between rebuilds it is read-only.

use tracing::debug;

// ───────────────────────────────────────── collaborator ──────

/// Anything that can report section titles and vertical extents in document
/// coordinates.  The host's document layout implements this.
pub trait SectionSource {
    fn section_count(&self) -> usize;

    /// Section title.  Empty means unlabeled: never shown.
    fn title(&self, index: usize) -> &str;

    /// Full bounding box of the section.
    fn bounds(&self, index: usize) -> Extent;

    /// Span from the first to the last inner content element, if the section
    /// has any content at all.
    fn content_bounds(&self, index: usize) -> Option<Extent>;
}

// ───────────────────────────────────────── extents ───────────

/// A vertical extent `{top, height}` in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub top: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Same extent with a degenerate (≤ 0 or NaN) height replaced by 1.
    pub fn normalized(self) -> Self {
        if self.height > 0.0 {
            self
        } else {
            Self {
                top: self.top,
                height: 1.0,
            }
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// How a section's active window is derived.  One mode per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WindowMode {
    /// The section's full bounding box.
    #[default]
    Bounds,
    /// First-to-last inner content element, padded on both sides by
    /// `margin` × section height.
    Content { margin: f64 },
}

/// The `[start, end)` range in which a section is considered current.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveWindow {
    pub start: f64,
    pub end: f64,
}

impl ActiveWindow {
    /// Window length, never below 1 so progress stays finite.
    pub fn len(&self) -> f64 {
        let len = self.end - self.start;
        if len > 0.0 {
            len
        } else {
            1.0
        }
    }

    /// Raw (unclamped) progress of `center` through this window.
    pub fn progress(&self, center: f64) -> f64 {
        (center - self.start) / self.len()
    }
}

// ───────────────────────────────────────── section ───────────

/// Immutable per-build snapshot of one section.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub index: usize,
    pub title: String,
    pub extent: Extent,
    pub window: ActiveWindow,
}

impl Section {
    pub fn center(&self) -> f64 {
        self.extent.center()
    }

    pub fn is_labeled(&self) -> bool {
        !self.title.is_empty()
    }
}

fn derive_window(extent: Extent, content: Option<Extent>, mode: WindowMode) -> ActiveWindow {
    match (mode, content) {
        (WindowMode::Content { margin }, Some(content)) => {
            let pad = margin * extent.height;
            ActiveWindow {
                start: content.top - pad,
                end: content.bottom() + pad,
            }
        }
        // No inner content to span: the bounding box is the only extent left.
        _ => ActiveWindow {
            start: extent.top,
            end: extent.bottom(),
        },
    }
}

// ───────────────────────────────────────── cache ─────────────

#[derive(Debug, Clone, Default)]
pub struct GeometryCache {
    sections: Vec<Section>,
    mode: WindowMode,
    /// Bumped on every rebuild.
    generation: u64,
}

impl GeometryCache {
    pub fn new(mode: WindowMode) -> Self {
        Self {
            sections: Vec::new(),
            mode,
            generation: 0,
        }
    }

    /// Re-read every section from `source`, replacing the previous snapshot.
    pub fn rebuild<S: SectionSource + ?Sized>(&mut self, source: &S) {
        let count = source.section_count();
        let mut sections = Vec::with_capacity(count);

        for index in 0..count {
            let extent = source.bounds(index).normalized();
            let content = source.content_bounds(index).map(Extent::normalized);
            sections.push(Section {
                index,
                title: source.title(index).to_string(),
                extent,
                window: derive_window(extent, content, self.mode),
            });
        }

        self.sections = sections;
        self.generation = self.generation.wrapping_add(1);
        debug!(
            "geometry rebuilt: {} sections, generation {}",
            self.sections.len(),
            self.generation
        );
    }

    /// The last built snapshot, in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Fixed list of `(title, bounds, content)` used across the core tests.
    pub(crate) struct FixedSections(pub Vec<(String, Extent, Option<Extent>)>);

    impl FixedSections {
        /// Equal-height sections stacked from 0 with no gaps.
        pub(crate) fn stacked(titles: &[&str], height: f64) -> Self {
            Self(
                titles
                    .iter()
                    .enumerate()
                    .map(|(i, t)| (t.to_string(), Extent::new(i as f64 * height, height), None))
                    .collect(),
            )
        }
    }

    impl SectionSource for FixedSections {
        fn section_count(&self) -> usize {
            self.0.len()
        }

        fn title(&self, index: usize) -> &str {
            &self.0[index].0
        }

        fn bounds(&self, index: usize) -> Extent {
            self.0[index].1
        }

        fn content_bounds(&self, index: usize) -> Option<Extent> {
            self.0[index].2
        }
    }

    #[test]
    fn rebuild_snapshots_sections_in_order() {
        let source = FixedSections::stacked(&["A", "B", "C"], 100.0);
        let mut cache = GeometryCache::new(WindowMode::Bounds);
        cache.rebuild(&source);

        let sections = cache.sections();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[1].index, 1);
        assert_eq!(sections[1].title, "B");
        assert_eq!(sections[1].center(), 150.0);
        assert_eq!(sections[2].window, ActiveWindow { start: 200.0, end: 300.0 });
        assert_eq!(cache.generation(), 1);
    }

    #[test]
    fn degenerate_height_becomes_one() {
        let source = FixedSections(vec![("A".into(), Extent::new(40.0, 0.0), None)]);
        let mut cache = GeometryCache::new(WindowMode::Bounds);
        cache.rebuild(&source);

        let section = &cache.sections()[0];
        assert_eq!(section.extent.height, 1.0);
        assert_eq!(section.window.len(), 1.0);
        assert!(section.window.progress(39.0) < 0.0);
        assert!(section.window.progress(41.5) > 1.0);
    }

    #[test]
    fn content_window_spans_inner_elements_with_margin() {
        let source = FixedSections(vec![(
            "A".into(),
            Extent::new(0.0, 100.0),
            Some(Extent::new(20.0, 50.0)),
        )]);
        let mut cache = GeometryCache::new(WindowMode::Content { margin: 0.1 });
        cache.rebuild(&source);

        let window = cache.sections()[0].window;
        assert!((window.start - 10.0).abs() < 1e-9);
        assert!((window.end - 80.0).abs() < 1e-9);
    }

    #[test]
    fn content_window_falls_back_to_bounds_without_content() {
        let source = FixedSections::stacked(&["A"], 30.0);
        let mut cache = GeometryCache::new(WindowMode::Content { margin: 0.5 });
        cache.rebuild(&source);

        assert_eq!(cache.sections()[0].window, ActiveWindow { start: 0.0, end: 30.0 });
    }

    #[test]
    fn rebuild_replaces_previous_snapshot() {
        let mut cache = GeometryCache::new(WindowMode::Bounds);
        cache.rebuild(&FixedSections::stacked(&["A", "B"], 10.0));
        cache.rebuild(&FixedSections::stacked(&["A"], 20.0));

        assert_eq!(cache.sections().len(), 1);
        assert_eq!(cache.sections()[0].extent.height, 20.0);
        assert_eq!(cache.generation(), 2);
    }
}
