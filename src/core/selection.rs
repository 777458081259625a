//! Active-section selection.
//!
//! Picks which section the label belongs to for a given viewport center:
//! the first section whose active window contains the center, or, when the
//! center sits in a gap or outside the document, the section whose progress
//! is closest to its midpoint.

use super::geometry::Section;
use super::mapping::{ensure_finite, ProfileError};

/// Extended progress range handed to the mapping.  Values past `[0, 1]` let
/// the label ease in before entry and out after exit instead of snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressClamp {
    min: f64,
    max: f64,
}

impl ProgressClamp {
    pub fn new(min: f64, max: f64) -> Result<Self, ProfileError> {
        ensure_finite("progress_clamp_min", min)?;
        ensure_finite("progress_clamp_max", max)?;
        if min >= max {
            return Err(ProfileError::ClampRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn apply(&self, p: f64) -> f64 {
        p.clamp(self.min, self.max)
    }
}

impl Default for ProgressClamp {
    fn default() -> Self {
        Self {
            min: -0.25,
            max: 1.25,
        }
    }
}

/// Outcome of [`select_active`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub index: usize,
    /// Clamped progress.
    pub progress: f64,
    /// `true` when the viewport center lies inside the section's window;
    /// `false` when it was picked by the nearest-to-center fallback.
    pub contained: bool,
}

/// Clamped progress of `center` through `section`'s active window.
pub fn progress_of(section: &Section, center: f64, clamp: ProgressClamp) -> f64 {
    clamp.apply(section.window.progress(center))
}

/// Select the active section for `center`.  Returns `None` only when there
/// are no sections at all.
pub fn select_active(center: f64, sections: &[Section], clamp: ProgressClamp) -> Option<Selection> {
    // First containing section in document order wins, so overlapping
    // windows resolve deterministically.
    for section in sections {
        let raw = section.window.progress(center);
        if (0.0..=1.0).contains(&raw) {
            return Some(Selection {
                index: section.index,
                progress: clamp.apply(raw),
                contained: true,
            });
        }
    }

    let mut best: Option<(&Section, f64)> = None;
    for section in sections {
        let raw = section.window.progress(center);
        let distance = (raw - 0.5).abs();
        match best {
            // Strictly closer only: ties stay with the earlier section.
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((section, distance)),
        }
    }

    best.map(|(section, _)| Selection {
        index: section.index,
        progress: progress_of(section, center, clamp),
        contained: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::tests::FixedSections;
    use crate::core::geometry::{Extent, GeometryCache, WindowMode};

    fn build(source: &FixedSections) -> Vec<Section> {
        let mut cache = GeometryCache::new(WindowMode::Bounds);
        cache.rebuild(source);
        cache.sections().to_vec()
    }

    fn three() -> Vec<Section> {
        build(&FixedSections::stacked(&["One", "Two", "Three"], 100.0))
    }

    #[test]
    fn center_inside_second_section() {
        let sel = select_active(150.0, &three(), ProgressClamp::default()).unwrap();
        assert_eq!(sel.index, 1);
        assert_eq!(sel.progress, 0.5);
        assert!(sel.contained);
    }

    #[test]
    fn before_first_section_falls_back_to_first() {
        let sel = select_active(-50.0, &three(), ProgressClamp::default()).unwrap();
        assert_eq!(sel.index, 0);
        assert!(!sel.contained);
        // Raw progress is -0.5; the extended clamp floors it.
        assert_eq!(sel.progress, -0.25);
    }

    #[test]
    fn past_last_section_falls_back_to_last() {
        let sel = select_active(420.0, &three(), ProgressClamp::default()).unwrap();
        assert_eq!(sel.index, 2);
        assert_eq!(sel.progress, 1.25);
    }

    #[test]
    fn shared_boundary_goes_to_earlier_section() {
        let sel = select_active(100.0, &three(), ProgressClamp::default()).unwrap();
        assert_eq!(sel.index, 0);
        assert_eq!(sel.progress, 1.0);
    }

    #[test]
    fn overlapping_windows_pick_first_in_document_order() {
        let sections = build(&FixedSections(vec![
            ("A".into(), Extent::new(0.0, 100.0), None),
            ("B".into(), Extent::new(50.0, 100.0), None),
        ]));
        let sel = select_active(75.0, &sections, ProgressClamp::default()).unwrap();
        assert_eq!(sel.index, 0);
        assert_eq!(sel.progress, 0.75);
    }

    #[test]
    fn gap_between_sections_picks_nearest_to_midpoint() {
        // [0,100) gap [100,140) [140,240)
        let sections = build(&FixedSections(vec![
            ("A".into(), Extent::new(0.0, 100.0), None),
            ("B".into(), Extent::new(140.0, 100.0), None),
        ]));
        // Closer to A's end: A's raw p = 1.1 (0.6 from mid), B's = -0.3 (0.8).
        let sel = select_active(110.0, &sections, ProgressClamp::default()).unwrap();
        assert_eq!(sel.index, 0);
        assert!(!sel.contained);

        // Closer to B's start: A = 1.35 (0.85), B = -0.05 (0.55).
        let sel = select_active(135.0, &sections, ProgressClamp::default()).unwrap();
        assert_eq!(sel.index, 1);
        assert!((sel.progress + 0.05).abs() < 1e-9);
    }

    #[test]
    fn fallback_tie_goes_to_earlier_section() {
        let sections = build(&FixedSections(vec![
            ("A".into(), Extent::new(0.0, 100.0), None),
            ("B".into(), Extent::new(200.0, 100.0), None),
        ]));
        // Both at distance 1.0 from the midpoint.
        let sel = select_active(150.0, &sections, ProgressClamp::default()).unwrap();
        assert_eq!(sel.index, 0);
    }

    #[test]
    fn no_sections_selects_nothing() {
        assert!(select_active(0.0, &[], ProgressClamp::default()).is_none());
    }

    #[test]
    fn custom_clamp_is_applied() {
        let clamp = ProgressClamp::new(0.0, 1.0).unwrap();
        let sel = select_active(-50.0, &three(), clamp).unwrap();
        assert_eq!(sel.progress, 0.0);
    }

    #[test]
    fn clamp_rejects_empty_range() {
        assert_eq!(
            ProgressClamp::new(1.0, 1.0),
            Err(ProfileError::ClampRange { min: 1.0, max: 1.0 })
        );
        assert!(ProgressClamp::new(f64::NEG_INFINITY, 1.0).is_err());
    }
}
