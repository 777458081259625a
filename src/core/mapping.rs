//! Progress-to-offset mapping.
//!
//! A profile turns a section's progress `p` into a signed vertical offset:
//! positive while the label sits below its resting row, zero when centered,
//! negative once it has moved above.  Both profiles are continuous in `p`.

use thiserror::Error;

/// Rejected profile or clamp settings.  Raised while building the profile,
/// never while evaluating it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("`{name}` must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error(
        "hold thresholds must satisfy 0 <= entry_start < hold_start <= hold_end < exit_end <= 1 \
         (got {entry_start}, {hold_start}, {hold_end}, {exit_end})"
    )]
    HoldOrdering {
        entry_start: f64,
        hold_start: f64,
        hold_end: f64,
        exit_end: f64,
    },

    #[error("progress clamp range is empty: min {min} must be below max {max}")]
    ClampRange { min: f64, max: f64 },
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, ProfileError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProfileError::NonFinite { name, value })
    }
}

/// Smoothstep `t²(3 - 2t)`; input is clamped to `[0, 1]`.
pub fn ease(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation, exact at `t = 0` and `t = 1`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

// ───────────────────────────────────────── hold profile ──────

/// Five-phase mapping: start plateau, eased entry, centered hold, eased exit,
/// end plateau.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldProfile {
    entry_start: f64,
    hold_start: f64,
    hold_end: f64,
    exit_end: f64,
}

impl HoldProfile {
    pub fn new(
        entry_start: f64,
        hold_start: f64,
        hold_end: f64,
        exit_end: f64,
    ) -> Result<Self, ProfileError> {
        ensure_finite("entry_start", entry_start)?;
        ensure_finite("hold_start", hold_start)?;
        ensure_finite("hold_end", hold_end)?;
        ensure_finite("exit_end", exit_end)?;

        let ordered = 0.0 <= entry_start
            && entry_start < hold_start
            && hold_start <= hold_end
            && hold_end < exit_end
            && exit_end <= 1.0;
        if !ordered {
            return Err(ProfileError::HoldOrdering {
                entry_start,
                hold_start,
                hold_end,
                exit_end,
            });
        }

        Ok(Self {
            entry_start,
            hold_start,
            hold_end,
            exit_end,
        })
    }

    pub fn map(&self, p: f64, start: f64, end: f64) -> f64 {
        if p <= self.entry_start {
            start
        } else if p < self.hold_start {
            let t = (p - self.entry_start) / (self.hold_start - self.entry_start);
            lerp(start, 0.0, ease(t))
        } else if p <= self.hold_end {
            0.0
        } else if p < self.exit_end {
            let t = (p - self.hold_end) / (self.exit_end - self.hold_end);
            lerp(0.0, end, ease(t))
        } else {
            end
        }
    }
}

impl Default for HoldProfile {
    fn default() -> Self {
        Self {
            entry_start: 0.1,
            hold_start: 0.3,
            hold_end: 0.7,
            exit_end: 0.9,
        }
    }
}

// ───────────────────────────────────────── profiles ──────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OffsetProfile {
    /// One-to-one: `lerp(start, end, clamp(p, 0, 1))`.
    Linear,
    Hold(HoldProfile),
}

impl OffsetProfile {
    /// Map progress to an offset between `start` and `end` (already in pixels).
    pub fn map(&self, p: f64, start: f64, end: f64) -> f64 {
        match self {
            OffsetProfile::Linear => lerp(start, end, p.clamp(0.0, 1.0)),
            OffsetProfile::Hold(hold) => hold.map(p, start, end),
        }
    }
}

impl Default for OffsetProfile {
    fn default() -> Self {
        OffsetProfile::Hold(HoldProfile::default())
    }
}
