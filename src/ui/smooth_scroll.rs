//! Row-level smooth scroll with exponential ease-out.
//!
//! Key presses move the scroll *target*; each frame the rendered position
//! closes a fixed fraction of the remaining distance, so long jumps (page
//! down, home, end) glide instead of teleporting.  Every frame that moves the
//! position is a scroll signal for the label animator.

/// Fractional-row scroll position chasing a target.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Rendered position (document row at the top of the viewport).
    position: f64,
    /// Where the position is heading.
    target: f64,
    /// Fraction of the remaining distance covered per tick.
    /// Good range: 0.25–0.45 at 60 fps.
    speed: f64,
}

/// Distance below which the position snaps onto the target.
const SNAP: f64 = 0.4;

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Move position and target at once (no animation).
    pub fn jump_to(&mut self, position: f64) {
        self.position = position;
        self.target = position;
    }

    /// Advance one frame.  Returns `true` if the position changed.
    pub fn tick(&mut self) -> bool {
        let delta = self.target - self.position;
        if delta == 0.0 {
            return false;
        }
        if delta.abs() < SNAP {
            self.position = self.target;
        } else {
            self.position += delta * self.speed;
        }
        true
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Top document row to draw.
    pub fn top_row(&self) -> i64 {
        self.position.round() as i64
    }

    /// True while the position has not reached the target.
    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}
