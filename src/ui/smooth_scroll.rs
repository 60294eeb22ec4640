//! Column-level smooth scroll with exponential ease-out.
//!
//! Jumps (next section, nav links) set a target offset; each frame the
//! position closes a fixed fraction of the remaining distance, so the page
//! decelerates into place.  Every step that moves the position is reported to
//! the caller as an ordinary scroll event.

/// Horizontal scroll position animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Current offset in columns.
    position: f64,
    /// Offset the animation settles on.
    target: f64,
    /// Damping: `distance *= (1 - speed)` each tick.
    /// Higher speed = faster settle.  Good range: 0.25–0.45 at 60 fps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64, position: f64) -> Self {
        Self {
            position,
            target: position,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Start gliding toward `target`.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Move immediately, cancelling any glide.
    pub fn jump_to(&mut self, position: f64) {
        self.position = position;
        self.target = position;
    }

    /// Advance one frame.  Returns `true` if the position changed.
    pub fn tick(&mut self) -> bool {
        if !self.is_animating() {
            return false;
        }
        let remaining = self.target - self.position;
        if remaining.abs() < 0.5 {
            self.position = self.target;
        } else {
            self.position += remaining * self.speed;
        }
        true
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// True until the position has settled on the target.
    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}
