//! Exponentially smoothed anchor point.

use glam::Vec3;

/// Smallest friction accepted; anything at or below zero is raised to this.
pub const MIN_FRICTION: f32 = 0.001;

/// Friction used when none (or a non-finite one) is given.
pub const DEFAULT_FRICTION: f32 = 0.1;

/// A point that chases its target by a fixed fraction of the remaining
/// distance each frame.
///
/// Smoothing is per frame, not per second: call [`advance`](Self::advance)
/// exactly once per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedAnchor {
    current: Vec3,
    target: Vec3,
    friction: f32,
}

impl SmoothedAnchor {
    /// Create an anchor resting at `start`.
    pub fn new(start: Vec3, friction: f32) -> Self {
        Self {
            current: start,
            target: start,
            friction: clamp_friction(friction),
        }
    }

    /// Record the desired destination. Takes effect on the next advance.
    #[inline]
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Step `current` toward `target` by `friction` of the remaining delta.
    pub fn advance(&mut self) {
        if self.friction >= 1.0 {
            self.current = self.target;
        } else {
            self.current += (self.target - self.current) * self.friction;
        }
    }

    /// Current smoothed position.
    #[inline]
    pub fn value(&self) -> Vec3 {
        self.current
    }

    /// Pending destination.
    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[inline]
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Change the smoothing rate, clamped to `(0, 1]`.
    pub fn set_friction(&mut self, friction: f32) {
        self.friction = clamp_friction(friction);
    }

    /// Jump to `position` and stop there.
    pub fn snap_to(&mut self, position: Vec3) {
        self.current = position;
        self.target = position;
    }
}

/// Clamp a friction value into `(0, 1]`. Non-finite values fall back to
/// [`DEFAULT_FRICTION`].
pub fn clamp_friction(friction: f32) -> f32 {
    if !friction.is_finite() {
        return DEFAULT_FRICTION;
    }
    friction.clamp(MIN_FRICTION, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_friction_snaps() {
        let mut anchor = SmoothedAnchor::new(Vec3::ZERO, 1.0);
        anchor.set_target(Vec3::splat(5.0));
        anchor.advance();
        assert_eq!(anchor.value(), Vec3::splat(5.0));
    }

    #[test]
    fn test_set_target_has_no_immediate_effect() {
        let mut anchor = SmoothedAnchor::new(Vec3::ZERO, 0.5);
        anchor.set_target(Vec3::X);
        assert_eq!(anchor.value(), Vec3::ZERO);
    }

    #[test]
    fn test_half_friction_halves_distance() {
        let mut anchor = SmoothedAnchor::new(Vec3::ZERO, 0.5);
        anchor.set_target(Vec3::new(4.0, 0.0, 0.0));
        anchor.advance();
        assert!((anchor.value().x - 2.0).abs() < 1e-6);
        anchor.advance();
        assert!((anchor.value().x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_converges_without_overshoot() {
        let target = Vec3::new(1.0, -2.0, 3.0);
        for friction in [0.05, 0.1, 0.5, 0.9, 1.0] {
            let mut anchor = SmoothedAnchor::new(Vec3::ZERO, friction);
            anchor.set_target(target);
            let mut last = target.distance(anchor.value());
            for _ in 0..2_000 {
                anchor.advance();
                let dist = target.distance(anchor.value());
                assert!(dist <= last, "friction {} moved away", friction);
                // Every component stays on the start side of the target
                assert!(anchor.value().x <= target.x + 1e-6);
                assert!(anchor.value().y >= target.y - 1e-6);
                last = dist;
            }
            assert!(last < 1e-4, "friction {} did not converge", friction);
        }
    }

    #[test]
    fn test_friction_clamped() {
        assert_eq!(clamp_friction(0.0), MIN_FRICTION);
        assert_eq!(clamp_friction(-3.0), MIN_FRICTION);
        assert_eq!(clamp_friction(7.0), 1.0);
        assert_eq!(clamp_friction(f32::NAN), DEFAULT_FRICTION);
        assert_eq!(clamp_friction(f32::INFINITY), DEFAULT_FRICTION);

        let mut anchor = SmoothedAnchor::new(Vec3::ZERO, 0.2);
        anchor.set_friction(2.0);
        assert_eq!(anchor.friction(), 1.0);
    }
}
