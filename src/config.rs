//! Runtime configuration for ribbons and the anchor they trail.
//!
//! [`RibbonConfig`] is a plain value. Changing the look at runtime means
//! building a new config and handing it to
//! [`Controller::reconfigure`](crate::controller::Controller::reconfigure);
//! [`RibbonConfig::diff`] decides whether the ribbons must be rebuilt.
//!
//! # Example
//!
//! ```
//! use ribbons::config::RibbonConfig;
//!
//! let config = RibbonConfig::new()
//!     .with_ribbons_count(24)
//!     .with_segment_count(80)
//!     .with_friction(0.08)
//!     .with_auto_move(true);
//!
//! assert!(RibbonConfig::default().diff(&config).needs_rebuild());
//! ```

use glam::Vec3;

use crate::anchor::{clamp_friction, DEFAULT_FRICTION};
use crate::geometry::{GeometryParams, DEFAULT_RADIAL_SEGMENTS};

/// Bounds on trail capacity (and so on ring count).
pub const SEGMENT_COUNT_RANGE: (usize, usize) = (2, 1000);
/// Bounds on radial resolution.
pub const RADIAL_SEGMENTS_RANGE: (u32, u32) = (3, 64);
/// Upper bound on the number of ribbons.
pub const MAX_RIBBONS: usize = 10_000;

/// Largest accepted auto-move extent.
pub const MAX_MOVE_EXTENT: f32 = 1.0e6;

/// Ratio of the fixed near-end radius to the configured maximum radius.
const NEAR_RADIUS_RATIO: f32 = 0.1;

/// Everything that shapes the ribbons and drives the anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct RibbonConfig {
    /// Tube length along its axis.
    pub height: f32,
    /// Maximum radius of the far end. Each ribbon draws its own far radius
    /// from `[radius * 0.1, radius]`.
    pub radius: f32,
    /// Z coordinate of the anchor plane and of each tube's near end.
    pub anchor_depth: f32,
    /// Trail capacity; each tube gets this many rings.
    pub segment_count: usize,
    /// Quads around each tube.
    pub radial_segments: u32,
    /// Number of ribbons.
    pub ribbons_count: usize,
    /// Smoothing rate of the anchor, in `(0, 1]`.
    pub friction: f32,
    /// Lateral fan-out strength.
    pub spread: f32,
    /// Pick a random target every `move_interval` seconds.
    pub auto_move: bool,
    /// Seconds between auto-move targets.
    pub move_interval: f32,
    /// Half-size of the square auto-move targets are drawn from.
    pub move_extent: f32,
    /// Follow pointer events.
    pub follow_pointer: bool,
    /// Spectrum band that displaces the anchor.
    pub audio_band: usize,
    /// Displacement per unit of normalized band amplitude. Zero disables it.
    pub audio_gain: f32,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.1,
            anchor_depth: 0.0,
            segment_count: 50,
            radial_segments: DEFAULT_RADIAL_SEGMENTS,
            ribbons_count: 10,
            friction: DEFAULT_FRICTION,
            spread: 1.0,
            auto_move: false,
            move_interval: 1.5,
            move_extent: 1.0,
            follow_pointer: true,
            audio_band: 0,
            audio_gain: 0.0,
        }
    }
}

impl RibbonConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_anchor_depth(mut self, depth: f32) -> Self {
        self.anchor_depth = depth;
        self
    }

    pub fn with_segment_count(mut self, count: usize) -> Self {
        self.segment_count = count;
        self
    }

    pub fn with_radial_segments(mut self, count: u32) -> Self {
        self.radial_segments = count;
        self
    }

    pub fn with_ribbons_count(mut self, count: usize) -> Self {
        self.ribbons_count = count;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_auto_move(mut self, enabled: bool) -> Self {
        self.auto_move = enabled;
        self
    }

    pub fn with_move_interval(mut self, seconds: f32) -> Self {
        self.move_interval = seconds;
        self
    }

    pub fn with_move_extent(mut self, extent: f32) -> Self {
        self.move_extent = extent;
        self
    }

    pub fn with_follow_pointer(mut self, enabled: bool) -> Self {
        self.follow_pointer = enabled;
        self
    }

    /// Let spectrum band `band` push the anchor up by `gain` at full amplitude.
    pub fn with_audio(mut self, band: usize, gain: f32) -> Self {
        self.audio_band = band;
        self.audio_gain = gain;
        self
    }

    /// Copy of this config with every field forced into its valid range.
    ///
    /// Invalid values never fail: they are clamped, or replaced by the default
    /// when not finite, and a warning is logged.
    pub fn validated(&self) -> Self {
        let defaults = Self::default();
        let mut out = self.clone();

        out.height = non_negative("height", self.height, defaults.height);
        out.radius = non_negative("radius", self.radius, defaults.radius);
        out.anchor_depth = finite("anchor_depth", self.anchor_depth, defaults.anchor_depth);
        out.spread = finite("spread", self.spread, defaults.spread);
        out.move_interval =
            non_negative("move_interval", self.move_interval, defaults.move_interval);
        out.move_extent = non_negative("move_extent", self.move_extent, defaults.move_extent);
        if out.move_extent > MAX_MOVE_EXTENT {
            log::warn!("move_extent {} clamped to {}", out.move_extent, MAX_MOVE_EXTENT);
            out.move_extent = MAX_MOVE_EXTENT;
        }
        out.audio_gain = finite("audio_gain", self.audio_gain, defaults.audio_gain);

        let friction = finite("friction", self.friction, defaults.friction);
        out.friction = clamp_friction(friction);
        if out.friction != friction {
            log::warn!("friction {} clamped to {}", friction, out.friction);
        }

        let (lo, hi) = SEGMENT_COUNT_RANGE;
        out.segment_count = self.segment_count.clamp(lo, hi);
        if out.segment_count != self.segment_count {
            log::warn!(
                "segment_count {} clamped to {}",
                self.segment_count,
                out.segment_count
            );
        }

        let (lo, hi) = RADIAL_SEGMENTS_RANGE;
        out.radial_segments = self.radial_segments.clamp(lo, hi);
        if out.radial_segments != self.radial_segments {
            log::warn!(
                "radial_segments {} clamped to {}",
                self.radial_segments,
                out.radial_segments
            );
        }

        out.ribbons_count = self.ribbons_count.min(MAX_RIBBONS);
        if out.ribbons_count != self.ribbons_count {
            log::warn!(
                "ribbons_count {} clamped to {}",
                self.ribbons_count,
                out.ribbons_count
            );
        }

        out
    }

    /// Tube parameters for a ribbon whose far end has radius `radius_far`.
    pub fn geometry(&self, radius_far: f32) -> GeometryParams {
        GeometryParams {
            radius_near: self.radius * NEAR_RADIUS_RATIO,
            radius_far,
            height: self.height,
            radial_segments: self.radial_segments,
            longitudinal_segments: self.segment_count.saturating_sub(1) as u32,
            anchor_depth: self.anchor_depth,
        }
    }

    /// Where the anchor rests before any input.
    pub fn rest_position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.anchor_depth)
    }

    /// Compare against `other` and report what a switch to it requires.
    pub fn diff(&self, other: &RibbonConfig) -> ConfigDiff {
        ConfigDiff {
            geometry_changed: self.height != other.height
                || self.radius != other.radius
                || self.anchor_depth != other.anchor_depth
                || self.segment_count != other.segment_count
                || self.radial_segments != other.radial_segments
                || self.ribbons_count != other.ribbons_count,
            trail_resized: self.segment_count != other.segment_count,
            motion_changed: self.friction != other.friction
                || self.spread != other.spread
                || self.auto_move != other.auto_move
                || self.move_interval != other.move_interval
                || self.move_extent != other.move_extent
                || self.follow_pointer != other.follow_pointer
                || self.audio_band != other.audio_band
                || self.audio_gain != other.audio_gain,
        }
    }
}

/// Result of comparing two configs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigDiff {
    /// A field baked into the tube meshes changed.
    pub geometry_changed: bool,
    /// The trail capacity changed.
    pub trail_resized: bool,
    /// Only per-frame parameters changed.
    pub motion_changed: bool,
}

impl ConfigDiff {
    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        !self.geometry_changed && !self.trail_resized && !self.motion_changed
    }

    /// Returns true if every ribbon has to be regenerated.
    pub fn needs_rebuild(&self) -> bool {
        self.geometry_changed
    }
}

fn finite(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("{} is not finite, using {}", name, fallback);
        fallback
    }
}

fn non_negative(name: &str, value: f32, fallback: f32) -> f32 {
    let value = finite(name, value, fallback);
    if value < 0.0 {
        log::warn!("{} {} clamped to 0", name, value);
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::MIN_FRICTION;

    #[test]
    fn test_default_is_valid() {
        let config = RibbonConfig::default();
        assert_eq!(config.validated(), config);
    }

    #[test]
    fn test_validated_clamps() {
        let config = RibbonConfig::new()
            .with_segment_count(0)
            .with_radial_segments(1000)
            .with_ribbons_count(1_000_000)
            .with_friction(-1.0)
            .with_radius(-0.5)
            .with_height(f32::NAN)
            .with_move_interval(-2.0)
            .validated();

        assert_eq!(config.segment_count, 2);
        assert_eq!(config.radial_segments, 64);
        assert_eq!(config.ribbons_count, MAX_RIBBONS);
        assert_eq!(config.friction, MIN_FRICTION);
        assert_eq!(config.radius, 0.0);
        assert_eq!(config.height, RibbonConfig::default().height);
        assert_eq!(config.move_interval, 0.0);
    }

    #[test]
    fn test_friction_agrees_with_anchor() {
        for friction in [f32::NAN, f32::INFINITY, -1.0, 0.0, 0.3, 4.0] {
            let config = RibbonConfig::new().with_friction(friction).validated();
            assert_eq!(config.friction, clamp_friction(friction), "friction {}", friction);
        }
        assert_eq!(RibbonConfig::new().with_friction(f32::NAN).validated().friction, DEFAULT_FRICTION);
    }

    #[test]
    fn test_move_extent_capped() {
        let config = RibbonConfig::new().with_move_extent(f32::MAX).validated();
        assert_eq!(config.move_extent, MAX_MOVE_EXTENT);
        assert_eq!(
            RibbonConfig::new().with_move_extent(f32::INFINITY).validated().move_extent,
            RibbonConfig::default().move_extent
        );
    }

    #[test]
    fn test_friction_above_one_clamped() {
        assert_eq!(RibbonConfig::new().with_friction(3.0).validated().friction, 1.0);
    }

    #[test]
    fn test_geometry_params() {
        let config = RibbonConfig::new()
            .with_segment_count(30)
            .with_radius(0.4)
            .with_height(3.0)
            .with_anchor_depth(-1.0);
        let params = config.geometry(0.25);

        assert_eq!(params.longitudinal_segments, 29);
        assert_eq!(params.ring_count(), 30);
        assert!((params.radius_near - 0.04).abs() < 1e-6);
        assert_eq!(params.radius_far, 0.25);
        assert_eq!(params.height, 3.0);
        assert_eq!(params.anchor_depth, -1.0);
    }

    #[test]
    fn test_diff_identical() {
        let a = RibbonConfig::default();
        assert!(a.diff(&a.clone()).is_empty());
    }

    #[test]
    fn test_diff_motion_only() {
        let a = RibbonConfig::default();
        let b = a.clone().with_spread(3.0).with_friction(0.5);
        let diff = a.diff(&b);

        assert!(!diff.needs_rebuild());
        assert!(!diff.trail_resized);
        assert!(diff.motion_changed);
    }

    #[test]
    fn test_diff_geometry_fields() {
        let a = RibbonConfig::default();
        let changes = [
            a.clone().with_height(5.0),
            a.clone().with_radius(0.9),
            a.clone().with_anchor_depth(2.0),
            a.clone().with_radial_segments(12),
            a.clone().with_ribbons_count(3),
        ];
        for b in &changes {
            let diff = a.diff(b);
            assert!(diff.needs_rebuild());
            assert!(!diff.trail_resized);
        }

        let diff = a.diff(&a.clone().with_segment_count(100));
        assert!(diff.needs_rebuild());
        assert!(diff.trail_resized);
    }
}
