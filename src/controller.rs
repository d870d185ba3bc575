//! Top-level per-frame driver.
//!
//! The [`Controller`] owns the anchor, its trail and the ribbons, and runs one
//! frame at a time:
//!
//! 1. pointer targets are applied as they arrive ([`Controller::set_pointer_target`])
//! 2. the auto-move timer may pick a new random target
//! 3. the anchor advances toward its target
//! 4. the anchor's value is pushed into the trail
//! 5. every ribbon is deformed from the trail
//!
//! # Example
//!
//! ```
//! use ribbons::prelude::*;
//!
//! let config = RibbonConfig::new().with_ribbons_count(4).with_friction(1.0);
//! let mut controller = Controller::with_seed(config, 7);
//!
//! controller.set_pointer_target(Vec3::new(0.5, 0.25, 0.0));
//! controller.tick(1.0 / 60.0);
//!
//! assert_eq!(controller.anchor().value(), Vec3::new(0.5, 0.25, 0.0));
//! assert_eq!(controller.trail().latest(), Some(Vec3::new(0.5, 0.25, 0.0)));
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::anchor::SmoothedAnchor;
use crate::audio::Spectrum;
use crate::config::RibbonConfig;
use crate::ribbon_set::RibbonSet;
use crate::trail::TrailBuffer;

/// Timer that produces a random anchor target every `interval` seconds.
#[derive(Debug)]
pub struct AutoMover {
    elapsed: f32,
    rng: SmallRng,
}

impl AutoMover {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            elapsed: 0.0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Accumulate `dt` seconds. Once more than `interval` seconds have built
    /// up, the timer resets and a target uniform in `[-extent, extent]²` on
    /// the plane `z = depth` is returned.
    pub fn tick(&mut self, dt: f32, interval: f32, extent: f32, depth: f32) -> Option<Vec3> {
        self.elapsed += dt.max(0.0);
        if self.elapsed <= interval {
            return None;
        }
        self.elapsed = 0.0;

        let extent = if extent.is_finite() { extent.max(0.0) } else { 0.0 };
        let x = self.rng.gen_range(-1.0f32..=1.0) * extent;
        let y = self.rng.gen_range(-1.0f32..=1.0) * extent;
        Some(Vec3::new(x, y, depth))
    }

    /// Seconds accumulated since the last target.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Owns the anchor, trail and ribbons, and runs the frame loop.
#[derive(Debug)]
pub struct Controller {
    config: RibbonConfig,
    anchor: SmoothedAnchor,
    trail: TrailBuffer,
    ribbons: RibbonSet,
    auto_mover: AutoMover,
    /// Last target from pointer or auto-move, before audio displacement.
    target: Vec3,
    audio_offset: Vec3,
}

impl Controller {
    /// Build a controller with time-seeded randomness.
    pub fn new(config: RibbonConfig) -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(config, seed)
    }

    /// Build a controller whose ribbons and auto-move targets are
    /// reproducible from `seed`.
    pub fn with_seed(config: RibbonConfig, seed: u64) -> Self {
        let config = config.validated();
        let rest = config.rest_position();

        let mut ribbons = RibbonSet::with_seed(seed);
        ribbons.regenerate(&config);

        Self {
            anchor: SmoothedAnchor::new(rest, config.friction),
            trail: TrailBuffer::filled(config.segment_count, rest),
            ribbons,
            auto_mover: AutoMover::with_seed(seed.wrapping_add(1)),
            target: rest,
            audio_offset: Vec3::ZERO,
            config,
        }
    }

    /// Point the anchor at `target`, unless pointer following is off.
    pub fn set_pointer_target(&mut self, target: Vec3) {
        if self.config.follow_pointer {
            self.target = target;
            self.anchor.set_target(target + self.audio_offset);
        }
    }

    /// Displace the anchor target from the configured spectrum band.
    ///
    /// The displacement replaces the previous one rather than accumulating.
    /// With `audio_gain == 0` there is no displacement.
    pub fn apply_spectrum(&mut self, spectrum: &Spectrum) {
        if self.config.audio_gain == 0.0 {
            self.clear_audio_offset();
            return;
        }
        self.audio_offset = Vec3::Y * spectrum.band(self.config.audio_band) * self.config.audio_gain;
        self.anchor.set_target(self.target + self.audio_offset);
    }

    fn clear_audio_offset(&mut self) {
        if self.audio_offset != Vec3::ZERO {
            self.audio_offset = Vec3::ZERO;
            self.anchor.set_target(self.target);
        }
    }

    /// Run one frame. `dt` is only used by the auto-move timer and the
    /// texture scroll; smoothing is per frame.
    pub fn tick(&mut self, dt: f32) {
        if self.config.auto_move {
            if let Some(target) = self.auto_mover.tick(
                dt,
                self.config.move_interval,
                self.config.move_extent,
                self.config.anchor_depth,
            ) {
                self.target = target;
                self.anchor.set_target(target + self.audio_offset);
            }
        }

        self.anchor.advance();
        self.trail.push(self.anchor.value());
        self.ribbons.scroll(dt);
        self.ribbons.tick(&self.trail, self.config.spread);
    }

    /// Switch to a new configuration.
    ///
    /// Ribbons are rebuilt only when a geometry field changed, and the trail
    /// is reset only when its capacity changed.
    pub fn reconfigure(&mut self, config: RibbonConfig) {
        let config = config.validated();
        let diff = self.config.diff(&config);

        if diff.is_empty() {
            return;
        }

        self.anchor.set_friction(config.friction);
        if config.auto_move != self.config.auto_move {
            self.auto_mover.reset();
        }
        let audio_changed = config.audio_band != self.config.audio_band
            || config.audio_gain != self.config.audio_gain;
        if audio_changed {
            self.clear_audio_offset();
        }
        if diff.trail_resized {
            self.trail.resize(config.segment_count, self.anchor.value());
        }
        if diff.needs_rebuild() {
            self.ribbons.regenerate(&config);
        }

        self.config = config;
    }

    /// Rebuild every ribbon with fresh randomness and restart the trail at
    /// the anchor's current position.
    pub fn reset(&mut self) {
        let here = self.anchor.value();
        self.trail = TrailBuffer::filled(self.config.segment_count, here);
        self.auto_mover.reset();
        self.ribbons.regenerate(&self.config);
    }

    #[inline]
    pub fn config(&self) -> &RibbonConfig {
        &self.config
    }

    #[inline]
    pub fn anchor(&self) -> &SmoothedAnchor {
        &self.anchor
    }

    #[inline]
    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    #[inline]
    pub fn ribbons(&self) -> &RibbonSet {
        &self.ribbons
    }

    #[inline]
    pub fn ribbons_mut(&mut self) -> &mut RibbonSet {
        &mut self.ribbons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RibbonConfig {
        RibbonConfig::new()
            .with_ribbons_count(3)
            .with_segment_count(20)
            .with_friction(0.5)
    }

    #[test]
    fn test_starts_filled_at_rest() {
        let c = Controller::with_seed(config().with_anchor_depth(-2.0), 1);
        assert_eq!(c.trail().len(), 20);
        assert!(c.trail().iter().all(|s| *s == Vec3::new(0.0, 0.0, -2.0)));
        assert_eq!(c.ribbons().len(), 3);
    }

    #[test]
    fn test_tick_pushes_smoothed_value() {
        let mut c = Controller::with_seed(config(), 1);
        c.set_pointer_target(Vec3::new(2.0, 0.0, 0.0));
        c.tick(0.016);

        assert_eq!(c.anchor().value(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(c.trail().latest(), Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(c.trail().len(), 20);
    }

    #[test]
    fn test_pointer_ignored_when_not_following() {
        let mut c = Controller::with_seed(config().with_follow_pointer(false), 1);
        c.set_pointer_target(Vec3::new(2.0, 0.0, 0.0));
        c.tick(0.016);
        assert_eq!(c.anchor().value(), Vec3::ZERO);
    }

    #[test]
    fn test_auto_move_picks_target_after_interval() {
        let cfg = config()
            .with_auto_move(true)
            .with_move_interval(1.0)
            .with_move_extent(0.5)
            .with_anchor_depth(3.0);
        let mut c = Controller::with_seed(cfg, 4);

        c.tick(0.6);
        assert_eq!(c.anchor().target(), Vec3::new(0.0, 0.0, 3.0));

        c.tick(0.6);
        let target = c.anchor().target();
        assert_eq!(target.z, 3.0);
        assert!(target.x.abs() <= 0.5 && target.y.abs() <= 0.5);
    }

    #[test]
    fn test_auto_mover_resets_timer() {
        let mut mover = AutoMover::with_seed(9);
        assert!(mover.tick(0.5, 1.0, 1.0, 0.0).is_none());
        assert!(mover.tick(0.6, 1.0, 1.0, 0.0).is_some());
        assert_eq!(mover.elapsed(), 0.0);
        assert!(mover.tick(0.5, 1.0, 1.0, 0.0).is_none());
    }

    #[test]
    fn test_auto_mover_zero_extent() {
        let mut mover = AutoMover::with_seed(9);
        assert_eq!(mover.tick(2.0, 1.0, 0.0, 5.0), Some(Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_auto_move_with_huge_extent() {
        let cfg = config()
            .with_auto_move(true)
            .with_move_interval(0.0)
            .with_move_extent(f32::MAX);
        let mut c = Controller::with_seed(cfg, 1);

        for _ in 0..10 {
            c.tick(0.016);
        }
        let target = c.anchor().target();
        assert!(target.is_finite());
        assert!(target.x.abs() <= c.config().move_extent);
    }

    #[test]
    fn test_auto_mover_extent_stays_in_bounds() {
        let mut mover = AutoMover::with_seed(3);
        for _ in 0..100 {
            let t = mover.tick(1.0, 0.5, f32::MAX, 0.0).unwrap();
            assert!(t.is_finite());
        }
    }

    #[test]
    fn test_reconfigure_geometry_keeps_trail_history() {
        let mut c = Controller::with_seed(config().with_friction(1.0), 1);
        for i in 0..5 {
            c.set_pointer_target(Vec3::new(i as f32, 0.0, 0.0));
            c.tick(0.016);
        }
        let history: Vec<Vec3> = c.trail().iter().copied().collect();
        let generation = c.ribbons().generation();

        c.reconfigure(config().with_friction(1.0).with_radius(0.4));
        assert_eq!(c.trail().iter().copied().collect::<Vec<_>>(), history);
        assert!(c.ribbons().generation() > generation);

        let generation = c.ribbons().generation();
        c.reconfigure(
            config()
                .with_friction(1.0)
                .with_radius(0.4)
                .with_anchor_depth(-1.5),
        );
        assert_eq!(c.trail().iter().copied().collect::<Vec<_>>(), history);
        assert!(c.ribbons().generation() > generation);
        assert!(c
            .ribbons()
            .iter()
            .all(|r| r.base().params().anchor_depth == -1.5));
    }

    #[test]
    fn test_reconfigure_motion_keeps_ribbons() {
        let mut c = Controller::with_seed(config(), 1);
        let generation = c.ribbons().generation();

        c.reconfigure(config().with_spread(4.0).with_friction(0.9));

        assert_eq!(c.ribbons().generation(), generation);
        assert_eq!(c.anchor().friction(), 0.9);
        assert_eq!(c.config().spread, 4.0);
    }

    #[test]
    fn test_reconfigure_segment_count_resets_trail() {
        let mut c = Controller::with_seed(config().with_friction(1.0), 1);
        c.set_pointer_target(Vec3::new(1.0, 1.0, 0.0));
        c.tick(0.016);

        c.reconfigure(config().with_friction(1.0).with_segment_count(40));

        assert_eq!(c.trail().len(), 40);
        assert!(c.trail().iter().all(|s| *s == Vec3::new(1.0, 1.0, 0.0)));
        assert!(c.ribbons().iter().all(|r| r.base().ring_count() == 40));
    }

    #[test]
    fn test_reconfigure_ribbon_count() {
        let mut c = Controller::with_seed(config(), 1);
        c.reconfigure(config().with_ribbons_count(7));
        assert_eq!(c.ribbons().len(), 7);
        assert_eq!(c.trail().len(), 20);
    }

    #[test]
    fn test_reset_regenerates() {
        let mut c = Controller::with_seed(config(), 1);
        let old_ids: Vec<u64> = c.ribbons().iter().map(|r| r.id()).collect();

        c.reset();

        assert_eq!(c.ribbons().len(), 3);
        assert!(c.ribbons().iter().all(|r| !old_ids.contains(&r.id())));
    }

    #[test]
    fn test_spectrum_displaces_target() {
        let mut c = Controller::with_seed(config().with_audio(2, 1.0).with_friction(1.0), 1);
        let spectrum = Spectrum::from_bytes(vec![0, 0, 255, 0]);

        c.apply_spectrum(&spectrum);
        c.tick(0.016);
        assert!((c.anchor().value().y - 1.0).abs() < 1e-6);

        // A quiet frame pulls the anchor back instead of accumulating
        c.apply_spectrum(&Spectrum::from_bytes(vec![0; 4]));
        c.tick(0.016);
        assert_eq!(c.anchor().value().y, 0.0);
    }

    #[test]
    fn test_disabling_audio_drops_offset() {
        let cfg = config().with_audio(0, 1.0).with_friction(1.0);
        let mut c = Controller::with_seed(cfg.clone(), 1);
        c.apply_spectrum(&Spectrum::from_bytes(vec![255, 0]));
        c.tick(0.016);
        assert!((c.anchor().value().y - 1.0).abs() < 1e-6);

        c.reconfigure(cfg.with_audio(0, 0.0));
        c.set_pointer_target(Vec3::ZERO);
        c.tick(0.016);
        assert_eq!(c.anchor().value(), Vec3::ZERO);
    }

    #[test]
    fn test_zero_gain_spectrum_clears_offset() {
        let mut c = Controller::with_seed(config().with_audio(0, 2.0).with_friction(1.0), 1);
        c.apply_spectrum(&Spectrum::from_bytes(vec![255]));
        c.tick(0.016);

        c.reconfigure(c.config().clone().with_audio(1, 0.0));
        c.apply_spectrum(&Spectrum::from_bytes(vec![255, 255]));
        c.tick(0.016);
        assert_eq!(c.anchor().value(), Vec3::ZERO);
    }

    #[test]
    fn test_spectrum_ignored_without_gain() {
        let mut c = Controller::with_seed(config().with_friction(1.0), 1);
        c.apply_spectrum(&Spectrum::from_bytes(vec![255; 4]));
        c.tick(0.016);
        assert_eq!(c.anchor().value(), Vec3::ZERO);
    }
}
