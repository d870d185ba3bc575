//! The collection of ribbons and its regeneration lifecycle.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::RibbonConfig;
use crate::geometry::RibbonGeometryFactory;
use crate::ribbon::RibbonInstance;
use crate::trail::TrailBuffer;

/// Lower bound of each ribbon's far radius, as a fraction of the max radius.
const MIN_RADIUS_RATIO: f32 = 0.1;

/// Owns every [`RibbonInstance`] and rebuilds them when the shape changes.
///
/// Regeneration is the only place new geometry is allocated. The per-frame
/// path ([`tick`](Self::tick)) only rewrites existing vertex arrays.
#[derive(Debug)]
pub struct RibbonSet {
    instances: Vec<RibbonInstance>,
    factory: RibbonGeometryFactory,
    rng: SmallRng,
    next_id: u64,
    generation: u64,
}

impl RibbonSet {
    /// Create an empty set with a time-seeded RNG.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(seed)
    }

    /// Create an empty set whose randomness is reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            instances: Vec::new(),
            factory: RibbonGeometryFactory,
            rng: SmallRng::seed_from_u64(seed),
            next_id: 0,
            generation: 0,
        }
    }

    /// Drop every ribbon and build `config.ribbons_count` fresh ones.
    ///
    /// Each ribbon gets a far radius drawn from `[radius * 0.1, radius]` and
    /// a new random offset. The config is validated first, so malformed
    /// values yield a degenerate or empty set rather than an error.
    pub fn regenerate(&mut self, config: &RibbonConfig) {
        let config = config.validated();
        let max_radius = config.radius;

        self.instances.clear();
        self.instances.reserve(config.ribbons_count);

        for _ in 0..config.ribbons_count {
            let radius_far = self
                .rng
                .gen_range(max_radius * MIN_RADIUS_RATIO..=max_radius);
            let base = self.factory.build(config.geometry(radius_far));
            let id = self.next_id;
            self.next_id += 1;
            self.instances.push(RibbonInstance::new(id, base, &mut self.rng));
        }

        self.generation += 1;
        log::debug!(
            "regenerated {} ribbons ({} rings x {} radial segments), generation {}",
            self.instances.len(),
            config.segment_count,
            config.radial_segments,
            self.generation
        );
    }

    /// Deform every ribbon from `trail`.
    pub fn tick(&mut self, trail: &TrailBuffer, spread: f32) {
        for ribbon in &mut self.instances {
            ribbon.apply_deformation(trail, spread);
        }
    }

    /// Advance every ribbon's texture scroll by `dt` seconds.
    pub fn scroll(&mut self, dt: f32) {
        for ribbon in &mut self.instances {
            ribbon.scroll(dt);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Ribbons in creation order.
    #[inline]
    pub fn instances(&self) -> &[RibbonInstance] {
        &self.instances
    }

    #[inline]
    pub fn instances_mut(&mut self) -> &mut [RibbonInstance] {
        &mut self.instances
    }

    pub fn iter(&self) -> impl Iterator<Item = &RibbonInstance> + '_ {
        self.instances.iter()
    }

    /// Incremented on every regeneration. Renderers compare it to know when
    /// the membership (and so the mesh topology) changed.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for RibbonSet {
    fn default() -> Self {
        Self::new()
    }
}
