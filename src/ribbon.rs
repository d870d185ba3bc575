//! A single deformable ribbon.

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::geometry::{ring_to_trail_index, RibbonBaseGeometry};
use crate::trail::TrailBuffer;

/// Half-extent of the random lateral offset given to each ribbon.
pub const OFFSET_EXTENT: f32 = 0.5;

/// Texture scroll rate shared by every ribbon, scaled by its own speed.
const SCROLL_RATE: f32 = 0.1;

/// One tube mesh plus the per-ribbon values that keep it visually distinct.
///
/// The base geometry never changes after creation. The live positions are
/// rewritten by [`apply_deformation`](Self::apply_deformation) every frame.
#[derive(Debug, Clone)]
pub struct RibbonInstance {
    id: u64,
    base: RibbonBaseGeometry,
    positions: Vec<Vec3>,
    offset: Vec2,
    color: Vec3,
    speed: f32,
    scroll: f32,
    needs_redraw: bool,
}

impl RibbonInstance {
    /// Wrap `base` into a ribbon, drawing its offset, color and scroll speed
    /// from `rng`.
    pub fn new<R: Rng + ?Sized>(id: u64, base: RibbonBaseGeometry, rng: &mut R) -> Self {
        let offset = Vec2::new(
            rng.gen_range(-OFFSET_EXTENT..OFFSET_EXTENT),
            rng.gen_range(-OFFSET_EXTENT..OFFSET_EXTENT),
        );
        let color = Vec3::new(rng.gen(), rng.gen(), rng.gen());
        let speed = rng.gen_range(0.1..1.0);

        Self {
            id,
            positions: base.positions().to_vec(),
            base,
            offset,
            color,
            speed,
            scroll: 0.0,
            needs_redraw: true,
        }
    }

    /// Independent copy sharing this ribbon's shape but with a new id and
    /// freshly drawn offset, color and speed.
    pub fn clone_with<R: Rng + ?Sized>(&self, id: u64, rng: &mut R) -> Self {
        Self::new(id, self.base.clone(), rng)
    }

    /// Rewrite the planar coordinates of every vertex from the trail.
    ///
    /// Vertex `i` in ring `r` reads trail slot `ring_to_trail_index(r)` and
    /// lands at `base.xy + sample.xy + offset * (i / vertex_count) * spread`.
    /// Vertices whose slot is missing from the trail are put back at their
    /// base position. The depth coordinate is never touched.
    pub fn apply_deformation(&mut self, trail: &TrailBuffer, spread: f32) {
        let base = self.base.positions();
        let total = base.len().max(1) as f32;
        let ring_count = self.base.ring_count();

        for (i, (live, rest)) in self.positions.iter_mut().zip(base).enumerate() {
            let sample = ring_to_trail_index(self.base.ring_of(i), ring_count)
                .and_then(|slot| trail.at(slot).ok());

            match sample {
                Some(sample) => {
                    let ratio = i as f32 / total * spread;
                    live.x = rest.x + sample.x + self.offset.x * ratio;
                    live.y = rest.y + sample.y + self.offset.y * ratio;
                }
                None => {
                    live.x = rest.x;
                    live.y = rest.y;
                }
            }
        }

        self.needs_redraw = true;
    }

    /// Advance the texture scroll phase, wrapped into `[0, 1)`.
    pub fn scroll(&mut self, dt: f32) {
        self.scroll = (self.scroll + dt * SCROLL_RATE * self.speed).rem_euclid(1.0);
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn base(&self) -> &RibbonBaseGeometry {
        &self.base
    }

    /// Live vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Live vertex positions as a flat `[x, y, z, x, y, z, ...]` slice.
    #[inline]
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    #[inline]
    pub fn color(&self) -> Vec3 {
        self.color
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current texture scroll phase in `[0, 1)`.
    #[inline]
    pub fn scroll_phase(&self) -> f32 {
        self.scroll
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Read and clear the redraw flag.
    pub fn take_needs_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
