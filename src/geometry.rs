//! Procedural base geometry for ribbons.
//!
//! A ribbon is an open-ended tapered tube extruded along -Z from the anchor
//! depth. Vertices are laid out ring by ring: ring `r` holds
//! `radial_segments + 1` vertices (the seam vertex is duplicated so UVs wrap
//! cleanly), and rings run from `0` to `longitudinal_segments` inclusive.
//!
//! Ring `r` is driven by trail slot [`ring_to_trail_index`]`(r, ring_count)`.
//! Trail slot 0 is the oldest sample, so ring 0 (at the anchor depth) follows
//! the newest sample and the far end of the tube lags behind it.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

/// Radial resolution used when the configuration does not override it.
pub const DEFAULT_RADIAL_SEGMENTS: u32 = 7;

/// Map a ring index to the trail slot that drives it.
///
/// The mapping is reversed: ring 0 reads slot `ring_count - 1` (the newest
/// sample) and the last ring reads slot 0 (the oldest). Returns `None` for a
/// ring outside the tube.
///
/// ```
/// use ribbons::geometry::ring_to_trail_index;
///
/// assert_eq!(ring_to_trail_index(0, 50), Some(49));
/// assert_eq!(ring_to_trail_index(49, 50), Some(0));
/// assert_eq!(ring_to_trail_index(50, 50), None);
/// ```
#[inline]
pub fn ring_to_trail_index(ring: usize, ring_count: usize) -> Option<usize> {
    ring_count.checked_sub(1)?.checked_sub(ring)
}

/// Shape parameters for one tube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryParams {
    /// Radius of ring 0.
    pub radius_near: f32,
    /// Radius of the last ring.
    pub radius_far: f32,
    /// Length of the tube along its axis.
    pub height: f32,
    /// Quads around the circumference.
    pub radial_segments: u32,
    /// Quads along the axis. The tube has one more ring than this.
    pub longitudinal_segments: u32,
    /// Z coordinate of ring 0.
    pub anchor_depth: f32,
}

impl GeometryParams {
    /// Vertices per ring, including the duplicated seam vertex.
    #[inline]
    pub fn vertices_per_ring(&self) -> usize {
        self.radial_segments as usize + 1
    }

    #[inline]
    pub fn ring_count(&self) -> usize {
        self.longitudinal_segments as usize + 1
    }

    /// Total vertex count of the generated tube.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices_per_ring() * self.ring_count()
    }
}

/// Immutable vertex layout of one tube.
#[derive(Debug, Clone, PartialEq)]
pub struct RibbonBaseGeometry {
    params: GeometryParams,
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
}

impl RibbonBaseGeometry {
    #[inline]
    pub fn params(&self) -> &GeometryParams {
        &self.params
    }

    /// Local-space vertex positions in ring-major order.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Texture coordinates: `u` around the tube, `v` along it.
    #[inline]
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn vertices_per_ring(&self) -> usize {
        self.params.vertices_per_ring()
    }

    #[inline]
    pub fn ring_count(&self) -> usize {
        self.params.ring_count()
    }

    /// Ring that the vertex at `vertex` belongs to.
    #[inline]
    pub fn ring_of(&self, vertex: usize) -> usize {
        vertex / self.vertices_per_ring()
    }

    /// Triangle-list indices for the tube wall. Ends are left open.
    pub fn indices(&self) -> Vec<u32> {
        let per_ring = self.vertices_per_ring() as u32;
        let radial = self.params.radial_segments;
        let mut indices =
            Vec::with_capacity(self.params.longitudinal_segments as usize * radial as usize * 6);

        for ring in 0..self.params.longitudinal_segments {
            for j in 0..radial {
                let a = ring * per_ring + j;
                let b = (ring + 1) * per_ring + j;
                let c = (ring + 1) * per_ring + j + 1;
                let d = ring * per_ring + j + 1;

                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        indices
    }
}

/// Builds [`RibbonBaseGeometry`] from [`GeometryParams`].
///
/// Deterministic: equal parameters give bit-identical positions. Any per-ribbon
/// randomness (such as `radius_far`) is chosen by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct RibbonGeometryFactory;

impl RibbonGeometryFactory {
    pub fn build(&self, params: GeometryParams) -> RibbonBaseGeometry {
        let per_ring = params.vertices_per_ring();
        let rings = params.ring_count();
        let mut positions = Vec::with_capacity(per_ring * rings);
        let mut uvs = Vec::with_capacity(per_ring * rings);

        for ring in 0..rings {
            let v = if params.longitudinal_segments == 0 {
                0.0
            } else {
                ring as f32 / params.longitudinal_segments as f32
            };
            let radius = params.radius_near + (params.radius_far - params.radius_near) * v;
            let z = params.anchor_depth - v * params.height;

            for j in 0..per_ring {
                let u = j as f32 / params.radial_segments.max(1) as f32;
                let (sin_a, cos_a) = (u * TAU).sin_cos();

                positions.push(Vec3::new(radius * sin_a, radius * cos_a, z));
                uvs.push(Vec2::new(u, v));
            }
        }

        RibbonBaseGeometry {
            params,
            positions,
            uvs,
        }
    }
}
