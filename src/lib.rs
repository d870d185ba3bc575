//! # Ribbons - trail-driven ribbon deformation
//!
//! Tube-shaped ribbons whose vertices are remapped every frame from the
//! smoothed trail of a moving anchor point.
//!
//! ## Quick Start
//!
//! ```
//! use ribbons::prelude::*;
//!
//! let mut controller = Controller::with_seed(
//!     RibbonConfig::new()
//!         .with_ribbons_count(8)
//!         .with_segment_count(60)
//!         .with_friction(0.1),
//!     42,
//! );
//!
//! // In your frame loop:
//! controller.set_pointer_target(Vec3::new(0.3, -0.2, 0.0));
//! controller.tick(1.0 / 60.0);
//!
//! for ribbon in controller.ribbons().iter() {
//!     let _xyz: &[f32] = ribbon.positions_flat();
//! }
//! ```
//!
//! Or open a window with [`Viewer`]:
//!
//! ```ignore
//! Viewer::new(RibbonConfig::default()).run()?;
//! ```
//!
//! ## Core Concepts
//!
//! ### Anchor and trail
//!
//! A [`SmoothedAnchor`] chases its target by `friction` of the remaining
//! distance per frame. Each frame its value is pushed into a [`TrailBuffer`],
//! a FIFO holding the last `segment_count` positions (index 0 is oldest).
//!
//! ### Ribbons
//!
//! [`RibbonGeometryFactory`] builds an open tapered tube with one ring per
//! trail slot. Ring `r` follows slot [`ring_to_trail_index`]`(r)`, which is
//! reversed: ring 0 follows the newest sample. On top of the trail each
//! vertex is pushed sideways by the ribbon's random offset, scaled by how far
//! into the vertex array it sits and by `spread`.
//!
//! ### Regeneration
//!
//! [`RibbonSet::regenerate`] is the only place geometry is allocated. The
//! [`Controller`] calls it when a shape field of the [`RibbonConfig`]
//! changes; everything else is updated in place.
//!
//! ## Threading
//!
//! Everything runs on one thread, one frame at a time. Renderers read the
//! vertex arrays between ticks.

pub mod anchor;
pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod ribbon;
pub mod ribbon_set;
pub mod shader;
pub mod time;
pub mod trail;
mod viewer;

pub use anchor::SmoothedAnchor;
pub use audio::{Spectrum, SpectrumSource, StaticSpectrum};
pub use config::{ConfigDiff, RibbonConfig};
pub use controller::{AutoMover, Controller};
pub use error::{GpuError, TrailError, ViewerError};
pub use geometry::{ring_to_trail_index, GeometryParams, RibbonBaseGeometry, RibbonGeometryFactory};
pub use glam::{Vec2, Vec3};
pub use ribbon::RibbonInstance;
pub use ribbon_set::RibbonSet;
pub use trail::{Sample, TrailBuffer};
pub use viewer::Viewer;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use ribbons::prelude::*;
/// ```
pub mod prelude {
    pub use crate::anchor::SmoothedAnchor;
    pub use crate::audio::{Spectrum, SpectrumSource};
    pub use crate::config::RibbonConfig;
    pub use crate::controller::Controller;
    pub use crate::ribbon::RibbonInstance;
    pub use crate::ribbon_set::RibbonSet;
    pub use crate::trail::{Sample, TrailBuffer};
    pub use crate::viewer::Viewer;
    pub use crate::{Vec2, Vec3};
}
