//! Time-ordered history of smoothed anchor positions.
//!
//! The trail is a fixed-capacity FIFO: index 0 is the oldest sample and the
//! back is the newest. Pushing into a full buffer evicts the front.
//!
//! # Example
//!
//! ```
//! use ribbons::trail::TrailBuffer;
//! use ribbons::Vec3;
//!
//! let mut trail = TrailBuffer::filled(3, Vec3::ZERO);
//! trail.push(Vec3::X);
//! trail.push(Vec3::Y);
//! trail.push(Vec3::Z);
//!
//! assert_eq!(trail.len(), 3);
//! assert_eq!(trail.at(0).unwrap(), Vec3::X);
//! assert_eq!(trail.latest(), Some(Vec3::Z));
//! ```

use std::collections::VecDeque;

use glam::Vec3;

use crate::error::TrailError;

/// One recorded anchor position.
///
/// Stored by value, so every slot of the trail is independent of every other.
pub type Sample = Vec3;

/// Fixed-capacity, insertion-ordered buffer of [`Sample`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl TrailBuffer {
    /// Create an empty trail holding at most `capacity` samples.
    ///
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a trail already full of `capacity` copies of `sample`.
    pub fn filled(capacity: usize, sample: Sample) -> Self {
        let mut trail = Self::new(capacity);
        trail.refill(sample);
        trail
    }

    /// Append a sample, evicting the oldest one first when full.
    pub fn push(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Change the capacity, discarding history.
    ///
    /// The buffer is refilled with `new_capacity` copies of the most recent
    /// sample, or of `fallback` when the buffer was empty, so every slot the
    /// geometry can map to holds a value.
    pub fn resize(&mut self, new_capacity: usize, fallback: Sample) {
        let fill = self.latest().unwrap_or(fallback);
        self.capacity = new_capacity.max(1);
        self.refill(fill);
    }

    /// Sample at `index`, where 0 is the oldest.
    pub fn at(&self, index: usize) -> Result<Sample, TrailError> {
        self.samples.get(index).copied().ok_or(TrailError::IndexOutOfRange {
            index,
            len: self.samples.len(),
        })
    }

    /// Most recently pushed sample.
    #[inline]
    pub fn latest(&self) -> Option<Sample> {
        self.samples.back().copied()
    }

    /// Number of stored samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples kept.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    fn refill(&mut self, sample: Sample) {
        self.samples.clear();
        self.samples.resize(self.capacity, sample);
    }
}
