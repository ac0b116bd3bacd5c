//! Remote-to-local coordinate transformation.
//!
//! The controller works in remote screen space; the host injects events in
//! local screen space. The two differ by a single scale factor that the
//! display layer maintains as the remote resolution changes. This module
//! owns that shared factor and the two transforms applied to every incoming
//! coordinate.
//!
//! # Why an atomic bit pattern? (for beginners)
//!
//! The scale is written by the display layer and read on the input path, so
//! it needs to be shared between tasks. Rust has no `AtomicF32`, but an f32
//! is just 32 bits, so we store its bit pattern in an [`AtomicU32`] and
//! convert with [`f32::to_bits`]/[`f32::from_bits`]. A mutex would work too
//! but is overkill for a single word read on every pointer event.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Shared remote-to-local scale factor with the two coordinate transforms.
///
/// Cloning is cheap and every clone observes the same factor. The input core
/// only reads the scale; the embedding layer calls [`ScreenScale::set`] when
/// the remote resolution changes. Callers are responsible for keeping the
/// factor positive.
#[derive(Debug, Clone)]
pub struct ScreenScale {
    bits: Arc<AtomicU32>,
}

impl ScreenScale {
    /// Creates a handle with the given initial scale factor.
    pub fn new(scale: f32) -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(scale.to_bits())),
        }
    }

    /// Returns the current scale factor.
    pub fn get(&self) -> f32 {
        // Relaxed is enough: the scale is a standalone value and does not
        // order any other memory.
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Replaces the scale factor; all clones observe the new value.
    pub fn set(&self, scale: f32) {
        self.bits.store(scale.to_bits(), Ordering::Relaxed);
    }

    /// Transforms a remote absolute coordinate into local space.
    ///
    /// Negative remote values clamp to zero before scaling; malformed
    /// upstream coordinates must never produce an off-screen injection.
    pub fn scale_absolute(&self, v: i32) -> f32 {
        v.max(0) as f32 * self.get()
    }

    /// Transforms a remote signed delta into local space.
    ///
    /// No clamping: deltas are directional and a negative value is ordinary
    /// leftward/upward motion.
    pub fn scale_delta(&self, v: i32) -> f32 {
        v as f32 * self.get()
    }
}

impl Default for ScreenScale {
    /// Identity scale: remote and local space coincide.
    fn default() -> Self {
        Self::new(1.0)
    }
}
