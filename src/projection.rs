// Perspective projection and depth-slice selection.

use crate::config::Config;

#[derive(Debug, Clone, Copy)]
pub struct Projector {
    z_factor: f64,
    near: f64,    // depth of the sphere's front (slice 0)
    span: f64,    // depth covered by all slices (2 * radius)
    z_steps: usize,
}

impl Projector {
    pub fn new(config: &Config) -> Self {
        Self {
            z_factor: config.z_factor,
            near: config.near_depth(),
            span: 2.0 * config.radius,
            z_steps: config.z_steps,
        }
    }

    /// Perspective divide. `z` is the camera-relative depth.
    #[inline]
    pub fn project(&self, x: f64, y: f64, z: f64) -> (f64, f64) {
        let d = z * self.z_factor;
        (x / d, y / d)
    }

    /// Slice index counted from the near plane, before clamping.
    #[inline]
    pub fn raw_slice(&self, depth: f64) -> i64 {
        ((depth - self.near) * self.z_steps as f64 / self.span).floor() as i64
    }

    /// Clamp a slice index into `0..=z_steps`.
    #[inline]
    pub fn clamp_brush(&self, v: i64) -> usize {
        if v <= 0 {
            0
        } else if v >= self.z_steps as i64 {
            self.z_steps
        } else {
            v as usize
        }
    }

    /// Index into a near-first `BrushSet` for a particle at camera depth `depth`.
    ///
    /// Counted over the far-first stamp order this is `z_steps - clamp(raw)`;
    /// a brush set stores stamps nearest first, so the same stamp sits at
    /// `clamp(raw)`.
    #[inline]
    pub fn brush_index(&self, depth: f64) -> usize {
        self.clamp_brush(self.raw_slice(depth))
    }
}
