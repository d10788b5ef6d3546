//! Session constants for the renderer.

use std::ops::Range;

/// Immutable per-session configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Radius of the sphere the particles start on.
    pub radius: f64,
    /// Camera offset along z; the sphere center sits at this depth.
    pub distance: f64,
    /// Brush size in world units before projection.
    pub brush_size: f64,
    /// Perspective scale applied to depth before the divide.
    pub z_factor: f64,
    /// Number of particles.
    pub num_blobs: usize,
    /// Depth resolution; each brush set holds `z_steps + 1` stamps.
    pub z_steps: usize,
    /// Alpha of every dab painted into a stamp.
    pub brush_alpha: f64,
    /// Dabs per stamp image.
    pub dabs_per_stamp: usize,
    /// World-to-noise-space scale used when advecting.
    pub noise_scale: f64,
    /// Finite-difference step in noise space.
    pub curl_epsilon: f64,
    /// Length of one advection step.
    pub curl_factor: f64,
    /// Gradient magnitudes below this produce no motion.
    pub curl_guard: f64,
    /// Maximum scatter distance of the dithering pass, in pixels.
    pub dither_spread: f64,
    /// Alpha of the black overlay that fades trails.
    pub fade_alpha: f64,
    /// Total frames per run, drawn once per restart.
    pub frame_range: Range<i64>,
    /// Remaining-frame count at which the dither fires.
    pub post_draw_range: Range<i64>,
}

impl Config {
    /// Default constants for a surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let radius = 300.0;
        Self {
            width,
            height,
            radius,
            distance: radius + 200.0,
            brush_size: 80.0,
            z_factor: 0.001,
            num_blobs: 500,
            z_steps: 16,
            brush_alpha: 0.01,
            dabs_per_stamp: 5,
            noise_scale: 0.01,
            curl_epsilon: 0.1,
            curl_factor: 1.0,
            curl_guard: 1e-12,
            dither_spread: 40.0,
            fade_alpha: 0.01,
            frame_range: 200..300,
            post_draw_range: 5..10,
        }
    }

    /// Depth of the nearest slice (front of the sphere).
    pub fn near_depth(&self) -> f64 {
        self.distance - self.radius
    }

    /// Depth of the farthest slice (back of the sphere).
    pub fn far_depth(&self) -> f64 {
        self.distance + self.radius
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if !(self.radius > 0.0) {
            return Err(ConfigError::InvalidRadius);
        }
        if !(self.distance > self.radius) {
            return Err(ConfigError::CameraInsideSphere {
                distance: self.distance,
                radius: self.radius,
            });
        }
        if !(self.brush_size > 0.0) || !(self.z_factor > 0.0) {
            return Err(ConfigError::InvalidBrush);
        }
        if self.num_blobs == 0 {
            return Err(ConfigError::NoParticles);
        }
        if self.z_steps == 0 {
            return Err(ConfigError::InvalidDepthSteps);
        }
        if self.frame_range.is_empty() || self.post_draw_range.is_empty() {
            return Err(ConfigError::EmptyFrameRange);
        }

        let unit = |v: f64| (0.0..=1.0).contains(&v);
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !unit(self.brush_alpha) {
            return Err(ConfigError::InvalidTuning("brush_alpha"));
        }
        if !unit(self.fade_alpha) {
            return Err(ConfigError::InvalidTuning("fade_alpha"));
        }
        if !non_negative(self.dither_spread) {
            return Err(ConfigError::InvalidTuning("dither_spread"));
        }
        if !non_negative(self.noise_scale) {
            return Err(ConfigError::InvalidTuning("noise_scale"));
        }
        if !non_negative(self.curl_guard) {
            return Err(ConfigError::InvalidTuning("curl_guard"));
        }
        if !(self.curl_epsilon.is_finite() && self.curl_epsilon > 0.0) {
            return Err(ConfigError::InvalidTuning("curl_epsilon"));
        }
        if !self.curl_factor.is_finite() {
            return Err(ConfigError::InvalidTuning("curl_factor"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(960, 720)
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Surface dimensions must be non-zero")]
    InvalidDimensions,
    #[error("Sphere radius must be positive")]
    InvalidRadius,
    #[error("Camera distance {distance} must exceed sphere radius {radius}")]
    CameraInsideSphere { distance: f64, radius: f64 },
    #[error("Brush size and z factor must be positive")]
    InvalidBrush,
    #[error("Particle count must be non-zero")]
    NoParticles,
    #[error("Depth step count must be non-zero")]
    InvalidDepthSteps,
    #[error("Frame ranges must be non-empty")]
    EmptyFrameRange,
    #[error("{0} is out of range")]
    InvalidTuning(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = Config::default();
        assert_eq!(config.distance, 500.0);
        assert_eq!(config.near_depth(), 200.0);
        assert_eq!(config.far_depth(), 800.0);
        assert_eq!(config.num_blobs, 500);
        assert_eq!(config.z_steps, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::new(0, 10);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDimensions)));

        config = Config::default();
        config.distance = config.radius;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CameraInsideSphere { .. })
        ));

        config = Config::default();
        config.z_steps = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDepthSteps)));

        config = Config::default();
        config.frame_range = 10..10;
        assert!(matches!(config.validate(), Err(ConfigError::EmptyFrameRange)));

        config = Config::default();
        config.z_factor = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBrush)));
    }

    #[test]
    fn test_validation_rejects_bad_tuning() {
        let cases: [(fn(&mut Config), &str); 6] = [
            (|c| c.curl_guard = f64::NAN, "curl_guard"),
            (|c| c.dither_spread = -1.0, "dither_spread"),
            (|c| c.fade_alpha = 1.5, "fade_alpha"),
            (|c| c.brush_alpha = f64::NAN, "brush_alpha"),
            (|c| c.curl_epsilon = 0.0, "curl_epsilon"),
            (|c| c.curl_factor = f64::INFINITY, "curl_factor"),
        ];
        for (mutate, field) in cases {
            let mut config = Config::default();
            mutate(&mut config);
            match config.validate() {
                Err(ConfigError::InvalidTuning(name)) => assert_eq!(name, field),
                other => panic!("{field}: expected InvalidTuning, got {other:?}"),
            }
        }

        let mut config = Config::default();
        config.dither_spread = 0.0;
        config.fade_alpha = 0.0;
        assert!(config.validate().is_ok());
    }
}
