//! Curl-noise flow field.
//!
//! The field is the curl of a scalar 3D noise, approximated with central
//! differences. Every sample is normalized, so particles move a constant
//! distance per frame regardless of how steep the noise is locally.

use noise::NoiseFn;

use crate::config::Config;
use crate::particle::Particle;

pub struct FlowField<N> {
    noise: N,
    /// World-to-noise-space scale applied before sampling.
    scale: f64,
    /// Finite-difference step in noise space.
    eps: f64,
    /// Length of the returned displacement.
    strength: f64,
    /// Raw magnitudes below this are treated as no flow.
    guard: f64,
}

impl<N: NoiseFn<f64, 3>> FlowField<N> {
    pub fn new(noise: N, config: &Config) -> Self {
        Self {
            noise,
            scale: config.noise_scale,
            eps: config.curl_epsilon,
            strength: config.curl_factor,
            guard: config.curl_guard,
        }
    }

    /// Unit curl direction at a noise-space point, scaled by the strength.
    pub fn curl(&self, x: f64, y: f64, z: f64) -> [f64; 3] {
        let e = self.eps;
        let n1 = self.noise.get([x, y + e, z]);
        let n2 = self.noise.get([x, y - e, z]);
        let n3 = self.noise.get([x, y, z + e]);
        let n4 = self.noise.get([x, y, z - e]);
        let n5 = self.noise.get([x + e, y, z]);
        let n6 = self.noise.get([x - e, y, z]);

        let dx = n2 - n1 - n4 + n3;
        let dy = n4 - n3 - n6 + n5;
        let dz = n6 - n5 - n2 + n1;

        let mag = (dx * dx + dy * dy + dz * dz).sqrt();
        if !mag.is_finite() || mag < self.guard {
            return [0.0; 3];
        }

        let f = self.strength / mag;
        [dx * f, dy * f, dz * f]
    }

    /// Move a particle one full curl step. No velocity is kept between frames.
    pub fn advect(&self, particle: &mut Particle) {
        let [dx, dy, dz] = self.curl(
            particle.x * self.scale,
            particle.y * self.scale,
            particle.z * self.scale,
        );
        particle.x += dx;
        particle.y += dy;
        particle.z += dz;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noise::{Constant, OpenSimplex};

    fn magnitude(v: [f64; 3]) -> f64 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    /// Noise that is linear in each axis, so the raw curl is known exactly.
    struct Ramp;

    impl NoiseFn<f64, 3> for Ramp {
        fn get(&self, p: [f64; 3]) -> f64 {
            0.3 * p[0] - 0.2 * p[1] + 0.1 * p[2]
        }
    }

    #[test]
    fn test_curl_is_normalized() {
        let field = FlowField::new(OpenSimplex::new(11), &Config::default());
        let mut moved = 0;
        for i in 0..200 {
            let t = i as f64 * 0.173;
            let d = field.curl(t.sin() * 3.0, t.cos() * 2.0, t * 0.5);
            let m = magnitude(d);
            if m > 0.0 {
                assert!((m - 1.0).abs() < 1e-9, "magnitude {m}");
                moved += 1;
            }
        }
        assert!(moved > 0);
    }

    #[test]
    fn test_curl_of_linear_noise() {
        let field = FlowField::new(Ramp, &Config::default());
        // n2-n1 = 0.04, n3-n4 = 0.02, n5-n6 = 0.06
        let d = field.curl(1.0, 2.0, 3.0);
        let raw = [0.04 + 0.02, -0.02 + 0.06, -0.06 - 0.04];
        let m = magnitude(raw);
        for k in 0..3 {
            assert!((d[k] - raw[k] / m).abs() < 1e-9);
        }
    }

    #[test]
    fn test_flat_noise_gives_zero_step() {
        let field = FlowField::new(Constant::new(0.5), &Config::default());
        assert_eq!(field.curl(0.2, -4.0, 9.0), [0.0, 0.0, 0.0]);

        let mut p = Particle { x: 12.0, y: -40.0, z: 250.0, brush_set: 0 };
        field.advect(&mut p);
        assert_eq!((p.x, p.y, p.z), (12.0, -40.0, 250.0));
    }

    #[test]
    fn test_advect_moves_by_strength() {
        let mut config = Config::default();
        config.curl_factor = 2.5;
        let field = FlowField::new(Ramp, &config);
        let mut p = Particle { x: 10.0, y: 20.0, z: 30.0, brush_set: 0 };
        field.advect(&mut p);
        let step = magnitude([p.x - 10.0, p.y - 20.0, p.z - 30.0]);
        assert!((step - 2.5).abs() < 1e-9);
    }
}
