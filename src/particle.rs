// Particle storage and spherical initialization.

use std::f64::consts::TAU;

use crate::rng::RandomSource;

/// One blob. Visual: a cluster of faint dabs that wanders with the flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub z: f64,           // relative to the sphere center
    pub brush_set: usize, // index into the brush atlas
}

impl Particle {
    #[inline]
    pub fn distance_from_center(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

#[derive(Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// `count` particles uniformly distributed on a sphere of `radius`, each
    /// with a random brush set out of `brush_sets`.
    pub fn init<R: RandomSource + ?Sized>(
        count: usize,
        radius: f64,
        brush_sets: usize,
        rng: &mut R,
    ) -> Self {
        let particles = (0..count)
            .map(|_| {
                // acos(2v - 1) keeps the poles from clustering
                let theta = TAU * rng.next_unit();
                let phi = (2.0 * rng.next_unit() - 1.0).acos();
                Particle {
                    x: radius * phi.sin() * theta.cos(),
                    y: radius * phi.sin() * theta.sin(),
                    z: radius * phi.cos(),
                    brush_set: rng.next_index(brush_sets),
                }
            })
            .collect();
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }
}

impl From<Vec<Particle>> for ParticleField {
    fn from(particles: Vec<Particle>) -> Self {
        Self { particles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRandom;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_particles_start_on_sphere() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = ParticleField::init(500, 300.0, 4, &mut rng);
        assert_eq!(field.len(), 500);
        for p in field.iter() {
            let rel = (p.distance_from_center() - 300.0).abs() / 300.0;
            assert!(rel < 1e-6, "particle off sphere: {p:?}");
            assert!(p.brush_set < 4);
        }
    }

    #[test]
    fn test_poles_and_equator() {
        // u = 0, v = 1 -> north pole; u = 0.25, v = 0.5 -> equator on +y
        let mut rng = SequenceRandom::new(vec![0.0, 1.0, 0.0, 0.25, 0.5, 0.99]);
        let field = ParticleField::init(2, 10.0, 3, &mut rng);
        let p = field.as_slice();
        assert!((p[0].z - 10.0).abs() < 1e-9);
        assert!(p[0].x.abs() < 1e-9 && p[0].y.abs() < 1e-9);
        assert_eq!(p[0].brush_set, 0);
        assert!((p[1].y - 10.0).abs() < 1e-9);
        assert!(p[1].z.abs() < 1e-9);
        assert_eq!(p[1].brush_set, 2);
    }
}
