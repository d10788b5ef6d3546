//! Brush atlas: per palette color, one pre-rendered stamp per depth slice.
//!
//! Each stamp is a square whose side is the projected brush size at the
//! slice's depth, holding a few faint dabs clustered towards the center.
//! Stamps are stored nearest first, so index 0 is always the largest.

use image::{Rgb, RgbaImage};

use crate::config::Config;
use crate::error::Error;
use crate::projection::Projector;
use crate::rng::RandomSource;
use crate::surface::{fill_circle, DrawingSurface};

/// The stamps for one color, nearest depth slice first.
pub struct BrushSet {
    pub color: Rgb<u8>,
    stamps: Vec<RgbaImage>,
}

impl BrushSet {
    /// Stamp for a near-first slice index (see `Projector::brush_index`).
    pub fn stamp(&self, slice: usize) -> &RgbaImage {
        &self.stamps[slice.min(self.stamps.len() - 1)]
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    pub fn stamps(&self) -> &[RgbaImage] {
        &self.stamps
    }
}

/// One [`BrushSet`] per palette color. The default atlas is empty.
#[derive(Default)]
pub struct BrushAtlas {
    sets: Vec<BrushSet>,
}

impl BrushAtlas {
    /// Render `palette.len() * (z_steps + 1)` stamps.
    pub fn build<S, R>(
        config: &Config,
        palette: &[Rgb<u8>],
        surface: &S,
        rng: &mut R,
    ) -> Result<Self, Error>
    where
        S: DrawingSurface + ?Sized,
        R: RandomSource + ?Sized,
    {
        if palette.is_empty() {
            return Err(Error::EmptyPalette);
        }

        let projector = Projector::new(config);
        let step = 2.0 * config.radius / config.z_steps as f64;

        let sets = palette
            .iter()
            .map(|&color| {
                let stamps = (0..=config.z_steps)
                    .map(|slice| {
                        let z = config.near_depth() + slice as f64 * step;
                        render_stamp(config, &projector, z, color, surface, rng)
                    })
                    .collect();
                BrushSet { color, stamps }
            })
            .collect::<Vec<_>>();

        log::debug!(
            "brush atlas: {} colors x {} slices, stamp sides {}..{}",
            sets.len(),
            config.z_steps + 1,
            sets[0].stamps.last().map_or(0, |s| s.width()),
            sets[0].stamps[0].width(),
        );

        Ok(Self { sets })
    }

    pub fn set(&self, index: usize) -> &BrushSet {
        &self.sets[index]
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BrushSet> {
        self.sets.iter()
    }
}

/// Side length of the stamp at camera depth `z`, never below 1.
pub fn stamp_side(config: &Config, projector: &Projector, z: f64) -> u32 {
    let size = projector.project(config.brush_size, 0.0, z).0.ceil();
    if size.is_finite() && size >= 1.0 {
        size as u32
    } else {
        1
    }
}

fn render_stamp<S, R>(
    config: &Config,
    projector: &Projector,
    z: f64,
    color: Rgb<u8>,
    surface: &S,
    rng: &mut R,
) -> RgbaImage
where
    S: DrawingSurface + ?Sized,
    R: RandomSource + ?Sized,
{
    let size = stamp_side(config, projector, z);
    let minor = (size / 10) as f64;
    let mut img = surface.create_image(size);

    let half = size as f64 / 2.0;
    let reach = half - minor; // dab centers stay inside the stamp

    for _ in 0..config.dabs_per_stamp {
        let angle = rng.next_angle();
        let rnd = rng.next_unit();
        let r = rnd * rnd * reach;

        let x = half + angle.cos() * r;
        let y = half + angle.sin() * r;
        fill_circle(&mut img, x, y, minor, color, config.brush_alpha);
    }
    img
}
