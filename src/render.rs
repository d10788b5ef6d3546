// Per-frame painting and post-processing.
// Visual: each blob stamps its depth-sized dab, drifts one curl step, and the
// whole picture slowly darkens until the dither frame scatters it.

use image::Rgb;
use noise::NoiseFn;

use crate::brush::BrushAtlas;
use crate::config::Config;
use crate::dither::dither;
use crate::error::Error;
use crate::flow::FlowField;
use crate::particle::{Particle, ParticleField};
use crate::projection::Projector;
use crate::rng::RandomSource;
use crate::surface::DrawingSurface;

/// Remaining-frame counters for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameState {
    /// Frames left; counts down and ends at -1 once the run is over.
    pub frame_count: i64,
    /// Value of `frame_count` at which the dither fires.
    pub post_draw_frame: i64,
}

/// What post-processing did this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostEffect {
    None,
    Dither,
    Fade,
}

pub struct Renderer {
    projector: Projector,
    distance: f64,
    dither_spread: f64,
    fade_alpha: f64,
}

impl Renderer {
    pub fn new(config: &Config) -> Self {
        Self {
            projector: Projector::new(config),
            distance: config.distance,
            dither_spread: config.dither_spread,
            fade_alpha: config.fade_alpha,
        }
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Top-left screen corner for a stamp of `side` centered on the particle.
    /// `None` when the particle sits on the camera plane and has no projection.
    pub fn placement(
        &self,
        p: &Particle,
        center: (f64, f64),
        side: (u32, u32),
    ) -> Option<(i64, i64)> {
        let (sx, sy) = self.projector.project(p.x, p.y, self.distance + p.z);
        if !sx.is_finite() || !sy.is_finite() {
            return None;
        }
        Some((
            (center.0 + sx - side.0 as f64 / 2.0) as i64,
            (center.1 + sy - side.1 as f64 / 2.0) as i64,
        ))
    }

    /// Stamp every particle, then advect it.
    pub fn paint<S, N>(
        &self,
        surface: &mut S,
        particles: &mut ParticleField,
        atlas: &BrushAtlas,
        flow: &FlowField<N>,
    ) where
        S: DrawingSurface + ?Sized,
        N: NoiseFn<f64, 3>,
    {
        let (w, h) = surface.dimensions();
        let center = (w as f64 * 0.5, h as f64 * 0.5);

        for p in particles.iter_mut() {
            let slice = self.projector.brush_index(self.distance + p.z);
            let stamp = atlas.set(p.brush_set).stamp(slice);
            match self.placement(p, center, stamp.dimensions()) {
                Some((x, y)) => surface.draw_image(stamp, x, y),
                None => log::trace!("skipping unprojectable particle at z={}", p.z),
            }

            flow.advect(p);
        }
    }

    /// Dither on the scheduled frame; fade every frame before it.
    pub fn post_process<S, R>(
        &self,
        surface: &mut S,
        state: &FrameState,
        rng: &mut R,
    ) -> Result<PostEffect, Error>
    where
        S: DrawingSurface + ?Sized,
        R: RandomSource + ?Sized,
    {
        if state.frame_count == state.post_draw_frame {
            log::debug!("dither pass at frame_count={}", state.frame_count);
            dither(surface, self.dither_spread, rng)?;
            return Ok(PostEffect::Dither);
        }
        if state.frame_count > state.post_draw_frame {
            let (w, h) = surface.dimensions();
            surface.fill_rect(0, 0, w, h, Rgb([0, 0, 0]), self.fade_alpha);
            return Ok(PostEffect::Fade);
        }
        Ok(PostEffect::None)
    }
}
