//! The animation state machine.
//!
//! A [`Simulation`] owns everything one session needs: the surface, the brush
//! atlas, the particles and the frame counters. The window loop drives it one
//! frame at a time through [`Simulation::tick`], holding a [`FrameTicket`]
//! between frames.
//!
//! Every [`Simulation::restart`] replaces the run wholesale and bumps the
//! generation. Tickets carry the generation they were issued for, so a frame
//! scheduled before a restart is recognised as stale and does nothing.

use image::Rgb;
use noise::NoiseFn;

use crate::brush::BrushAtlas;
use crate::config::Config;
use crate::error::Error;
use crate::flow::FlowField;
use crate::palette::PaletteSource;
use crate::particle::ParticleField;
use crate::render::{FrameState, PostEffect, Renderer};
use crate::rng::RandomSource;
use crate::surface::Canvas;

/// Permission to run the next frame of one particular run.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
}

/// Result of a single [`Simulation::tick`].
#[derive(Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Frame drawn; run the returned ticket on the next refresh.
    Scheduled(FrameTicket),
    /// Frame drawn and the run is over; the image stays as it is.
    Finished,
    /// The ticket predates the latest restart; nothing was touched.
    Stale,
}

pub struct Simulation<N, R> {
    config: Config,
    renderer: Renderer,
    flow: FlowField<N>,
    palette: Box<dyn PaletteSource>,
    rng: R,
    surface: Canvas,
    atlas: BrushAtlas,
    particles: ParticleField,
    frames: FrameState,
    generation: u64,
    last_effect: PostEffect,
}

impl<N, R> Simulation<N, R>
where
    N: NoiseFn<f64, 3>,
    R: RandomSource,
{
    /// Validate the config and set up an idle session: a black surface, no
    /// brushes and no particles. Call [`restart`](Self::restart) to start the
    /// first run.
    pub fn new(
        config: Config,
        noise: N,
        palette: Box<dyn PaletteSource>,
        rng: R,
    ) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            renderer: Renderer::new(&config),
            flow: FlowField::new(noise, &config),
            palette,
            rng,
            surface: Canvas::new(config.width, config.height),
            atlas: BrushAtlas::default(),
            particles: ParticleField::default(),
            frames: FrameState { frame_count: -1, post_draw_frame: 0 },
            generation: 0,
            last_effect: PostEffect::None,
            config,
        })
    }

    /// Clear the surface and rebuild palette, atlas, particles and the dither
    /// frame. Frame count and generation are left alone.
    pub fn init(&mut self) -> Result<(), Error> {
        self.surface.clear(Rgb([0, 0, 0]));
        let (atlas, particles, post_draw_frame) =
            build_run(&self.config, self.palette.as_ref(), &self.surface, &mut self.rng)?;
        self.atlas = atlas;
        self.particles = particles;
        self.frames.post_draw_frame = post_draw_frame;
        Ok(())
    }

    /// Start a fresh run. Tickets issued before this call become stale.
    pub fn restart(&mut self) -> Result<FrameTicket, Error> {
        self.init()?;
        self.frames.frame_count = self.rng.next_in(self.config.frame_range.clone());
        self.generation += 1;
        self.last_effect = PostEffect::None;

        log::info!(
            "run {}: {} colors, {} frames, dither at {}",
            self.generation,
            self.atlas.len(),
            self.frames.frame_count,
            self.frames.post_draw_frame,
        );

        Ok(FrameTicket { generation: self.generation })
    }

    /// Draw one frame: paint and advect every particle, post-process, count down.
    pub fn tick(&mut self, ticket: FrameTicket) -> Result<TickOutcome, Error> {
        if ticket.generation != self.generation {
            log::trace!(
                "dropping stale frame (ticket {}, current {})",
                ticket.generation,
                self.generation
            );
            return Ok(TickOutcome::Stale);
        }

        self.renderer
            .paint(&mut self.surface, &mut self.particles, &self.atlas, &self.flow);
        self.last_effect = self
            .renderer
            .post_process(&mut self.surface, &self.frames, &mut self.rng)?;

        let remaining = self.frames.frame_count;
        self.frames.frame_count -= 1;
        if remaining > 0 {
            Ok(TickOutcome::Scheduled(ticket))
        } else {
            log::debug!("run {} finished", self.generation);
            Ok(TickOutcome::Finished)
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn surface(&self) -> &Canvas {
        &self.surface
    }

    pub fn atlas(&self) -> &BrushAtlas {
        &self.atlas
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn frame_state(&self) -> FrameState {
        self.frames
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Post-processing applied by the most recent tick.
    pub fn last_effect(&self) -> PostEffect {
        self.last_effect
    }
}

/// Palette, atlas, particles and dither frame for one run.
fn build_run<R: RandomSource>(
    config: &Config,
    palette: &dyn PaletteSource,
    surface: &Canvas,
    rng: &mut R,
) -> Result<(BrushAtlas, ParticleField, i64), Error> {
    let colors = palette.generate(rng);
    let atlas = BrushAtlas::build(config, &colors, surface, rng)?;
    let particles = ParticleField::init(config.num_blobs, config.radius, atlas.len(), rng);
    let post_draw_frame = rng.next_in(config.post_draw_range.clone());
    Ok((atlas, particles, post_draw_frame))
}
