//! Curl Bloom - painterly particle blooms driven by curl noise.
//!
//! Particles start on a sphere, drift through a divergence-free noise flow and
//! are painted as perspective-sized brush stamps onto a canvas that is never
//! cleared, only faded. Near the end of each run the canvas is scattered by a
//! one-shot dither pass.
//!
//! # Modules
//!
//! - `flow`, `projection`: the pure math (curl field, perspective, depth slices)
//! - `brush`, `particle`, `palette`: per-run state built on restart
//! - `surface`, `dither`, `render`: software compositing
//! - `simulation`: the frame-by-frame state machine the window loop drives
//!
//! # Example
//!
//! ```rust,no_run
//! use curl_bloom::{Config, RandomPalette, Simulation, TickOutcome};
//! use noise::OpenSimplex;
//!
//! let mut sim = Simulation::new(
//!     Config::new(640, 480),
//!     OpenSimplex::new(7),
//!     Box::new(RandomPalette::default()),
//!     rand::thread_rng(),
//! )?;
//!
//! let mut ticket = sim.restart()?;
//! while let TickOutcome::Scheduled(next) = sim.tick(ticket)? {
//!     ticket = next;
//! }
//! # Ok::<(), curl_bloom::Error>(())
//! ```

pub mod brush;
pub mod config;
pub mod dither;
pub mod draw;
pub mod error;
pub mod flow;
pub mod palette;
pub mod particle;
pub mod projection;
pub mod render;
pub mod rng;
pub mod simulation;
pub mod surface;
pub mod types;

pub use config::Config;
pub use error::Error;
pub use palette::{PaletteSource, RandomPalette};
pub use simulation::{FrameTicket, Simulation, TickOutcome};
