// What you SEE:
// • A sphere of faint colored blobs drifts apart along swirling curl-noise
//   currents, leaving trails that slowly darken.
// • A few frames before the run ends the picture dissolves into grain.
// • Left click: new palette, new sphere, new run. ESC quits.

use curl_bloom::draw::Drawer;
use curl_bloom::types::FrameBuffer;
use curl_bloom::{Config, Error, RandomPalette, Simulation, TickOutcome};
use noise::OpenSimplex;
use std::time::{Duration, Instant};

const DEFAULT_WIDTH: u32 = 960;
const DEFAULT_HEIGHT: u32 = 720;

fn main() -> Result<(), Error> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let (width, height) = match parse_size(args.get(1..).unwrap_or_default()) {
        Some(size) => size,
        None => {
            eprintln!("Usage: {} [width] [height]", program_name(&args));
            eprintln!();
            eprintln!("Render curl-noise particle blooms into a window.");
            eprintln!("Defaults to {DEFAULT_WIDTH}x{DEFAULT_HEIGHT}. Click to restart, ESC to quit.");
            std::process::exit(1);
        }
    };

    /* --- Simulation + window setup ---
       Visual: window opens black, then the first run starts painting. */
    let config = Config::new(width, height);
    let noise = OpenSimplex::new(rand::random());
    let mut sim = Simulation::new(
        config,
        noise,
        Box::new(RandomPalette::default()),
        rand::thread_rng(),
    )?;
    log::info!(
        "{}x{} surface, {} particles, {} depth slices",
        sim.config().width,
        sim.config().height,
        sim.config().num_blobs,
        sim.config().z_steps + 1,
    );
    let mut drawer = Drawer::new("Curl Bloom", width as usize, height as usize)?;

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::new(width as usize, height as usize);

    // The next frame to run; None once a run has finished.
    let mut pending = Some(sim.restart()?);

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        // Click: the fresh ticket replaces whatever frame was pending.
        if drawer.clicked() {
            pending = Some(sim.restart()?);
        }

        if let Some(ticket) = pending.take() {
            match sim.tick(ticket)? {
                TickOutcome::Scheduled(next) => pending = Some(next),
                TickOutcome::Finished => log::info!("run {} complete", sim.generation()),
                TickOutcome::Stale => {}
            }
            frames_this_second += 1;
        }

        sim.surface().to_frame_buffer(&mut screen);
        drawer.present(&screen)?;

        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            if frames_this_second > 0 {
                log::info!("FPS: {:.1}", frames_this_second as f32 / secs);
            }
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}

/// argv[0], or the binary name when the OS passed no arguments at all.
fn program_name(args: &[String]) -> &str {
    args.first().map_or("curl-bloom", String::as_str)
}

/// `[width] [height]`, both optional and positive.
fn parse_size(args: &[String]) -> Option<(u32, u32)> {
    let parse = |s: &String| s.parse::<u32>().ok().filter(|&v| v > 0);
    match args {
        [] => Some((DEFAULT_WIDTH, DEFAULT_HEIGHT)),
        [w] => Some((parse(w)?, DEFAULT_HEIGHT)),
        [w, h] => Some((parse(w)?, parse(h)?)),
        _ => None,
    }
}
