// One-shot pixel scatter ("dither").
// Visual: the image dissolves into grain, pixels pulled mostly from close by
// and occasionally from up to `spread` pixels away.

use crate::error::Error;
use crate::rng::RandomSource;
use crate::surface::DrawingSurface;

/// Replace every pixel with a randomly chosen neighbor from a snapshot of the
/// surface. Out-of-bounds picks leave the pixel as it was.
pub fn dither<S, R>(surface: &mut S, spread: f64, rng: &mut R) -> Result<(), Error>
where
    S: DrawingSurface + ?Sized,
    R: RandomSource + ?Sized,
{
    let src = surface.read_pixels();
    let mut dst = src.clone();
    let (w, h) = src.dimensions();
    let (wi, hi) = (w as i64, h as i64);

    for y in 0..h {
        for x in 0..w {
            let rnd = rng.next_unit();
            let radius = rnd * rnd * spread;
            let angle = rng.next_angle();

            // truncation toward zero, like the stamp placement
            let sx = (x as f64 + angle.cos() * radius) as i64;
            let sy = (y as f64 + angle.sin() * radius) as i64;

            if sx < 0 || sy < 0 || sx >= wi || sy >= hi {
                continue;
            }
            dst.put_pixel(x, y, *src.get_pixel(sx as u32, sy as u32));
        }
    }

    surface.write_pixels(dst)
}
