//! Palette generation.

use image::Rgb;

use crate::rng::RandomSource;

/// Golden ratio conjugate; stepping hue by it spreads colors evenly.
const HUE_STEP: f64 = 0.618_033_988_749_895;

/// Supplies the ordered colors brushes are built from.
pub trait PaletteSource {
    fn generate(&self, rng: &mut dyn RandomSource) -> Vec<Rgb<u8>>;
}

/// Random palette of golden-ratio spaced hues.
#[derive(Debug, Clone)]
pub struct RandomPalette {
    pub min_colors: usize,
    pub max_colors: usize,
}

impl Default for RandomPalette {
    fn default() -> Self {
        Self { min_colors: 3, max_colors: 7 }
    }
}

impl PaletteSource for RandomPalette {
    fn generate(&self, rng: &mut dyn RandomSource) -> Vec<Rgb<u8>> {
        let min = self.min_colors.max(1);
        let span = self.max_colors.saturating_sub(min) + 1;
        let count = min + rng.next_index(span);

        let mut hue = rng.next_unit();
        (0..count)
            .map(|_| {
                hue = (hue + HUE_STEP).fract();
                let saturation = rng.next_range(0.45, 0.95);
                let value = rng.next_range(0.7, 1.0);
                hsv_to_rgb(hue, saturation, value)
            })
            .collect()
    }
}

/// Hue, saturation and value in [0, 1].
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb<u8> {
    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_u8 = |f: f64| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb([to_u8(r), to_u8(g), to_u8(b)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_palette_is_never_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let source = RandomPalette::default();
        for _ in 0..50 {
            let palette = source.generate(&mut rng);
            assert!((3..=7).contains(&palette.len()));
        }
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb([255, 0, 0]));
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), Rgb([0, 255, 0]));
        assert_eq!(hsv_to_rgb(0.5, 0.0, 1.0), Rgb([255, 255, 255]));
    }
}
