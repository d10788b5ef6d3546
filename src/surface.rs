// Software drawing surface.
// The renderer only talks to `DrawingSurface`; `Canvas` implements it over an
// RGBA image and packs that image into the window's frame buffer.

use image::{Rgb, Rgba, RgbaImage};

use crate::error::Error;
use crate::types::{pack_rgb, FrameBuffer};

pub trait DrawingSurface {
    /// (width, height) in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// A transparent square image to draw stamps into. Sides below 1 become 1.
    fn create_image(&self, size: u32) -> RgbaImage {
        let side = size.max(1);
        RgbaImage::new(side, side)
    }

    /// Composite a solid rectangle (source-over), clipped to the surface.
    fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgb<u8>, alpha: f64);

    /// Composite `image` with its top-left corner at (x, y), clipped.
    fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64);

    /// Copy of the full pixel buffer.
    fn read_pixels(&self) -> RgbaImage;

    /// Replace the full pixel buffer; sizes must match.
    fn write_pixels(&mut self, pixels: RgbaImage) -> Result<(), Error>;
}

/// Source-over composite of a non-premultiplied color onto `dst`.
/// Visual: at alpha 0.01 each call nudges the pixel ~1% towards `src`.
#[inline]
pub fn blend_over(dst: &mut Rgba<u8>, src: [u8; 3], alpha: f64) {
    let sa = alpha.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f64 / 255.0;
    let keep = da * (1.0 - sa);
    let out_a = sa + keep;
    if out_a <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    for c in 0..3 {
        let v = (src[c] as f64 * sa + dst[c] as f64 * keep) / out_a;
        dst[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Fill a disc of `radius` centered at (cx, cy), compositing each covered pixel.
/// A pixel is covered when its center lies inside the circle; radius 0 paints nothing.
pub fn fill_circle(img: &mut RgbaImage, cx: f64, cy: f64, radius: f64, color: Rgb<u8>, alpha: f64) {
    if radius <= 0.0 {
        return;
    }
    let r2 = radius * radius;
    let (w, h) = img.dimensions();

    // Scan just the bounding box
    let x0 = (cx - radius).floor().max(0.0) as u32;
    let y0 = (cy - radius).floor().max(0.0) as u32;
    let x1 = ((cx + radius).ceil().max(0.0) as u32).min(w);
    let y1 = ((cy + radius).ceil().max(0.0) as u32).min(h);

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            if dx * dx + dy * dy > r2 {
                continue;
            }
            blend_over(img.get_pixel_mut(x, y), color.0, alpha);
        }
    }
}

/// The window-backed surface: an opaque RGBA buffer.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// New canvas filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])) }
    }

    /// Overwrite every pixel with an opaque color.
    pub fn clear(&mut self, color: Rgb<u8>) {
        let [r, g, b] = color.0;
        for p in self.image.pixels_mut() {
            *p = Rgba([r, g, b, 255]);
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Pack the canvas into 0x00RRGGBB pixels for the window.
    pub fn to_frame_buffer(&self, fb: &mut FrameBuffer) {
        let (w, h) = self.image.dimensions();
        fb.width = w as usize;
        fb.height = h as usize;
        fb.pixels.clear();
        fb.pixels.extend(self.image.pixels().map(|p| pack_rgb(p[0], p[1], p[2])));
    }
}

/// Intersect [start, start+len) with [0, limit).
#[inline]
fn clip_span(start: i64, len: u32, limit: u32) -> (u32, u32) {
    let lo = start.clamp(0, limit as i64);
    let hi = start.saturating_add(len as i64).clamp(0, limit as i64);
    (lo as u32, hi as u32)
}

impl DrawingSurface for Canvas {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgb<u8>, alpha: f64) {
        let (sw, sh) = self.image.dimensions();
        let (x0, x1) = clip_span(x, w, sw);
        let (y0, y1) = clip_span(y, h, sh);
        for py in y0..y1 {
            for px in x0..x1 {
                blend_over(self.image.get_pixel_mut(px, py), color.0, alpha);
            }
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64) {
        let (sw, sh) = self.image.dimensions();
        let (iw, ih) = image.dimensions();
        let (x0, x1) = clip_span(x, iw, sw);
        let (y0, y1) = clip_span(y, ih, sh);
        for py in y0..y1 {
            for px in x0..x1 {
                let src = image.get_pixel((px as i64 - x) as u32, (py as i64 - y) as u32);
                if src[3] == 0 {
                    continue;
                }
                let alpha = src[3] as f64 / 255.0;
                blend_over(self.image.get_pixel_mut(px, py), [src[0], src[1], src[2]], alpha);
            }
        }
    }

    fn read_pixels(&self) -> RgbaImage {
        self.image.clone()
    }

    fn write_pixels(&mut self, pixels: RgbaImage) -> Result<(), Error> {
        if pixels.dimensions() != self.image.dimensions() {
            return Err(Error::BufferSize {
                expected: self.image.dimensions(),
                actual: pixels.dimensions(),
            });
        }
        self.image = pixels;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_over_opaque_black() {
        let mut p = Rgba([0, 0, 0, 255]);
        blend_over(&mut p, [255, 255, 255], 0.01);
        assert_eq!(p, Rgba([3, 3, 3, 255]));

        let mut q = Rgba([200, 100, 0, 255]);
        blend_over(&mut q, [0, 0, 0], 0.5);
        assert_eq!(q, Rgba([100, 50, 0, 255]));
    }

    #[test]
    fn test_blend_over_transparent_takes_source_color() {
        let mut p = Rgba([0, 0, 0, 0]);
        blend_over(&mut p, [10, 20, 30], 0.01);
        assert_eq!(p, Rgba([10, 20, 30, 3]));
    }

    #[test]
    fn test_fill_circle_covers_disc_only() {
        let mut img = RgbaImage::new(10, 10);
        fill_circle(&mut img, 5.0, 5.0, 2.0, Rgb([255, 0, 0]), 1.0);
        assert_eq!(img.get_pixel(5, 5)[3], 255);
        assert_eq!(img.get_pixel(4, 4)[3], 255);
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(7, 7)[3], 0);

        let mut empty = RgbaImage::new(4, 4);
        fill_circle(&mut empty, 2.0, 2.0, 0.0, Rgb([255, 0, 0]), 1.0);
        assert!(empty.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_draw_image_clips_at_edges() {
        let mut canvas = Canvas::new(4, 4);
        let stamp = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 255]));
        canvas.draw_image(&stamp, -2, 2);
        let img = canvas.image();
        assert_eq!(img.get_pixel(0, 2), &Rgba([255, 255, 255, 255]));
        assert_eq!(img.get_pixel(0, 3), &Rgba([255, 255, 255, 255]));
        assert_eq!(img.get_pixel(1, 2), &Rgba([0, 0, 0, 255]));
        assert_eq!(img.get_pixel(0, 1), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_fill_rect_and_frame_buffer() {
        let mut canvas = Canvas::new(3, 2);
        canvas.fill_rect(1, 0, 10, 10, Rgb([255, 128, 0]), 1.0);
        let mut fb = FrameBuffer::new(0, 0);
        canvas.to_frame_buffer(&mut fb);
        assert_eq!((fb.width, fb.height), (3, 2));
        assert_eq!(fb.pixels, vec![0, 0x00FF_8000, 0x00FF_8000, 0, 0x00FF_8000, 0x00FF_8000]);
    }

    #[test]
    fn test_draw_image_far_offscreen() {
        let mut canvas = Canvas::new(4, 4);
        let stamp = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 255]));
        canvas.draw_image(&stamp, i64::MAX, i64::MAX);
        canvas.draw_image(&stamp, i64::MIN, 0);
        canvas.fill_rect(i64::MAX - 1, 0, 10, 10, Rgb([255, 0, 0]), 1.0);
        assert!(canvas.image().pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_write_pixels_rejects_wrong_size() {
        let mut canvas = Canvas::new(3, 2);
        assert!(matches!(
            canvas.write_pixels(RgbaImage::new(2, 2)),
            Err(Error::BufferSize { .. })
        ));
        assert!(canvas.write_pixels(RgbaImage::new(3, 2)).is_ok());
        assert_eq!(canvas.create_image(0).dimensions(), (1, 1));
    }
}
