// Core types shared by the canvas, the rasterizer and the window.

use image::{Rgba, RgbaImage};

/// A pointer position. Depending on where it came from this is either
/// display space (window pixels) or buffer space (source image pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Brush diameter in buffer pixels, always inside [`BrushSize::MIN`, `BrushSize::MAX`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BrushSize(u32);

impl BrushSize {
    pub const MIN: u32 = 5;
    pub const MAX: u32 = 150;
    pub const DEFAULT: u32 = 40;

    /// Out-of-range values are clamped, never rejected.
    pub fn new(px: u32) -> Self {
        Self(px.clamp(Self::MIN, Self::MAX))
    }

    pub fn diameter(self) -> u32 {
        self.0
    }

    pub fn radius(self) -> f32 {
        self.0 as f32 / 2.0
    }

    /// Step by `delta` pixels, staying clamped.
    pub fn step(self, delta: i32) -> Self {
        Self::new((self.0 as i64 + delta as i64).max(0) as u32)
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// On-screen size of the element showing the canvas.
///
/// Pointer events arrive in this space; they are rescaled by
/// (buffer / display) per axis before anything is rasterized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub display_width: u32,
    pub display_height: u32,
}

impl Viewport {
    pub fn new(display_width: u32, display_height: u32) -> Self {
        Self { display_width, display_height }
    }

    /// Map a display-space point into a `buffer_width` x `buffer_height` buffer.
    pub fn to_buffer(&self, p: Point, buffer_width: u32, buffer_height: u32) -> Point {
        let sx = buffer_width as f32 / self.display_width as f32;
        let sy = buffer_height as f32 / self.display_height as f32;
        Point::new(p.x * sx, p.y * sy)
    }
}

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // window width in pixels
    pub height: usize,     // window height in pixels
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Pack an RGBA image into 0x00RRGGBB pixels (alpha dropped).
    pub fn from_rgba(img: &RgbaImage) -> Self {
        let pixels = img
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect();
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            pixels,
        }
    }
}

/// Transparent W×H raster accumulating brush marks.
///
/// Only the alpha channel carries meaning: a pixel is *covered* iff its
/// alpha is non-zero. The RGB tint is a rendering aid for the preview.
#[derive(Clone, Debug)]
pub struct StrokeLayer {
    pixels: RgbaImage,
    tint: Rgba<u8>,
}

impl StrokeLayer {
    /// A fully transparent layer. A tint with zero alpha would make marks
    /// invisible to coverage, so its alpha is raised to at least 1.
    pub fn new(width: u32, height: u32, tint: Rgba<u8>) -> Self {
        let mut tint = tint;
        tint[3] = tint[3].max(1);
        Self {
            pixels: RgbaImage::new(width, height),
            tint,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Paint one in-bounds pixel with the tint.
    #[inline]
    pub(crate) fn mark(&mut self, x: u32, y: u32) {
        self.pixels.put_pixel(x, y, self.tint);
    }

    #[inline]
    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        self.pixels.get_pixel(x, y)[3] != 0
    }

    /// Reset every pixel to fully transparent.
    pub fn clear(&mut self) {
        for p in self.pixels.pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brush_size_clamps() {
        assert_eq!(BrushSize::new(0).diameter(), 5);
        assert_eq!(BrushSize::new(4).diameter(), 5);
        assert_eq!(BrushSize::new(77).diameter(), 77);
        assert_eq!(BrushSize::new(151).diameter(), 150);
        assert_eq!(BrushSize::new(u32::MAX).diameter(), 150);
        assert_eq!(BrushSize::default().diameter(), 40);
    }

    #[test]
    fn brush_size_steps_stay_in_range() {
        assert_eq!(BrushSize::new(5).step(-10).diameter(), 5);
        assert_eq!(BrushSize::new(148).step(5).diameter(), 150);
        assert_eq!(BrushSize::new(40).step(5).diameter(), 45);
    }

    #[test]
    fn viewport_rescales_each_axis() {
        let vp = Viewport::new(200, 150);
        let p = vp.to_buffer(Point::new(50.0, 30.0), 400, 300);
        assert_eq!(p, Point::new(100.0, 60.0));

        let same = Viewport::new(400, 300).to_buffer(Point::new(50.0, 30.0), 400, 300);
        assert_eq!(same, Point::new(50.0, 30.0));
    }

    #[test]
    fn stroke_layer_starts_transparent_and_clears() {
        let mut layer = StrokeLayer::new(4, 3, Rgba([255, 255, 255, 128]));
        assert!(!layer.is_covered(0, 0));
        layer.mark(2, 1);
        assert!(layer.is_covered(2, 1));
        layer.clear();
        assert!(layer.as_image().pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn zero_alpha_tint_still_marks_coverage() {
        let mut layer = StrokeLayer::new(2, 2, Rgba([255, 0, 0, 0]));
        layer.mark(1, 1);
        assert!(layer.is_covered(1, 1));
    }

    #[test]
    fn framebuffer_packs_rgb() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([0x12, 0x34, 0x56, 0x00]));
        let fb = FrameBuffer::from_rgba(&img);
        assert_eq!((fb.width, fb.height), (2, 1));
        assert_eq!(fb.pixels, vec![0x00_12_34_56; 2]);
    }
}
