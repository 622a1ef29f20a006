//! Mask derivation: stroke-layer coverage thresholded to a strict
//! black/white image and encoded as PNG for the inpainting service.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::StrokeLayer;

/// Painted / "edit here".
pub const MASK_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Unpainted / "leave unchanged".
pub const MASK_BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// An encoded, binary black/white mask with the source image's dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskImage {
    width: u32,
    height: u32,
    covered: u64,
    png: Vec<u8>,
}

impl MaskImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of white pixels.
    pub fn covered_pixels(&self) -> u64 {
        self.covered
    }

    /// All black: nothing was painted.
    pub fn is_blank(&self) -> bool {
        self.covered == 0
    }

    /// PNG bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.png
    }
}

/// Threshold coverage: non-zero alpha -> opaque white, else opaque black.
/// Colour in the stroke layer is never inspected.
pub fn binarize(layer: &StrokeLayer) -> RgbaImage {
    let src = layer.as_image();
    let mut out = RgbaImage::from_pixel(src.width(), src.height(), MASK_BLACK);
    for (dst, p) in out.pixels_mut().zip(src.pixels()) {
        if p[3] != 0 {
            *dst = MASK_WHITE;
        }
    }
    out
}

/// Count covered pixels in the stroke layer.
pub fn covered_pixels(layer: &StrokeLayer) -> u64 {
    layer.as_image().pixels().filter(|p| p[3] != 0).count() as u64
}

/// Encode an RGBA buffer as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .map_err(Error::Encode)?;
    Ok(png)
}

/// Derive and encode the mask for `layer`. Recomputed on every call.
pub fn export(layer: &StrokeLayer) -> Result<MaskImage> {
    let img = binarize(layer);
    let covered = img.pixels().filter(|p| **p == MASK_WHITE).count() as u64;
    let png = encode_png(&img)?;
    debug!(
        width = img.width(),
        height = img.height(),
        covered,
        bytes = png.len(),
        "exported mask"
    );
    Ok(MaskImage {
        width: img.width(),
        height: img.height(),
        covered,
        png,
    })
}
