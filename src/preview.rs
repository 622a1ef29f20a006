// On-screen preview: the source image with the tinted stroke layer on top,
// scaled to the display size the canvas is shown at.
// Visual: painted regions appear as a milky white veil over the photo.

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::canvas::MaskCanvas;
use crate::error::{Error, Result};
use crate::types::FrameBuffer;

impl MaskCanvas {
    /// Composite at buffer resolution (source size).
    pub fn composite(&self) -> Result<RgbaImage> {
        let (Some(display), Some(strokes)) = (self.display_layer(), self.stroke_layer()) else {
            return Err(Error::NoSource);
        };
        let mut out = display.clone();
        imageops::overlay(&mut out, strokes.as_image(), 0, 0);
        Ok(out)
    }

    /// Composite resized to the current display size.
    pub fn preview(&self) -> Result<RgbaImage> {
        let out = self.composite()?;
        let vp = self.viewport().ok_or(Error::NoSource)?;
        if (vp.display_width, vp.display_height) == out.dimensions() {
            return Ok(out);
        }
        Ok(imageops::resize(
            &out,
            vp.display_width,
            vp.display_height,
            FilterType::Triangle,
        ))
    }

    /// [`Self::preview`] packed for the window.
    pub fn preview_frame(&self) -> Result<FrameBuffer> {
        Ok(FrameBuffer::from_rgba(&self.preview()?))
    }
}
