//! Canvas configuration and upload limits.
//!
//! [`SourceLimits`] caps what [`crate::MaskCanvas::load_source`] accepts.
//! The `check_*` methods run before any pixel is decoded.

use image::Rgba;

use crate::error::{Error, Result};
use crate::types::BrushSize;

/// Limits applied to uploaded source images. `None` means no limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceLimits {
    /// Maximum encoded upload size in bytes.
    pub max_file_size: Option<u64>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum total pixels (width × height).
    pub max_pixels: Option<u64>,
}

impl SourceLimits {
    /// No limits.
    pub fn none() -> Self {
        Self::default()
    }

    /// Limits suited to interactive uploads: 20 MiB, 8192 px per side.
    pub fn upload() -> Self {
        Self::none()
            .with_max_file_size(20 * 1024 * 1024)
            .with_max_width(8192)
            .with_max_height(8192)
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    pub fn with_max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_max_height(mut self, height: u32) -> Self {
        self.max_height = Some(height);
        self
    }

    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = Some(pixels);
        self
    }

    pub fn check_file_size(&self, bytes: u64) -> Result<()> {
        if bytes == 0 {
            return Err(Error::EmptySource);
        }
        match self.max_file_size {
            Some(max) if bytes > max => Err(Error::SourceTooLarge { bytes, max }),
            _ => Ok(()),
        }
    }

    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<()> {
        let too_wide = self.max_width.is_some_and(|m| width > m);
        let too_tall = self.max_height.is_some_and(|m| height > m);
        let too_many = self
            .max_pixels
            .is_some_and(|m| width as u64 * height as u64 > m);
        if too_wide || too_tall || too_many {
            return Err(Error::DimensionsTooLarge { width, height });
        }
        Ok(())
    }
}

/// Settings for a [`crate::MaskCanvas`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasConfig {
    /// Brush diameter a fresh canvas starts with.
    pub brush: BrushSize,
    /// Colour strokes are drawn with in the preview. Only its presence
    /// matters to the mask, never its value.
    pub stroke_tint: Rgba<u8>,
    pub limits: SourceLimits,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            brush: BrushSize::default(),
            stroke_tint: Rgba([255, 255, 255, 128]),
            limits: SourceLimits::none(),
        }
    }
}

impl CanvasConfig {
    pub fn with_brush(mut self, px: u32) -> Self {
        self.brush = BrushSize::new(px);
        self
    }

    pub fn with_stroke_tint(mut self, tint: Rgba<u8>) -> Self {
        self.stroke_tint = tint;
        self
    }

    pub fn with_limits(mut self, limits: SourceLimits) -> Self {
        self.limits = limits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_limits_accepts_anything_non_empty() {
        let l = SourceLimits::none();
        assert!(l.check_file_size(u64::MAX).is_ok());
        assert!(l.check_dimensions(100_000, 100_000).is_ok());
        assert!(matches!(l.check_file_size(0), Err(Error::EmptySource)));
    }

    #[test]
    fn file_size_limit() {
        let l = SourceLimits::none().with_max_file_size(10);
        assert!(l.check_file_size(10).is_ok());
        assert!(matches!(
            l.check_file_size(11),
            Err(Error::SourceTooLarge { bytes: 11, max: 10 })
        ));
    }

    #[test]
    fn dimension_limits() {
        let l = SourceLimits::none()
            .with_max_width(100)
            .with_max_height(50)
            .with_max_pixels(4000);
        assert!(l.check_dimensions(80, 50).is_ok());
        assert!(l.check_dimensions(101, 10).is_err());
        assert!(l.check_dimensions(10, 51).is_err());
        assert!(l.check_dimensions(100, 41).is_err());
    }

    #[test]
    fn config_builder_clamps_brush() {
        let c = CanvasConfig::default().with_brush(1000);
        assert_eq!(c.brush.diameter(), 150);
        assert_eq!(CanvasConfig::default().brush.diameter(), 40);
        assert_eq!(CanvasConfig::default().limits, SourceLimits::none());
    }
}
