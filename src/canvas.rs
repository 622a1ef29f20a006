//! The mask canvas engine.
//!
//! [`MaskCanvas`] owns the source image, the read-only display layer made
//! from it, and the stroke layer that pointer input paints into. Pointer
//! coordinates arrive in display space and are rescaled into buffer space
//! on every call, so the exported mask is aligned pixel-for-pixel with the
//! source no matter how large the canvas is shown on screen.
//!
//! Everything runs synchronously on the caller's thread; a single stamp or
//! segment costs time proportional to the brush area, not the image.

use std::io::Cursor;

use image::{DynamicImage, ImageReader, RgbaImage};
use tracing::{debug, trace, warn};

use crate::config::CanvasConfig;
use crate::error::{Error, Result};
use crate::mask::{self, MaskImage};
use crate::raster;
use crate::types::{BrushSize, Point, StrokeLayer, Viewport};

/// Layers that live exactly as long as one loaded source image.
struct Session {
    source: DynamicImage,
    display: RgbaImage,
    strokes: StrokeLayer,
    viewport: Viewport,
}

impl Session {
    fn to_buffer(&self, p: Point) -> Point {
        self.viewport
            .to_buffer(p, self.strokes.width(), self.strokes.height())
    }
}

/// The stroke in progress, between `begin_stroke` and `end_stroke`.
#[derive(Clone, Copy, Debug)]
struct ActiveStroke {
    /// Brush diameter captured when the stroke began.
    brush: BrushSize,
    /// Last buffer-space sample, the start of the next segment.
    last: Option<Point>,
}

pub struct MaskCanvas {
    config: CanvasConfig,
    brush: BrushSize,
    session: Option<Session>,
    stroke: Option<ActiveStroke>,
}

impl Default for MaskCanvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl MaskCanvas {
    /// An empty canvas; nothing can be painted until a source is loaded.
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            brush: config.brush,
            session: None,
            stroke: None,
        }
    }

    /// Shorthand for a default canvas with `bytes` already loaded.
    pub fn with_source(bytes: &[u8]) -> Result<Self> {
        let mut canvas = Self::default();
        canvas.load_source(bytes)?;
        Ok(canvas)
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Decode `bytes` and start a fresh session on it: empty stroke layer of
    /// the same size, display size reset to the buffer size.
    ///
    /// On any error the previous session (if any) is left untouched.
    pub fn load_source(&mut self, bytes: &[u8]) -> Result<()> {
        let limits = &self.config.limits;
        limits.check_file_size(bytes.len() as u64)?;

        // Parse-time rejection: read the header before decoding any pixels.
        let (w, h) = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .into_dimensions()
            .map_err(Error::Decode)?;
        limits.check_dimensions(w, h)?;

        let source = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .decode()
            .map_err(Error::Decode)?;

        let (width, height) = (source.width(), source.height());
        let display = source.to_rgba8();
        self.session = Some(Session {
            source,
            display,
            strokes: StrokeLayer::new(width, height, self.config.stroke_tint),
            viewport: Viewport::new(width, height),
        });
        self.stroke = None;
        debug!(width, height, bytes = bytes.len(), "loaded source image");
        Ok(())
    }

    /// Start over: release every layer and forget any stroke in progress.
    pub fn unload(&mut self) {
        if self.session.take().is_some() {
            debug!("unloaded source image");
        }
        self.stroke = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    /// Buffer dimensions (the source image's), if loaded.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.session
            .as_ref()
            .map(|s| (s.strokes.width(), s.strokes.height()))
    }

    pub fn source(&self) -> Option<&DynamicImage> {
        self.session.as_ref().map(|s| &s.source)
    }

    /// The source pixels as RGBA, drawn beneath the stroke layer.
    pub fn display_layer(&self) -> Option<&RgbaImage> {
        self.session.as_ref().map(|s| &s.display)
    }

    pub fn stroke_layer(&self) -> Option<&StrokeLayer> {
        self.session.as_ref().map(|s| &s.strokes)
    }

    /// Current display element size, used to rescale incoming points.
    pub fn viewport(&self) -> Option<Viewport> {
        self.session.as_ref().map(|s| s.viewport)
    }

    /// Record the on-screen size of the canvas element. Zero sizes are ignored.
    pub fn set_display_size(&mut self, width: u32, height: u32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if width == 0 || height == 0 {
            warn!(width, height, "ignoring zero display size");
            return;
        }
        session.viewport = Viewport::new(width, height);
    }

    pub fn brush_size(&self) -> BrushSize {
        self.brush
    }

    /// Set the brush diameter, clamped to [5, 150]. A stroke already in
    /// progress keeps the diameter it started with.
    pub fn set_brush_size(&mut self, px: u32) -> BrushSize {
        self.brush = BrushSize::new(px);
        self.brush
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    /// Start a stroke at display-space `point` and stamp a dot there.
    /// Any previous stroke's last point is discarded, so strokes never bridge.
    pub fn begin_stroke(&mut self, point: Point) {
        let Some(session) = self.session.as_mut() else {
            trace!("begin_stroke without a source image");
            return;
        };
        let brush = self.brush;
        let p = session.to_buffer(point);
        raster::stamp_disk(&mut session.strokes, p, brush.radius());
        trace!(x = p.x, y = p.y, diameter = brush.diameter(), "begin stroke");
        self.stroke = Some(ActiveStroke {
            brush,
            last: Some(p),
        });
    }

    /// Continue the active stroke to display-space `point`: a segment from
    /// the last sample plus a dot at the new one. No-op without a stroke.
    pub fn extend_stroke(&mut self, point: Point) {
        let (Some(session), Some(stroke)) = (self.session.as_mut(), self.stroke.as_mut()) else {
            return;
        };
        let p = session.to_buffer(point);
        let radius = stroke.brush.radius();
        if let Some(last) = stroke.last {
            raster::stamp_capsule(&mut session.strokes, last, p, radius);
        }
        raster::stamp_disk(&mut session.strokes, p, radius);
        stroke.last = Some(p);
    }

    /// Finish the active stroke. Idempotent.
    pub fn end_stroke(&mut self) {
        self.stroke = None;
    }

    /// Reset the stroke layer to fully transparent. Not undoable.
    pub fn clear_mask(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.strokes.clear();
            debug!("cleared mask");
        }
    }

    /// Number of stroke-layer pixels painted so far (0 when unloaded).
    pub fn covered_pixels(&self) -> u64 {
        self.session
            .as_ref()
            .map_or(0, |s| mask::covered_pixels(&s.strokes))
    }

    pub fn has_coverage(&self) -> bool {
        self.covered_pixels() > 0
    }

    /// The binary mask as an RGBA buffer, before encoding.
    pub fn mask_image(&self) -> Result<RgbaImage> {
        let session = self.session.as_ref().ok_or(Error::NoSource)?;
        Ok(mask::binarize(&session.strokes))
    }

    /// Derive the binary mask from the current stroke layer and encode it as
    /// PNG. An unpainted canvas yields a valid all-black mask, not an error.
    pub fn export_mask(&self) -> Result<MaskImage> {
        let session = self.session.as_ref().ok_or(Error::NoSource)?;
        mask::export(&session.strokes)
    }
}
