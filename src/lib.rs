//! Freehand mask painting over an image, for inpainting.
//!
//! Load an image into a [`MaskCanvas`], feed it pointer strokes in display
//! coordinates, then [`MaskCanvas::export_mask`] a PNG where painted pixels
//! are opaque white and everything else opaque black, at exactly the source
//! image's dimensions. [`InpaintRequest`] pairs that mask with the original
//! upload and an edit instruction for the external service.

pub mod canvas;
pub mod config;
pub mod error;
pub mod mask;
mod preview;
pub mod raster;
pub mod request;
pub mod types;

pub use canvas::MaskCanvas;
pub use config::{CanvasConfig, SourceLimits};
pub use error::{Error, Result};
pub use mask::MaskImage;
pub use request::InpaintRequest;
pub use types::{BrushSize, FrameBuffer, Point, StrokeLayer, Viewport};
