// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The uploaded bytes are not a decodable raster image.
    #[error("Decode error: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Source is empty (0 bytes)")]
    EmptySource,

    #[error("Source is {bytes} bytes, limit is {max}")]
    SourceTooLarge { bytes: u64, max: u64 },

    #[error("Source dimensions {width}x{height} exceed the configured limits")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// Export/preview called before any source image was loaded.
    #[error("No source image loaded")]
    NoSource,

    #[error("Mask encode error: {0}")]
    Encode(#[source] image::ImageError),

    /// The mask covers no pixels; sending it would request "no edit".
    #[error("Mask is empty: paint the region to edit first")]
    EmptyMask,

    #[error("Edit instruction is empty")]
    EmptyPrompt,

    #[error("Window error: {0}")]
    Window(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
