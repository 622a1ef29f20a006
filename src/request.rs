//! The hand-off to the external inpainting service.
//!
//! An [`InpaintRequest`] bundles the original upload, the binary mask and
//! the user's instruction. Building one is where the "painted nothing" check
//! lives: the canvas happily exports an all-black mask, but sending it would
//! ask the service for no edit at all.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::canvas::MaskCanvas;
use crate::error::{Error, Result};
use crate::mask::MaskImage;

#[derive(Clone, Debug)]
pub struct InpaintRequest {
    original: Vec<u8>,
    mask: MaskImage,
    instruction: String,
}

impl InpaintRequest {
    /// Fails with [`Error::EmptyMask`] if the mask covers nothing and with
    /// [`Error::EmptyPrompt`] if the instruction is blank.
    pub fn new(original: Vec<u8>, mask: MaskImage, instruction: impl Into<String>) -> Result<Self> {
        if original.is_empty() {
            return Err(Error::EmptySource);
        }
        let instruction = instruction.into().trim().to_owned();
        if instruction.is_empty() {
            return Err(Error::EmptyPrompt);
        }
        if mask.is_blank() {
            return Err(Error::EmptyMask);
        }
        Ok(Self {
            original,
            mask,
            instruction,
        })
    }

    /// Export the canvas mask and pair it with `original`, the bytes the
    /// canvas was loaded from.
    pub fn from_canvas(
        canvas: &MaskCanvas,
        original: Vec<u8>,
        instruction: impl Into<String>,
    ) -> Result<Self> {
        Self::new(original, canvas.export_mask()?, instruction)
    }

    pub fn original(&self) -> &[u8] {
        &self.original
    }

    pub fn mask(&self) -> &MaskImage {
        &self.mask
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Write `original.<ext>`, `mask.png` and `prompt.txt` into `dir`,
    /// creating it if needed. Returns the written paths in that order.
    pub fn write_to_dir(&self, dir: &Path) -> Result<[PathBuf; 3]> {
        fs::create_dir_all(dir)?;
        let ext = image::guess_format(&self.original)
            .ok()
            .and_then(|f| f.extensions_str().first().copied())
            .unwrap_or("bin");

        let original = dir.join(format!("original.{ext}"));
        let mask = dir.join("mask.png");
        let prompt = dir.join("prompt.txt");
        fs::write(&original, &self.original)?;
        fs::write(&mask, self.mask.as_bytes())?;
        fs::write(&prompt, &self.instruction)?;
        info!(dir = %dir.display(), covered = self.mask.covered_pixels(), "wrote inpaint request");
        Ok([original, mask, prompt])
    }
}
