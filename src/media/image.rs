// SPDX-License-Identifier: MPL-2.0
//! Image decoding for still images and eagerly decoded animations.

use crate::error::{Error, Result};
use image_rs::codecs::gif::GifDecoder;
use image_rs::{AnimationDecoder, GenericImageView, ImageDecoder};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

/// A decoded RGBA raster ready to be handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// RGBA bytes, shared so snapshots can be cloned cheaply.
    rgba_bytes: Arc<Vec<u8>>,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba_bytes: Arc::new(pixels),
        }
    }

    /// Returns a reference to the RGBA bytes.
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }
}

/// Every frame of an animated image, decoded up front.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationData {
    pub width: u32,
    pub height: u32,
    frames: Vec<ImageData>,
}

impl AnimationData {
    #[must_use]
    pub fn new(width: u32, height: u32, frames: Vec<ImageData>) -> Self {
        Self {
            width,
            height,
            frames,
        }
    }

    /// Number of decoded frames. May be zero for a degenerate file.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&ImageData> {
        self.frames.get(index)
    }
}

/// Load a still image from the given path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and
/// [`Error::MediaDecode`] if its content cannot be decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageData> {
    let img_bytes = fs::read(path.as_ref())?;
    let img = image_rs::load_from_memory(&img_bytes)
        .map_err(|e| Error::MediaDecode(e.to_string()))?;

    let (width, height) = img.dimensions();
    let pixels = img.to_rgba8().into_vec();

    Ok(ImageData::from_rgba(width, height, pixels))
}

/// Decode the full frame sequence of an animated GIF into memory.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened and
/// [`Error::MediaDecode`] if the header or any frame is corrupt.
pub fn load_animation<P: AsRef<Path>>(path: P) -> Result<AnimationData> {
    let file = File::open(path.as_ref())?;
    let decoder = GifDecoder::new(BufReader::new(file))
        .map_err(|e| Error::MediaDecode(e.to_string()))?;
    let (width, height) = decoder.dimensions();

    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| Error::MediaDecode(e.to_string()))?
        .into_iter()
        .map(|frame| {
            let buffer = frame.into_buffer();
            ImageData::from_rgba(buffer.width(), buffer.height(), buffer.into_vec())
        })
        .collect();

    Ok(AnimationData::new(width, height, frames))
}
