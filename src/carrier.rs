// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Image file carrier.
//!
//! Loads an image into the flat sample buffer the pipeline works on and
//! writes it back. Samples are row-major, three per pixel in B, G, R order;
//! alpha is dropped. Output is restricted to lossless formats because any
//! lossy re-encode scrambles the low bits.

use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use log::debug;

use crate::stego::{self, StegoConfig, StegoError};

/// Channels stored per pixel.
pub const CHANNELS: usize = 3;

/// A decoded image owning its sample buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierImage {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl CarrierImage {
    /// Decode an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StegoError> {
        let img = image::open(path.as_ref())?;
        Ok(Self::from_dynamic(&img))
    }

    /// Flatten an in-memory image.
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let mut samples = rgb.into_raw();
        for px in samples.chunks_exact_mut(CHANNELS) {
            px.swap(0, 2);
        }
        Self { width, height, samples }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flat B, G, R sample buffer.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Mutable view of the samples. The length is fixed by the image size.
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Rebuild an RGB image from the samples.
    pub fn to_rgb_image(&self) -> RgbImage {
        let width = self.width as usize;
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let i = (y as usize * width + x as usize) * CHANNELS;
            Rgb([self.samples[i + 2], self.samples[i + 1], self.samples[i]])
        })
    }

    /// Write the image, choosing the format from the file extension.
    ///
    /// # Errors
    /// - [`StegoError::LossyFormat`] for JPEG, WebP and other lossy targets.
    /// - [`StegoError::Image`] if the extension is unknown or writing fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StegoError> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        if !is_lossless(format) {
            return Err(StegoError::LossyFormat);
        }
        self.to_rgb_image().save_with_format(path, format)?;
        Ok(())
    }
}

fn is_lossless(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Tiff)
}

/// Load `input`, hide `message`, and write the result to `output`.
///
/// `output` must name a lossless format; this is checked before the
/// image is read so a bad target never costs a key derivation.
pub fn encode_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    message: &str,
    password: &[u8],
    config: &StegoConfig,
) -> Result<(), StegoError> {
    let output = output.as_ref();
    if !is_lossless(ImageFormat::from_path(output)?) {
        return Err(StegoError::LossyFormat);
    }

    let mut carrier = CarrierImage::open(input)?;
    debug!("carrier {}x{} loaded", carrier.width, carrier.height);
    stego::encode_with(carrier.samples_mut(), message, password, config)?;
    carrier.save(output)
}

/// Load `path` and recover the hidden message.
pub fn decode_file(
    path: impl AsRef<Path>,
    password: &[u8],
    config: &StegoConfig,
) -> Result<String, StegoError> {
    let carrier = CarrierImage::open(path)?;
    stego::decode_with(carrier.samples(), password, config)
}
