// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] is a closed taxonomy: callers branch on the variant, never
//! on the message text. Wrong passwords and corrupted ciphertext share one
//! variant so a decoder never reveals which check rejected the input.

use core::fmt;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug)]
pub enum StegoError {
    /// The payload needs more sample bits than the carrier provides.
    /// Raised before any sample is modified.
    MessageTooLarge {
        /// Bits the framed payload would occupy.
        needed_bits: u64,
        /// Bits the carrier can hold (one per sample).
        available_bits: u64,
    },
    /// The extracted payload is truncated or malformed.
    FrameCorrupted,
    /// Wrong password or corrupted data.
    DecryptionFailed,
    /// Key derivation was asked to run zero iterations.
    InvalidIterations,
    /// The carrier image file could not be decoded or written.
    #[cfg(feature = "image-io")]
    Image(image::ImageError),
    /// The requested output format is lossy and would destroy the payload.
    #[cfg(feature = "image-io")]
    LossyFormat,
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MessageTooLarge { needed_bits, available_bits } => write!(
                f,
                "message too large for this image ({needed_bits} bits needed, {available_bits} available)"
            ),
            Self::FrameCorrupted => write!(f, "corrupted image or truncated data"),
            Self::DecryptionFailed => write!(f, "decryption failed: wrong password or corrupted data"),
            Self::InvalidIterations => write!(f, "key derivation iteration count must be non-zero"),
            #[cfg(feature = "image-io")]
            Self::Image(e) => write!(f, "image error: {e}"),
            #[cfg(feature = "image-io")]
            Self::LossyFormat => write!(f, "carrier must be saved in a lossless format"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "image-io")]
            Self::Image(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "image-io")]
impl From<image::ImageError> for StegoError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}
