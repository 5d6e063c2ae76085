// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! LSB embedding and extraction over a flat sample buffer.
//!
//! Bit `i` of the payload (MSB of byte 0 first) replaces the low bit of
//! sample `i`. Samples past `8 * payload.len()` are never touched. The
//! overwritten low bits are lost; the scheme does not survive lossy
//! re-encoding or resampling of the carrier.

use log::debug;

use crate::stego::capacity::check_capacity;
use crate::stego::error::StegoError;
use crate::stego::frame::{self, LENGTH_PREFIX_LEN};
use crate::stego::Framing;

/// Write `payload` into the low bits of `pixels`.
///
/// Capacity is checked before the first write, so on error `pixels` is
/// unchanged.
///
/// # Errors
/// [`StegoError::MessageTooLarge`] if `8 * payload.len() > pixels.len()`.
pub fn embed(pixels: &mut [u8], payload: &[u8]) -> Result<(), StegoError> {
    check_capacity(pixels.len(), payload.len())?;

    for (samples, &byte) in pixels.chunks_exact_mut(8).zip(payload) {
        for (k, sample) in samples.iter_mut().enumerate() {
            let bit = (byte >> (7 - k)) & 1;
            *sample = (*sample & 0xFE) | bit;
        }
    }
    debug!("embedded {} payload bytes into {} samples", payload.len(), pixels.len());
    Ok(())
}

/// Read the low bit of the first `bit_count` samples.
///
/// # Errors
/// [`StegoError::FrameCorrupted`] if the carrier has fewer than `bit_count`
/// samples.
pub fn extract_bits(pixels: &[u8], bit_count: usize) -> Result<Vec<u8>, StegoError> {
    let samples = pixels.get(..bit_count).ok_or(StegoError::FrameCorrupted)?;
    Ok(samples.iter().map(|s| s & 1).collect())
}

/// Pull a complete payload frame out of the carrier.
///
/// With [`Framing::LengthPrefixed`] extraction is staged: 32 bits for the
/// declared length, then exactly that many body bytes. Nothing past the
/// declared end is read. The returned buffer includes the prefix, ready
/// for [`frame::unpack`].
///
/// With [`Framing::Legacy`] every whole byte the carrier holds is returned.
pub fn extract_payload(pixels: &[u8], framing: Framing) -> Result<Vec<u8>, StegoError> {
    match framing {
        Framing::LengthPrefixed => {
            let prefix_bits = LENGTH_PREFIX_LEN * 8;
            let mut payload = bits_to_bytes(&extract_bits(pixels, prefix_bits)?);
            let declared = frame::read_length_prefix(&payload)?;

            let body_bits = declared.checked_mul(8).ok_or(StegoError::FrameCorrupted)?;
            let available = pixels.len() - prefix_bits;
            if body_bits > available {
                debug!("declared payload of {declared} bytes exceeds carrier ({available} bits left)");
                return Err(StegoError::FrameCorrupted);
            }
            let body = extract_bits(&pixels[prefix_bits..], body_bits)?;
            payload.extend(bits_to_bytes(&body));
            Ok(payload)
        }
        Framing::Legacy => {
            let bit_count = pixels.len() / 8 * 8;
            Ok(bits_to_bytes(&extract_bits(pixels, bit_count)?))
        }
    }
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Convert a bit vector (MSB first) back to bytes.
/// Pads the last byte with zero bits if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bits.len().div_ceil(8));
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << (7 - i);
        }
        bytes.push(byte);
    }
    bytes
}
