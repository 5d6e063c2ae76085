// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Encode/decode pipeline.
//!
//! Encode: capacity precheck → salt + PBKDF2 key → AES-CBC encrypt →
//! frame → capacity guard → LSB embed.
//! Decode mirrors it: staged LSB extract → unframe → PBKDF2 key → decrypt.
//!
//! Each call builds its own salt, key and IV. Nothing is cached between
//! calls, so independent carriers can be processed on separate threads.

use log::{debug, warn};

use crate::stego::capacity::check_capacity;
use crate::stego::crypto;
use crate::stego::error::StegoError;
use crate::stego::frame;
use crate::stego::lsb;
use crate::stego::{Framing, StegoConfig};

/// Hide `message` in `pixels` using the default configuration.
///
/// `pixels` is the flattened sample buffer of a losslessly stored image.
/// On success its low bits carry the payload; on error it is unchanged.
///
/// # Errors
/// - [`StegoError::MessageTooLarge`] if the payload does not fit.
pub fn encode(pixels: &mut [u8], message: &str, password: &[u8]) -> Result<(), StegoError> {
    encode_with(pixels, message, password, &StegoConfig::default())
}

/// Hide `message` in `pixels` using an explicit configuration.
///
/// # Errors
/// - [`StegoError::MessageTooLarge`] if the payload does not fit.
/// - [`StegoError::InvalidIterations`] if `config.iterations` is 0.
pub fn encode_with(
    pixels: &mut [u8],
    message: &str,
    password: &[u8],
    config: &StegoConfig,
) -> Result<(), StegoError> {
    // The frame size depends only on the message length, so reject
    // oversized messages before paying for key derivation.
    let expected_len = frame::payload_len(message.len(), config.framing);
    check_capacity(pixels.len(), expected_len)?;

    if config.framing == Framing::Legacy {
        warn!("encoding without length prefix; extraction will read the whole carrier");
    }

    let salt = crypto::generate_salt();
    let key = crypto::derive_key(password, &salt, config.iterations)?;
    let (iv, ciphertext) = crypto::encrypt(&key, message.as_bytes());
    drop(key);

    let payload = frame::pack(&salt, &iv, &ciphertext, config.framing)?;
    debug!(
        "payload {} bytes ({:?}), carrier {} samples",
        payload.len(),
        config.framing,
        pixels.len()
    );

    lsb::embed(pixels, &payload)
}

/// Recover a message from `pixels` using the default configuration.
///
/// # Errors
/// - [`StegoError::FrameCorrupted`] if no complete payload can be read.
/// - [`StegoError::DecryptionFailed`] if the password is wrong or the data
///   is corrupted.
pub fn decode(pixels: &[u8], password: &[u8]) -> Result<String, StegoError> {
    decode_with(pixels, password, &StegoConfig::default())
}

/// Recover a message from `pixels` using an explicit configuration.
///
/// # Errors
/// - [`StegoError::FrameCorrupted`] if no complete payload can be read.
/// - [`StegoError::DecryptionFailed`] if the password is wrong or the data
///   is corrupted.
/// - [`StegoError::InvalidIterations`] if `config.iterations` is 0.
pub fn decode_with(
    pixels: &[u8],
    password: &[u8],
    config: &StegoConfig,
) -> Result<String, StegoError> {
    let raw = lsb::extract_payload(pixels, config.framing)?;
    let parsed = frame::unpack(&raw, config.framing)?;
    debug!("extracted frame with {} ciphertext bytes", parsed.ciphertext.len());

    let key = crypto::derive_key(password, &parsed.salt, config.iterations)?;
    crypto::decrypt(&key, &parsed.iv, &parsed.ciphertext)
}
