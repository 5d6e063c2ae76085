// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Steganographic encoding and decoding over raw pixel buffers.
//!
//! The pipeline works on a flat `[u8]` of image samples and never touches
//! files. Submodules, leaves first:
//!
//! - [`crypto`]: PBKDF2-HMAC-SHA1 key derivation and AES-256-CBC.
//! - [`frame`]: payload layout (optional length prefix, salt, IV, ciphertext).
//! - [`capacity`]: one-bit-per-sample budget checks.
//! - [`lsb`]: LSB embedding and staged extraction.

pub mod error;
pub mod crypto;
pub mod frame;
pub mod capacity;
pub mod lsb;
mod pipeline;

pub use error::StegoError;
pub use pipeline::{decode, decode_with, encode, encode_with};
pub use capacity::max_message_len;

/// Payload framing mode.
///
/// Encoder and decoder must agree on the mode; nothing in the carrier
/// records which one was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// `[u32 BE length][salt][iv][ciphertext]`. Extraction reads exactly
    /// the declared bytes, so spare carrier samples are harmless.
    #[default]
    LengthPrefixed,
    /// `[salt][iv][ciphertext]`. Extraction takes every whole byte the
    /// carrier holds as ciphertext, which only decrypts when the payload
    /// filled the carrier exactly. Read-compatibility only.
    Legacy,
}

/// Per-call settings shared by encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StegoConfig {
    /// PBKDF2 iteration count.
    pub iterations: u32,
    /// Payload framing mode.
    pub framing: Framing,
}

impl Default for StegoConfig {
    fn default() -> Self {
        Self {
            iterations: crypto::DEFAULT_ITERATIONS,
            framing: Framing::LengthPrefixed,
        }
    }
}
