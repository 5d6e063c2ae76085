// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # pixelcrypt-core
//!
//! Hides a password-encrypted text message in the least-significant bits of
//! a raw pixel buffer, and recovers it with the same password.
//!
//! The message is encrypted with AES-256-CBC under a key derived by
//! PBKDF2-HMAC-SHA1 (100,000 rounds, random 16-byte salt), framed as
//! `[u32 BE length][salt][iv][ciphertext]`, and written one bit per sample,
//! most significant bit first.
//!
//! The `stego` module works on `&[u8]` / `&mut [u8]` only. The optional
//! `carrier` module (feature `image-io`, on by default) loads and saves
//! image files around it.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use pixelcrypt_core::{encode, decode};
//!
//! let mut pixels = vec![0u8; 1_000_000];
//! encode(&mut pixels, "hello world", b"correct-horse").unwrap();
//! assert_eq!(decode(&pixels, b"correct-horse").unwrap(), "hello world");
//! ```
//!
//! CBC provides confidentiality only. A wrong password is detected through
//! padding and UTF-8 validity, which is a probabilistic signal, not an
//! authentication tag.

pub mod stego;
#[cfg(feature = "image-io")]
pub mod carrier;

pub use stego::{decode, decode_with, encode, encode_with, max_message_len};
pub use stego::{Framing, StegoConfig, StegoError};
pub use stego::crypto::{derive_key, DEFAULT_ITERATIONS};
#[cfg(feature = "image-io")]
pub use carrier::{decode_file, encode_file, CarrierImage};
