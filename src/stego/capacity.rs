// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Carrier capacity checks.
//!
//! Every sample holds exactly one payload bit, so a carrier of `n` samples
//! takes at most `n / 8` payload bytes. The guard must pass before the
//! embedder writes anything.

use crate::stego::crypto::BLOCK_LEN;
use crate::stego::error::StegoError;
use crate::stego::frame::{prefix_len, HEADER_LEN};
use crate::stego::Framing;

/// Verify that `payload_len` bytes fit into `sample_count` samples.
///
/// # Errors
/// [`StegoError::MessageTooLarge`] if `payload_len * 8 > sample_count`.
pub fn check_capacity(sample_count: usize, payload_len: usize) -> Result<(), StegoError> {
    let needed_bits = (payload_len as u64).saturating_mul(8);
    let available_bits = sample_count as u64;
    if needed_bits > available_bits {
        return Err(StegoError::MessageTooLarge { needed_bits, available_bits });
    }
    Ok(())
}

/// Longest UTF-8 message (in bytes) that fits into `sample_count` samples.
///
/// Returns `None` when even an empty message does not fit.
pub fn max_message_len(sample_count: usize, framing: Framing) -> Option<usize> {
    let max_payload = sample_count / 8;
    let overhead = prefix_len(framing) + HEADER_LEN;
    let ciphertext_room = max_payload.checked_sub(overhead)?;
    // PKCS#7 adds at least one byte, so a full block of room holds 15 bytes.
    let blocks = ciphertext_room / BLOCK_LEN;
    (blocks * BLOCK_LEN).checked_sub(1)
}
