// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload frame construction and parsing.
//!
//! The frame is the binary container that wraps the encrypted message before
//! it is written into pixel LSBs:
//!
//! ```text
//! [4 bytes ] body length (big-endian u32)   only with Framing::LengthPrefixed
//! [16 bytes] PBKDF2 salt
//! [16 bytes] CBC IV
//! [N bytes ] ciphertext (N a non-zero multiple of 16)
//! ```
//!
//! The length prefix counts the body only (salt + IV + ciphertext). Without
//! it the extractor cannot tell where ciphertext ends, so the unprefixed
//! layout is kept for reading older carriers and nothing else.

use crate::stego::crypto::{BLOCK_LEN, IV_LEN, SALT_LEN};
use crate::stego::error::StegoError;
use crate::stego::Framing;

/// Length prefix size in bytes.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Fixed header in front of the ciphertext: salt(16) + iv(16).
pub const HEADER_LEN: usize = SALT_LEN + IV_LEN; // 32

/// Build a payload frame from encrypted components.
pub fn pack(
    salt: &[u8; SALT_LEN],
    iv: &[u8; IV_LEN],
    ciphertext: &[u8],
    framing: Framing,
) -> Result<Vec<u8>, StegoError> {
    let body_len = HEADER_LEN + ciphertext.len();
    let mut frame = Vec::with_capacity(prefix_len(framing) + body_len);

    if framing == Framing::LengthPrefixed {
        let declared = u32::try_from(body_len).map_err(|_| StegoError::MessageTooLarge {
            needed_bits: (body_len as u64).saturating_mul(8),
            available_bits: u64::from(u32::MAX) * 8,
        })?;
        frame.extend_from_slice(&declared.to_be_bytes());
    }
    frame.extend_from_slice(salt);
    frame.extend_from_slice(iv);
    frame.extend_from_slice(ciphertext);

    Ok(frame)
}

/// Parsed payload frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFrame {
    /// PBKDF2 salt.
    pub salt: [u8; SALT_LEN],
    /// CBC initialization vector.
    pub iv: [u8; IV_LEN],
    /// Ciphertext. Not checked for block alignment here; the cipher does that.
    pub ciphertext: Vec<u8>,
}

/// Parse a payload frame.
///
/// With a length prefix, exactly the declared number of body bytes is used
/// and anything after it is ignored. Without one, everything after the
/// 32-byte header is taken as ciphertext.
///
/// Returns `Err(StegoError::FrameCorrupted)` if the prefix is missing, the
/// declared length exceeds the available bytes, or the body is shorter than
/// the 32-byte header.
pub fn unpack(data: &[u8], framing: Framing) -> Result<ParsedFrame, StegoError> {
    let body = match framing {
        Framing::LengthPrefixed => {
            let declared = read_length_prefix(data)?;
            let rest = &data[LENGTH_PREFIX_LEN..];
            if declared > rest.len() {
                return Err(StegoError::FrameCorrupted);
            }
            &rest[..declared]
        }
        Framing::Legacy => data,
    };

    if body.len() < HEADER_LEN {
        return Err(StegoError::FrameCorrupted);
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&body[..SALT_LEN]);

    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&body[SALT_LEN..HEADER_LEN]);

    Ok(ParsedFrame {
        salt,
        iv,
        ciphertext: body[HEADER_LEN..].to_vec(),
    })
}

/// Read the big-endian body length from the first four bytes.
pub fn read_length_prefix(data: &[u8]) -> Result<usize, StegoError> {
    let prefix: [u8; LENGTH_PREFIX_LEN] = data
        .get(..LENGTH_PREFIX_LEN)
        .and_then(|p| p.try_into().ok())
        .ok_or(StegoError::FrameCorrupted)?;
    usize::try_from(u32::from_be_bytes(prefix)).map_err(|_| StegoError::FrameCorrupted)
}

/// Bytes the framing adds in front of the body.
pub fn prefix_len(framing: Framing) -> usize {
    match framing {
        Framing::LengthPrefixed => LENGTH_PREFIX_LEN,
        Framing::Legacy => 0,
    }
}

/// Exact frame size for a plaintext of `message_len` bytes.
///
/// PKCS#7 always adds 1..=16 bytes, so the ciphertext is the next multiple
/// of 16 strictly above `message_len`.
pub fn payload_len(message_len: usize, framing: Framing) -> usize {
    let ciphertext_len = (message_len / BLOCK_LEN + 1) * BLOCK_LEN;
    prefix_len(framing) + HEADER_LEN + ciphertext_len
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: [u8; SALT_LEN] = [1u8; SALT_LEN];
    const IV: [u8; IV_LEN] = [2u8; IV_LEN];

    #[test]
    fn pack_unpack_roundtrip_prefixed() {
        let ciphertext = vec![0xAB; 32];
        let frame = pack(&SALT, &IV, &ciphertext, Framing::LengthPrefixed).unwrap();
        assert_eq!(frame.len(), 4 + 32 + 32);
        let parsed = unpack(&frame, Framing::LengthPrefixed).unwrap();
        assert_eq!(parsed.salt, SALT);
        assert_eq!(parsed.iv, IV);
        assert_eq!(parsed.ciphertext, ciphertext);
    }

    #[test]
    fn prefix_counts_body_only_big_endian() {
        let frame = pack(&SALT, &IV, &[0u8; 16], Framing::LengthPrefixed).unwrap();
        // 16 + 16 + 16 = 48
        assert_eq!(&frame[..4], &[0x00, 0x00, 0x00, 0x30]);
        assert_eq!(&frame[4..20], &SALT);
        assert_eq!(&frame[20..36], &IV);
    }

    #[test]
    fn legacy_frame_has_no_prefix() {
        let frame = pack(&SALT, &IV, &[9u8; 16], Framing::Legacy).unwrap();
        assert_eq!(frame.len(), 48);
        assert_eq!(&frame[..16], &SALT);
        let parsed = unpack(&frame, Framing::Legacy).unwrap();
        assert_eq!(parsed.ciphertext, vec![9u8; 16]);
    }

    #[test]
    fn prefixed_unpack_ignores_trailing_bytes() {
        let mut frame = pack(&SALT, &IV, &[5u8; 16], Framing::LengthPrefixed).unwrap();
        frame.extend_from_slice(&[0xEE; 40]);
        let parsed = unpack(&frame, Framing::LengthPrefixed).unwrap();
        assert_eq!(parsed.ciphertext, vec![5u8; 16]);
    }

    #[test]
    fn legacy_unpack_keeps_trailing_bytes() {
        let mut frame = pack(&SALT, &IV, &[5u8; 16], Framing::Legacy).unwrap();
        frame.extend_from_slice(&[0xEE; 3]);
        let parsed = unpack(&frame, Framing::Legacy).unwrap();
        assert_eq!(parsed.ciphertext.len(), 19);
    }

    #[test]
    fn declared_length_beyond_data_rejected() {
        let mut frame = pack(&SALT, &IV, &[0u8; 16], Framing::LengthPrefixed).unwrap();
        frame.truncate(frame.len() - 1);
        assert!(matches!(
            unpack(&frame, Framing::LengthPrefixed),
            Err(StegoError::FrameCorrupted)
        ));
    }

    #[test]
    fn short_body_rejected() {
        assert!(matches!(unpack(&[0u8; 31], Framing::Legacy), Err(StegoError::FrameCorrupted)));
        // Prefix declares 31 bytes and they are all present: still too short.
        let mut frame = vec![0x00, 0x00, 0x00, 31];
        frame.extend_from_slice(&[0u8; 31]);
        assert!(matches!(
            unpack(&frame, Framing::LengthPrefixed),
            Err(StegoError::FrameCorrupted)
        ));
    }

    #[test]
    fn header_only_body_accepted() {
        let frame = pack(&SALT, &IV, &[], Framing::LengthPrefixed).unwrap();
        let parsed = unpack(&frame, Framing::LengthPrefixed).unwrap();
        assert!(parsed.ciphertext.is_empty());
    }

    #[test]
    fn missing_prefix_rejected() {
        assert!(matches!(read_length_prefix(&[0, 0, 1]), Err(StegoError::FrameCorrupted)));
        assert!(matches!(unpack(&[], Framing::LengthPrefixed), Err(StegoError::FrameCorrupted)));
    }

    #[test]
    fn payload_len_matches_pack() {
        for message_len in [0usize, 1, 11, 15, 16, 17, 100] {
            let ciphertext = vec![0u8; (message_len / 16 + 1) * 16];
            for framing in [Framing::LengthPrefixed, Framing::Legacy] {
                let frame = pack(&SALT, &IV, &ciphertext, framing).unwrap();
                assert_eq!(frame.len(), payload_len(message_len, framing));
            }
        }
    }

    #[test]
    fn hello_world_payload_is_52_bytes() {
        assert_eq!(payload_len("hello world".len(), Framing::LengthPrefixed), 52);
        assert_eq!(payload_len("hello world".len(), Framing::Legacy), 48);
    }
}
