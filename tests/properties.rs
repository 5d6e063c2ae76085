// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Property-based tests for the encode/decode pipeline.
//!
//! 1. **Round-trip**: decode(encode(m, p), p) == m
//! 2. **Wrong password**: decoding with p2 != p never returns m
//! 3. **Locality**: only the first 8 * payload_len samples change, and only in their low bit
//! 4. **Capacity**: max_message_len is the exact boundary

use pixelcrypt_core::stego::frame::payload_len;
use pixelcrypt_core::stego::lsb;
use pixelcrypt_core::{decode_with, encode_with, max_message_len, Framing, StegoConfig, StegoError};
use proptest::prelude::*;

const FAST: StegoConfig = StegoConfig { iterations: 64, framing: Framing::LengthPrefixed };

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn roundtrip_any_message(
        message in "\\PC{0,120}",
        password in prop::collection::vec(any::<u8>(), 0..32),
        cover in prop::collection::vec(any::<u8>(), 6000..8000),
    ) {
        let mut pixels = cover;
        encode_with(&mut pixels, &message, &password, &FAST).unwrap();
        prop_assert_eq!(decode_with(&pixels, &password, &FAST).unwrap(), message);
    }

    #[test]
    fn wrong_password_never_yields_message(
        message in "[a-z ]{1,40}",
        password in "[a-z]{4,12}",
        suffix in "[0-9]{1,4}",
    ) {
        let mut pixels = vec![0x5Au8; 2048];
        encode_with(&mut pixels, &message, password.as_bytes(), &FAST).unwrap();
        let wrong = format!("{password}{suffix}");
        match decode_with(&pixels, wrong.as_bytes(), &FAST) {
            Ok(text) => prop_assert_ne!(text, message),
            Err(e) => prop_assert!(matches!(e, StegoError::DecryptionFailed)),
        }
    }

    #[test]
    fn only_payload_low_bits_change(
        message in "\\PC{0,64}",
        cover in prop::collection::vec(any::<u8>(), 3000..5000),
    ) {
        let mut pixels = cover.clone();
        encode_with(&mut pixels, &message, b"pw", &FAST).unwrap();
        let used = payload_len(message.len(), Framing::LengthPrefixed) * 8;
        prop_assert_eq!(&pixels[used..], &cover[used..]);
        for (a, b) in pixels.iter().zip(&cover) {
            prop_assert_eq!(a & 0xFE, b & 0xFE);
        }
    }

    #[test]
    fn max_message_len_is_exact_boundary(samples in 0usize..4000) {
        match max_message_len(samples, Framing::LengthPrefixed) {
            Some(len) => {
                let fits = "a".repeat(len);
                let mut pixels = vec![0u8; samples];
                prop_assert!(encode_with(&mut pixels, &fits, b"pw", &FAST).is_ok());

                let too_long = "a".repeat(len + 1);
                let mut pixels = vec![0u8; samples];
                let result = encode_with(&mut pixels, &too_long, b"pw", &FAST);
                let rejected = matches!(result, Err(StegoError::MessageTooLarge { .. }));
                prop_assert!(rejected);
                prop_assert!(pixels.iter().all(|&p| p == 0));
            }
            None => {
                let mut pixels = vec![0u8; samples];
                let result = encode_with(&mut pixels, "", b"pw", &FAST);
                let rejected = matches!(result, Err(StegoError::MessageTooLarge { .. }));
                prop_assert!(rejected);
            }
        }
    }

    #[test]
    fn embed_extract_is_identity(
        payload in prop::collection::vec(any::<u8>(), 0..64),
        spare in 0usize..40,
    ) {
        let mut pixels = vec![0xA5u8; payload.len() * 8 + spare];
        lsb::embed(&mut pixels, &payload).unwrap();
        let bits = lsb::extract_bits(&pixels, payload.len() * 8).unwrap();
        prop_assert_eq!(lsb::bits_to_bytes(&bits), payload);
    }

    #[test]
    fn truncated_prefixed_carrier_is_frame_error(
        message in "[a-z]{0,40}",
        cut in 1usize..64,
    ) {
        let mut pixels = vec![0u8; 2048];
        encode_with(&mut pixels, &message, b"pw", &FAST).unwrap();
        let used = payload_len(message.len(), Framing::LengthPrefixed) * 8;
        let result = decode_with(&pixels[..used - cut], b"pw", &FAST);
        prop_assert!(matches!(result, Err(StegoError::FrameCorrupted)));
    }
}
