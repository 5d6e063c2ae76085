// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Cryptographic primitives for payload encryption.
//!
//! - **Key derivation**: PBKDF2-HMAC-SHA1 over the password and a fresh
//!   16-byte salt, producing a 32-byte AES key. The iteration count is part
//!   of the carrier contract; both sides must use the same value.
//!
//! - **Message cipher**: AES-256-CBC with PKCS#7 padding and a random 16-byte
//!   IV drawn per call. CBC gives confidentiality only. Padding validity and
//!   UTF-8 validity of the recovered text are the sole corruption signals,
//!   and both collapse into [`StegoError::DecryptionFailed`].

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes256;
use rand::RngCore;
use sha1::Sha1;
use zeroize::Zeroizing;

use crate::stego::error::StegoError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// PBKDF2 salt length in bytes.
pub const SALT_LEN: usize = 16;
/// CBC initialization vector length in bytes.
pub const IV_LEN: usize = 16;
/// Derived AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;
/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// PBKDF2 iteration count used unless a config overrides it.
/// Carriers written with a different count will not decode.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Draw a fresh random salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Derive the AES-256 key from password + salt.
///
/// Deterministic in all three inputs. Deliberately slow at the default
/// iteration count (hundreds of milliseconds).
///
/// # Errors
/// [`StegoError::InvalidIterations`] if `iterations` is 0.
pub fn derive_key(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    iterations: u32,
) -> Result<Zeroizing<[u8; KEY_LEN]>, StegoError> {
    if iterations == 0 {
        return Err(StegoError::InvalidIterations);
    }
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha1>(password, salt, iterations, &mut *key);
    Ok(key)
}

/// Encrypt plaintext with AES-256-CBC under a freshly generated IV.
///
/// Returns `(iv, ciphertext)`. The ciphertext is PKCS#7 padded, so its length
/// is always a non-zero multiple of [`BLOCK_LEN`].
pub fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> ([u8; IV_LEN], Vec<u8>) {
    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);
    let ciphertext = cbc_encrypt(key, &iv, plaintext);
    (iv, ciphertext)
}

fn cbc_encrypt(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(key.into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt and validate a message.
///
/// # Errors
/// [`StegoError::DecryptionFailed`] when the ciphertext is not block aligned,
/// the padding is invalid, or the plaintext is not UTF-8. The caller cannot
/// tell these apart.
pub fn decrypt(
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
    ciphertext: &[u8],
) -> Result<String, StegoError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(StegoError::DecryptionFailed);
    }
    let plaintext = Aes256CbcDec::new(key.into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| StegoError::DecryptionFailed)?;
    String::from_utf8(plaintext).map_err(|_| StegoError::DecryptionFailed)
}
