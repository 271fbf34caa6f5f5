// SPDX-License-Identifier: GPL-3.0-only

//! RFC 6238 code generation with the fixed SHA-1 / 30 s / 6 digit profile.
//!
//! Nothing in here reads the clock: callers pass the time-step they want a
//! code for, which keeps the engine pure and easy to check against the RFC
//! test vectors.

use std::{fmt, sync::Arc};

use data_encoding::{BASE32, BASE32_NOPAD, DecodeKind};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

const CODE_DIGITS: usize = 6;
const CODE_MODULUS: u32 = 1_000_000;

/// A Base32 encoded TOTP key
///
/// The value is redacted from [`fmt::Debug`] output and wiped from memory
/// once the last clone is dropped.
#[derive(Clone)]
pub struct Secret(Arc<SecretString>);

impl Secret {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(Arc::new(SecretString::from(encoded.into())))
    }

    /// Gives access to the encoded text, only meant for decoding and for
    /// echoing a value back into an input the user controls
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

/// A six digit one-time code, only valid for the time-step it was computed for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(String);

impl Code {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons a secret can't be turned into an HMAC key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("secret is empty")]
    Empty,
    #[error("secret contains a character outside the Base32 alphabet at position {position}")]
    InvalidSymbol { position: usize },
    #[error("secret has an invalid Base32 length")]
    InvalidLength,
    #[error("secret has invalid Base32 padding")]
    InvalidPadding,
    #[error("secret has non-zero trailing bits")]
    TrailingBits,
}

impl From<data_encoding::DecodeError> for DecodeError {
    fn from(err: data_encoding::DecodeError) -> Self {
        match err.kind {
            DecodeKind::Symbol => DecodeError::InvalidSymbol {
                position: err.position,
            },
            DecodeKind::Length => DecodeError::InvalidLength,
            DecodeKind::Trailing => DecodeError::TrailingBits,
            _ => DecodeError::InvalidPadding,
        }
    }
}

/// Computes the code of `secret` for the given `time_step`
pub fn compute_code(secret: &Secret, time_step: u64) -> Result<Code, DecodeError> {
    let key = decode_secret(secret.expose())?;
    Ok(hotp(&key, time_step))
}

/// Decodes an RFC 4648 Base32 secret into raw key bytes
///
/// Whitespace is dropped and letters are upper-cased first, since secrets are
/// often shown in lowercase groups of four. Padding is optional, but when
/// present it has to be correct.
pub fn decode_secret(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let normalized: String = encoded
        .chars()
        .filter(|ch| !ch.is_ascii_whitespace())
        .map(|ch| ch.to_ascii_uppercase())
        .collect();

    if normalized.is_empty() {
        return Err(DecodeError::Empty);
    }

    let key = if normalized.contains('=') {
        BASE32.decode(normalized.as_bytes())?
    } else {
        BASE32_NOPAD.decode(normalized.as_bytes())?
    };

    Ok(key)
}

/// HMAC-SHA1 of the big-endian counter followed by dynamic truncation (RFC 4226 §5.3)
fn hotp(key: &[u8], counter: u64) -> Code {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    let offset = usize::from(digest[digest.len() - 1] & 0x0f);
    let window = [
        digest[offset],
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ];
    let value = (u32::from_be_bytes(window) & 0x7fff_ffff) % CODE_MODULUS;

    Code(format!("{:0width$}", value, width = CODE_DIGITS))
}
