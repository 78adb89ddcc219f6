//! Reward wallet key decoding.
//!
//! The codec is picked once from configuration. [`KeyCodec::Wif`] goes
//! through `PrivateKey::from_wif`; [`KeyCodec::RawBase58Check`] unpacks the
//! WIF framing by hand for keys exported by tools that produce slightly
//! different payloads.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use ecash_primitives::base58;
use ecash_primitives::ec::private_key::{PRIVATE_KEY_LEN, WIF_COMPRESSED_FLAG, WIF_MAINNET, WIF_TESTNET};
use ecash_primitives::ec::PrivateKey;
use ecash_primitives::PrimitivesError;

/// Failure to turn the configured secret into a signing key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyDecodeError {
    #[error("invalid base58check encoding: {0}")]
    Encoding(String),

    #[error("invalid WIF payload length {0}")]
    InvalidLength(usize),

    #[error("unsupported WIF version byte 0x{0:02x}")]
    UnsupportedVersion(u8),

    #[error("invalid WIF compression flag 0x{0:02x}")]
    InvalidCompressionFlag(u8),

    #[error("private key scalar out of range")]
    InvalidScalar,

    /// The library decoder failed in a way not covered above.
    #[error("{0}")]
    Library(String),
}

impl From<PrimitivesError> for KeyDecodeError {
    fn from(e: PrimitivesError) -> Self {
        match e {
            PrimitivesError::InvalidBase58(msg) => KeyDecodeError::Encoding(msg),
            PrimitivesError::ChecksumMismatch => KeyDecodeError::Encoding("checksum mismatch".into()),
            PrimitivesError::InvalidPrivateKey(_) => KeyDecodeError::InvalidScalar,
            other => KeyDecodeError::Library(other.to_string()),
        }
    }
}

/// How `REWARD_WALLET_WIF` is decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyCodec {
    /// Standard WIF via the primitives crate.
    #[default]
    Wif,
    /// Manual Base58Check unpacking of the WIF framing.
    RawBase58Check,
}

impl KeyCodec {
    /// Decode `encoded` into a private key.
    pub fn decode(&self, encoded: &str) -> Result<PrivateKey, KeyDecodeError> {
        match self {
            KeyCodec::Wif => Ok(PrivateKey::from_wif(encoded)?),
            KeyCodec::RawBase58Check => decode_raw(encoded),
        }
    }
}

fn decode_raw(encoded: &str) -> Result<PrivateKey, KeyDecodeError> {
    let payload = Zeroizing::new(
        base58::check_decode(encoded).map_err(|e| KeyDecodeError::Encoding(e.to_string()))?,
    );

    let len = payload.len();
    if len != PRIVATE_KEY_LEN + 1 && len != PRIVATE_KEY_LEN + 2 {
        return Err(KeyDecodeError::InvalidLength(len));
    }
    let version = payload[0];
    if version != WIF_MAINNET && version != WIF_TESTNET {
        return Err(KeyDecodeError::UnsupportedVersion(version));
    }
    if len == PRIVATE_KEY_LEN + 2 && payload[len - 1] != WIF_COMPRESSED_FLAG {
        return Err(KeyDecodeError::InvalidCompressionFlag(payload[len - 1]));
    }

    PrivateKey::from_bytes(&payload[1..1 + PRIVATE_KEY_LEN]).map_err(|_| KeyDecodeError::InvalidScalar)
}

impl FromStr for KeyCodec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wif" => Ok(KeyCodec::Wif),
            "raw" => Ok(KeyCodec::RawBase58Check),
            other => Err(format!("unknown key codec {other:?} (expected wif or raw)")),
        }
    }
}

impl fmt::Display for KeyCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCodec::Wif => f.write_str("wif"),
            KeyCodec::RawBase58Check => f.write_str("raw"),
        }
    }
}
