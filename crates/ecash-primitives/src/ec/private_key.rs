//! secp256k1 private key with WIF import/export.
//!
//! A WIF string is Base58Check over `version || scalar [|| 0x01]`, where
//! version is 0x80 (mainnet) or 0xef (testnet) and the trailing 0x01 marks
//! a compressed public key.

use std::fmt;

use k256::ecdsa::SigningKey;
use zeroize::Zeroizing;

use crate::base58;
use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::PrimitivesError;

/// Length of a raw private key scalar.
pub const PRIVATE_KEY_LEN: usize = 32;

/// WIF version byte for mainnet keys.
pub const WIF_MAINNET: u8 = 0x80;

/// WIF version byte for testnet/regtest keys.
pub const WIF_TESTNET: u8 = 0xef;

/// Suffix byte marking a WIF key as compressed.
pub const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// A secp256k1 signing key.
///
/// The inner `SigningKey` zeroizes its scalar when dropped. `Debug` never
/// prints key material.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Build a key from a raw 32-byte big-endian scalar.
    ///
    /// # Arguments
    /// * `bytes` - Exactly 32 bytes.
    ///
    /// # Returns
    /// `InvalidPrivateKey` for the wrong length, a zero scalar, or a scalar
    /// at or above the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_LEN,
                bytes.len()
            )));
        }
        let inner = SigningKey::from_bytes(k256::FieldBytes::from_slice(bytes))
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner })
    }

    /// Parse a 64-character hex scalar.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = Zeroizing::new(hex::decode(hex_str)?);
        Self::from_bytes(&bytes)
    }

    /// Decode a WIF string, compressed or uncompressed.
    ///
    /// Accepts the mainnet (0x80) and testnet (0xef) version bytes. The
    /// decoded buffer is wiped before returning.
    ///
    /// # Arguments
    /// * `wif` - Base58Check WIF string.
    ///
    /// # Returns
    /// `InvalidBase58` or `ChecksumMismatch` for encoding failures,
    /// `InvalidWif` for framing problems (length, version, compression flag),
    /// `InvalidPrivateKey` when the scalar itself is out of range.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let payload = Zeroizing::new(base58::check_decode(wif)?);

        match payload.len() {
            33 => {}
            34 => {
                if payload[33] != WIF_COMPRESSED_FLAG {
                    return Err(PrimitivesError::InvalidWif(format!(
                        "invalid compression flag 0x{:02x}",
                        payload[33]
                    )));
                }
            }
            n => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "invalid payload length {}",
                    n
                )))
            }
        }

        if payload[0] != WIF_MAINNET && payload[0] != WIF_TESTNET {
            return Err(PrimitivesError::InvalidWif(format!(
                "unknown version byte 0x{:02x}",
                payload[0]
            )));
        }

        Self::from_bytes(&payload[1..1 + PRIVATE_KEY_LEN])
    }

    /// Compressed mainnet WIF.
    pub fn to_wif(&self) -> String {
        self.to_wif_prefix(WIF_MAINNET)
    }

    /// Compressed WIF with an explicit version byte.
    pub fn to_wif_prefix(&self, version: u8) -> String {
        let mut payload = Zeroizing::new(Vec::with_capacity(2 + PRIVATE_KEY_LEN));
        payload.push(version);
        payload.extend_from_slice(&self.inner.to_bytes());
        payload.push(WIF_COMPRESSED_FLAG);
        base58::check_encode(&payload)
    }

    /// Raw 32-byte scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; PRIVATE_KEY_LEN];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }

    /// Sign a 32-byte digest with an RFC6979 nonce. See [`Signature::sign`].
    pub fn sign(&self, digest: &[u8]) -> Result<Signature, PrimitivesError> {
        Signature::sign(digest, self)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("pub_key", &self.pub_key().to_hex())
            .finish()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for PrivateKey {}
