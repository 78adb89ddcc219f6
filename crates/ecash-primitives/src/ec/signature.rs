//! ECDSA signatures over secp256k1 with strict DER encoding.
//!
//! Signing uses RFC6979 deterministic nonces and always yields low-S
//! signatures, which is what eCash relay policy requires.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

const DER_SEQUENCE: u8 = 0x30;
const DER_INTEGER: u8 = 0x02;

/// An ECDSA signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    inner: k256::ecdsa::Signature,
}

impl Signature {
    /// Sign a 32-byte digest.
    ///
    /// # Arguments
    /// * `digest` - The sighash to sign. Must be exactly 32 bytes.
    /// * `priv_key` - Signing key.
    ///
    /// # Returns
    /// A low-S signature, or `InvalidSignature` if the digest has the wrong
    /// length.
    pub fn sign(digest: &[u8], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        if digest.len() != 32 {
            return Err(PrimitivesError::InvalidSignature(format!(
                "digest must be 32 bytes, got {}",
                digest.len()
            )));
        }
        let sig: k256::ecdsa::Signature = priv_key
            .signing_key()
            .sign_prehash(digest)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        let inner = sig.normalize_s().unwrap_or(sig);
        Ok(Signature { inner })
    }

    /// Verify against a 32-byte digest.
    pub fn verify(&self, digest: &[u8], pub_key: &PublicKey) -> bool {
        pub_key
            .verifying_key()
            .verify_prehash(digest, &self.inner)
            .is_ok()
    }

    /// Whether S is in the lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        self.inner.normalize_s().is_none()
    }

    /// Strict DER: `0x30 <len> 0x02 <rlen> <r> 0x02 <slen> <s>`.
    pub fn to_der(&self) -> Vec<u8> {
        let (r, s) = self.inner.split_bytes();
        let r = der_integer(&r);
        let s = der_integer(&s);

        let mut out = Vec::with_capacity(6 + r.len() + s.len());
        out.push(DER_SEQUENCE);
        out.push((4 + r.len() + s.len()) as u8);
        out.push(DER_INTEGER);
        out.push(r.len() as u8);
        out.extend_from_slice(&r);
        out.push(DER_INTEGER);
        out.push(s.len() as u8);
        out.extend_from_slice(&s);
        out
    }

    /// Parse a strict DER signature as produced by [`Signature::to_der`].
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let malformed = |what: &str| PrimitivesError::InvalidSignature(format!("malformed DER: {}", what));

        if bytes.len() < 8 || bytes[0] != DER_SEQUENCE {
            return Err(malformed("missing sequence header"));
        }
        if bytes[1] as usize != bytes.len() - 2 {
            return Err(malformed("sequence length mismatch"));
        }

        let (r, rest) = read_der_integer(&bytes[2..]).ok_or_else(|| malformed("bad R"))?;
        let (s, rest) = read_der_integer(rest).ok_or_else(|| malformed("bad S"))?;
        if !rest.is_empty() {
            return Err(malformed("trailing bytes"));
        }

        let inner = k256::ecdsa::Signature::from_scalars(r, s)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(Signature { inner })
    }
}

/// Minimal big-endian encoding of a 32-byte integer, with a 0x00 pad when
/// the top bit is set.
fn der_integer(val: &[u8]) -> Vec<u8> {
    let first_nonzero = val.iter().position(|b| *b != 0).unwrap_or(val.len() - 1);
    let trimmed = &val[first_nonzero..];
    let mut out = Vec::with_capacity(trimmed.len() + 1);
    if trimmed[0] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(trimmed);
    out
}

/// Read one `0x02 <len> <value>` element, returning the value left-padded
/// to 32 bytes and the unread remainder.
fn read_der_integer(bytes: &[u8]) -> Option<(k256::FieldBytes, &[u8])> {
    if bytes.len() < 2 || bytes[0] != DER_INTEGER {
        return None;
    }
    let len = bytes[1] as usize;
    let body = bytes.get(2..2 + len)?;
    let value = match body {
        [0x00, rest @ ..] if rest.first().map_or(false, |b| b & 0x80 != 0) => rest,
        [first, ..] if first & 0x80 == 0 => body,
        _ => return None,
    };
    if value.is_empty() || value.len() > 32 {
        return None;
    }
    let mut out = k256::FieldBytes::default();
    out[32 - value.len()..].copy_from_slice(value);
    Some((out, &bytes[2 + len..]))
}
