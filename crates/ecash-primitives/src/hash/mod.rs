//! Hash functions used by the eCash wire format.
//!
//! Transaction ids and sighash digests use SHA-256d; addresses and
//! public key hashes use Hash160.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Double SHA-256, `SHA256(SHA256(data))`.
///
/// Used for transaction ids, sighash digests and Base58Check checksums.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160 of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Hash160, `RIPEMD160(SHA256(data))`.
///
/// # Arguments
/// * `data` - Usually a 33-byte compressed public key or a redeem script.
///
/// # Returns
/// The 20-byte hash that P2PKH and P2SH outputs commit to.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}
