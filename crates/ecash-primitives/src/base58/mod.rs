//! Base58 and Base58Check.
//!
//! Base58Check is still how eCash wallets export private keys (WIF),
//! even though addresses moved to cashaddr.

use crate::hash::sha256d;
use crate::PrimitivesError;

const CHECKSUM_LEN: usize = 4;

/// Encode bytes with the Bitcoin Base58 alphabet.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decode a Base58 string. Leading `1` characters become zero bytes.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Append the first four bytes of `sha256d(data)` and Base58-encode.
pub fn check_encode(data: &[u8]) -> String {
    let digest = sha256d(data);
    let mut framed = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    framed.extend_from_slice(data);
    framed.extend_from_slice(&digest[..CHECKSUM_LEN]);
    encode(&framed)
}

/// Decode a Base58Check string and strip its checksum.
///
/// # Arguments
/// * `s` - The encoded string.
///
/// # Returns
/// The payload without the trailing checksum, `ChecksumMismatch` when the
/// checksum does not verify, or `InvalidBase58` for bad characters and
/// strings too short to carry a checksum.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let mut decoded = decode(s)?;
    if decoded.len() < CHECKSUM_LEN {
        return Err(PrimitivesError::InvalidBase58(format!(
            "{} bytes is too short for a checksum",
            decoded.len()
        )));
    }
    let split = decoded.len() - CHECKSUM_LEN;
    let digest = sha256d(&decoded[..split]);
    if decoded[split..] != digest[..CHECKSUM_LEN] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    decoded.truncate(split);
    Ok(decoded)
}
