//! CashAddr encoding.
//!
//! A CashAddr string is `prefix:payload`, where the payload is the base32
//! encoding of `version_byte || hash` followed by a 40-bit BCH checksum
//! computed over the expanded prefix and the payload.

use crate::ScriptError;

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const GENERATORS: [u64; 5] = [
    0x98f2bc8e61,
    0x79b76d99e2,
    0xf33e5fb3c4,
    0xae2eabe2a8,
    0x1e4f43e470,
];

const CHECKSUM_LEN: usize = 8;

/// Version-byte type bits for a key-hash payload.
pub const TYPE_P2PKH: u8 = 0x00;
/// Version-byte type bits for a script-hash payload.
pub const TYPE_P2SH: u8 = 0x08;

fn polymod(values: &[u8]) -> u64 {
    let mut c: u64 = 1;
    for d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(*d);
        for (i, generator) in GENERATORS.iter().enumerate() {
            if c0 & (1 << i) != 0 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

fn expand_prefix(prefix: &str) -> Vec<u8> {
    let mut out: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    out.push(0);
    out
}

/// Regroup a bit stream from `from`-bit to `to`-bit words.
///
/// With `pad` set, a trailing partial word is zero-padded. Without it, a
/// trailing partial word must be all zero bits and shorter than `from`.
fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max = (1u32 << to) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    for value in data {
        let v = u32::from(*value);
        if v >> from != 0 {
            return None;
        }
        acc = (acc << from) | v;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max) as u8);
        }
    }
    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max) != 0 {
        return None;
    }
    Some(out)
}

fn checksum(prefix: &str, payload5: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut values = expand_prefix(prefix);
    values.extend_from_slice(payload5);
    values.extend_from_slice(&[0u8; CHECKSUM_LEN]);
    let poly = polymod(&values);
    let mut out = [0u8; CHECKSUM_LEN];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = ((poly >> (5 * (CHECKSUM_LEN - 1 - i))) & 0x1f) as u8;
    }
    out
}

/// Encode `version_byte || hash` under the given prefix.
///
/// # Arguments
/// * `prefix` - Lowercase human-readable prefix, e.g. `ecash`.
/// * `version` - Version byte (type bits plus size bits).
/// * `hash` - Payload hash bytes.
///
/// # Returns
/// The lowercase `prefix:payload` string.
pub fn encode(prefix: &str, version: u8, hash: &[u8]) -> String {
    let mut raw = Vec::with_capacity(1 + hash.len());
    raw.push(version);
    raw.extend_from_slice(hash);
    // 8-bit to 5-bit with padding cannot fail.
    let mut payload5 = convert_bits(&raw, 8, 5, true).unwrap_or_default();
    let check = checksum(prefix, &payload5);
    payload5.extend_from_slice(&check);

    let mut out = String::with_capacity(prefix.len() + 1 + payload5.len());
    out.push_str(prefix);
    out.push(':');
    for v in payload5 {
        out.push(CHARSET[v as usize] as char);
    }
    out
}

/// Decode a `prefix:payload` string.
///
/// The prefix is mandatory. Upper-case input is accepted only if the whole
/// string is upper-case.
///
/// # Returns
/// `(prefix, version_byte, hash)` with the prefix lowercased.
pub fn decode(addr: &str) -> Result<(String, u8, Vec<u8>), ScriptError> {
    let invalid = |reason: &str| ScriptError::InvalidAddress {
        address: addr.to_string(),
        reason: reason.to_string(),
    };

    let has_lower = addr.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = addr.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(invalid("mixed case"));
    }
    let lowered = addr.to_ascii_lowercase();

    let (prefix, body) = lowered
        .rsplit_once(':')
        .ok_or_else(|| invalid("missing prefix"))?;
    if prefix.is_empty() {
        return Err(invalid("missing prefix"));
    }
    if body.len() <= CHECKSUM_LEN {
        return Err(invalid("payload too short"));
    }

    let mut payload5 = Vec::with_capacity(body.len());
    for c in body.bytes() {
        let v = CHARSET
            .iter()
            .position(|x| *x == c)
            .ok_or_else(|| invalid("character outside the base32 alphabet"))?;
        payload5.push(v as u8);
    }

    let mut values = expand_prefix(prefix);
    values.extend_from_slice(&payload5);
    if polymod(&values) != 0 {
        return Err(ScriptError::ChecksumFailed(addr.to_string()));
    }

    let data5 = &payload5[..payload5.len() - CHECKSUM_LEN];
    let raw = convert_bits(data5, 5, 8, false).ok_or_else(|| invalid("non-zero padding"))?;
    let (version, hash) = raw.split_first().ok_or_else(|| invalid("empty payload"))?;

    let expected_len = match version & 0x07 {
        0 => 20,
        1 => 24,
        2 => 28,
        3 => 32,
        4 => 40,
        5 => 48,
        6 => 56,
        _ => 64,
    };
    if hash.len() != expected_len {
        return Err(invalid("hash length does not match version byte"));
    }

    Ok((prefix.to_string(), *version, hash.to_vec()))
}
