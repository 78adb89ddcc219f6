//! Token identifier type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::TokenError;

/// A token id: the txid of the token's genesis transaction.
///
/// Stored in display (big-endian) byte order, which is also the order SLP
/// scripts push it in. Parsing accepts upper- or lower-case hex, so two ids
/// compare equal regardless of how they were written.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId([u8; 32]);

impl TokenId {
    /// Create a `TokenId` from 32 display-order bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        TokenId(bytes)
    }

    /// Parse a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, TokenError> {
        if s.len() != 64 {
            return Err(TokenError::InvalidTokenId(format!(
                "expected 64 hex characters, got {}",
                s.len()
            )));
        }
        let mut out = [0u8; 32];
        hex::decode_to_slice(s, &mut out).map_err(|e| TokenError::InvalidTokenId(e.to_string()))?;
        Ok(TokenId(out))
    }

    /// The display-order bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for TokenId {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", self.to_hex())
    }
}

impl Serialize for TokenId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TokenId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TokenId::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "9e0a9d4720782cf661beaea6c5513f1972e0f3b1541ba4c83f4c87ef65f843dc";

    #[test]
    fn test_hex_roundtrip() {
        let id = TokenId::from_hex(ID).unwrap();
        assert_eq!(id.to_hex(), ID);
        assert_eq!(id.as_bytes()[0], 0x9e);
        assert_eq!(id.to_string(), ID);
    }

    #[test]
    fn test_case_insensitive_equality() {
        let lower = TokenId::from_hex(ID).unwrap();
        let upper: TokenId = ID.to_ascii_uppercase().parse().unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_rejects_bad_ids() {
        assert!(TokenId::from_hex("").is_err());
        assert!(TokenId::from_hex(&ID[..62]).is_err());
        assert!(TokenId::from_hex(&format!("{}zz", &ID[..62])).is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let id = TokenId::from_hex(ID).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", ID));
        assert_eq!(serde_json::from_str::<TokenId>(&json).unwrap(), id);
    }
}
