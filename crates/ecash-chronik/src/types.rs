//! Chronik data types: client configuration and conversion of the protobuf
//! wire messages into the `ecash-slp` domain types.
//!
//! Nothing past the client inspects the shape of a response.

use std::time::Duration;

use ecash_slp::{
    Outpoint, PlainUtxo, TokenAnnotation, TokenId, TokenInfo, TokenProtocol, TokenType, TokenUtxo, Utxo,
};

use crate::proto;
use crate::ChronikError;

/// Configuration for a [`ChronikClient`](crate::ChronikClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChronikConfig {
    /// Base URL of the indexer, without trailing slashes.
    pub url: String,
    /// Optional per-request timeout. `None` leaves reqwest's default.
    pub timeout: Option<Duration>,
}

impl ChronikConfig {
    /// Build a config for `url`, stripping any trailing slashes.
    pub fn new(url: impl AsRef<str>) -> Self {
        Self {
            url: url.as_ref().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl TryFrom<proto::TokenType> for TokenType {
    type Error = ChronikError;

    fn try_from(msg: proto::TokenType) -> Result<Self, Self::Error> {
        let (protocol, number) = match msg.token_type {
            Some(proto::token_type::TokenType::Slp(n)) => (TokenProtocol::Slp, n),
            Some(proto::token_type::TokenType::Alp(n)) => (TokenProtocol::Alp, n),
            None => (TokenProtocol::Unknown, 0),
        };
        let number = u8::try_from(number)
            .map_err(|_| ChronikError::InvalidResponse(format!("token type number {number} out of range")))?;
        Ok(TokenType { protocol, number })
    }
}

fn token_type(msg: Option<proto::TokenType>) -> Result<TokenType, ChronikError> {
    TokenType::try_from(msg.unwrap_or_default())
}

impl TryFrom<proto::TokenInfo> for TokenInfo {
    type Error = ChronikError;

    fn try_from(msg: proto::TokenInfo) -> Result<Self, Self::Error> {
        Ok(TokenInfo {
            token_id: parse_token_id(&msg.token_id)?,
            token_type: token_type(msg.token_type)?,
        })
    }
}

impl TryFrom<proto::ScriptUtxo> for Utxo {
    type Error = ChronikError;

    fn try_from(msg: proto::ScriptUtxo) -> Result<Self, Self::Error> {
        let outpoint = msg
            .outpoint
            .ok_or_else(|| ChronikError::InvalidResponse("utxo without outpoint".into()))?;
        let outpoint = Outpoint {
            txid: txid_hex(&outpoint.txid)?,
            out_idx: outpoint.out_idx,
        };
        let sats = u64::try_from(msg.sats)
            .map_err(|_| ChronikError::InvalidResponse(format!("negative value {} at {}", msg.sats, outpoint)))?;
        Ok(match msg.token {
            None => Utxo::Plain(PlainUtxo { outpoint, sats }),
            Some(token) => Utxo::Token(TokenUtxo {
                outpoint,
                sats,
                token: TokenAnnotation {
                    token_id: parse_token_id(&token.token_id)?,
                    token_type: token_type(token.token_type)?,
                    atoms: token.atoms,
                    is_mint_baton: token.is_mint_baton,
                },
            }),
        })
    }
}

/// Display-order hex of a little-endian txid.
pub(crate) fn txid_hex(le: &[u8]) -> Result<String, ChronikError> {
    if le.len() != 32 {
        return Err(ChronikError::InvalidResponse(format!("txid of {} bytes", le.len())));
    }
    let mut be = le.to_vec();
    be.reverse();
    Ok(hex::encode(be))
}

fn parse_token_id(s: &str) -> Result<TokenId, ChronikError> {
    TokenId::from_hex(s).map_err(|e| ChronikError::InvalidResponse(e.to_string()))
}
