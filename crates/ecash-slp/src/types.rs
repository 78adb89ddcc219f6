//! Common types for token operations.
//!
//! The UTXO model is closed: an output either carries a token annotation
//! or it does not, and that is settled once when indexer data is decoded.

use std::fmt;

use crate::TokenId;

/// SLP fungible token type number.
pub const SLP_FUNGIBLE: u8 = 0x01;
/// SLP mint-vault token type number.
pub const SLP_MINT_VAULT: u8 = 0x02;
/// SLP NFT1 group token type number.
pub const SLP_NFT1_GROUP: u8 = 0x81;
/// SLP NFT1 child token type number.
pub const SLP_NFT1_CHILD: u8 = 0x41;

/// Token protocol family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenProtocol {
    /// Simple Ledger Protocol, `OP_RETURN`-based.
    Slp,
    /// Augmented Ledger Protocol, eMPP-based.
    Alp,
    /// Anything the indexer could not classify.
    Unknown,
}

impl TokenProtocol {
    /// Parse the indexer's protocol label. Unrecognized labels map to
    /// [`TokenProtocol::Unknown`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "SLP" => TokenProtocol::Slp,
            "ALP" => TokenProtocol::Alp,
            _ => TokenProtocol::Unknown,
        }
    }

    /// The indexer's label for this protocol.
    pub fn label(&self) -> &'static str {
        match self {
            TokenProtocol::Slp => "SLP",
            TokenProtocol::Alp => "ALP",
            TokenProtocol::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TokenProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Protocol plus the protocol-specific type number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenType {
    /// Protocol family.
    pub protocol: TokenProtocol,
    /// Type number within the protocol (e.g. [`SLP_FUNGIBLE`]).
    pub number: u8,
}

impl TokenType {
    /// The SLP fungible type, the only one payouts are built for.
    pub const SLP_FUNGIBLE: TokenType = TokenType {
        protocol: TokenProtocol::Slp,
        number: SLP_FUNGIBLE,
    };
}

/// Token metadata as reported by the indexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// Genesis txid of the token.
    pub token_id: TokenId,
    /// Protocol and type number.
    pub token_type: TokenType,
}

/// Reference to a previous transaction output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Outpoint {
    /// Txid in display (big-endian hex) order.
    pub txid: String,
    /// Output index.
    pub out_idx: u32,
}

impl fmt::Display for Outpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.out_idx)
    }
}

/// Token amount and identity carried by an output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAnnotation {
    /// Which token.
    pub token_id: TokenId,
    /// Protocol and type number.
    pub token_type: TokenType,
    /// Amount in the token's smallest unit.
    pub atoms: u64,
    /// Whether this output is a mint baton rather than a balance.
    pub is_mint_baton: bool,
}

/// A spendable output with no token attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainUtxo {
    /// Location of the output.
    pub outpoint: Outpoint,
    /// Value in satoshis.
    pub sats: u64,
}

/// A spendable output carrying a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenUtxo {
    /// Location of the output.
    pub outpoint: Outpoint,
    /// Value in satoshis (usually dust).
    pub sats: u64,
    /// The token carried.
    pub token: TokenAnnotation,
}

/// Any spendable output owned by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Utxo {
    /// No token attached.
    Plain(PlainUtxo),
    /// Token attached.
    Token(TokenUtxo),
}

impl Utxo {
    /// Location of the output.
    pub fn outpoint(&self) -> &Outpoint {
        match self {
            Utxo::Plain(u) => &u.outpoint,
            Utxo::Token(u) => &u.outpoint,
        }
    }

    /// Value in satoshis.
    pub fn sats(&self) -> u64 {
        match self {
            Utxo::Plain(u) => u.sats,
            Utxo::Token(u) => u.sats,
        }
    }
}
