//! Protobuf messages of the Chronik HTTP API.
//!
//! Field tags follow `chronik.proto`. Only the fields a payout reads are
//! declared; prost skips the rest on decode.

/// Reference to a transaction output. `txid` is in little-endian byte order.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OutPoint {
    /// Txid of the output, little-endian.
    #[prost(bytes = "vec", tag = "1")]
    pub txid: ::prost::alloc::vec::Vec<u8>,
    /// Output index.
    #[prost(uint32, tag = "2")]
    pub out_idx: u32,
}

/// Token protocol and type number.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct TokenType {
    /// Which protocol, carrying that protocol's type number.
    #[prost(oneof = "token_type::TokenType", tags = "1, 2")]
    pub token_type: ::core::option::Option<token_type::TokenType>,
}

/// Nested types of [`TokenType`].
pub mod token_type {
    /// Protocol of a token. The value is the protocol's `*TokenType` enum.
    #[derive(Clone, Copy, PartialEq, ::prost::Oneof)]
    pub enum TokenType {
        /// SLP, e.g. `1` for fungible tokens.
        #[prost(int32, tag = "1")]
        Slp(i32),
        /// ALP, `0` for the standard type.
        #[prost(int32, tag = "2")]
        Alp(i32),
    }
}

/// Token amount attached to an output.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Token {
    /// Hex token id.
    #[prost(string, tag = "1")]
    pub token_id: ::prost::alloc::string::String,
    /// Protocol and type number.
    #[prost(message, optional, tag = "2")]
    pub token_type: ::core::option::Option<TokenType>,
    /// Index into the transaction's token entries, `-1` for UTXOs.
    #[prost(int32, tag = "3")]
    pub entry_idx: i32,
    /// Amount in atoms.
    #[prost(uint64, tag = "4")]
    pub atoms: u64,
    /// Whether the output is a mint baton.
    #[prost(bool, tag = "5")]
    pub is_mint_baton: bool,
}

/// Response of `GET /token/{tokenId}`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenInfo {
    /// Hex token id.
    #[prost(string, tag = "1")]
    pub token_id: ::prost::alloc::string::String,
    /// Protocol and type number.
    #[prost(message, optional, tag = "2")]
    pub token_type: ::core::option::Option<TokenType>,
}

/// One unspent output of a script.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ScriptUtxo {
    /// Where the output lives.
    #[prost(message, optional, tag = "1")]
    pub outpoint: ::core::option::Option<OutPoint>,
    /// Confirmation height, `-1` while in the mempool.
    #[prost(int32, tag = "2")]
    pub block_height: i32,
    /// Whether the output is a coinbase output.
    #[prost(bool, tag = "3")]
    pub is_coinbase: bool,
    /// Value in satoshis.
    #[prost(int64, tag = "5")]
    pub sats: i64,
    /// Whether the creating transaction is finalized.
    #[prost(bool, tag = "10")]
    pub is_final: bool,
    /// Present when the output carries a token.
    #[prost(message, optional, tag = "11")]
    pub token: ::core::option::Option<Token>,
}

/// Response of `GET /script/{type}/{payload}/utxos`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ScriptUtxos {
    /// The queried script.
    #[prost(bytes = "vec", tag = "1")]
    pub output_script: ::prost::alloc::vec::Vec<u8>,
    /// Unspent outputs locked by the script.
    #[prost(message, repeated, tag = "2")]
    pub utxos: ::prost::alloc::vec::Vec<ScriptUtxo>,
}

/// Body of `POST /broadcast-tx`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BroadcastTxRequest {
    /// Serialized transaction.
    #[prost(bytes = "vec", tag = "1")]
    pub raw_tx: ::prost::alloc::vec::Vec<u8>,
    /// Ask the indexer to skip its token-burn checks.
    #[prost(bool, tag = "2")]
    pub skip_token_checks: bool,
}

/// Response of `POST /broadcast-tx`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BroadcastTxResponse {
    /// Txid of the accepted transaction, little-endian.
    #[prost(bytes = "vec", tag = "1")]
    pub txid: ::prost::alloc::vec::Vec<u8>,
}

/// Error body returned with non-2xx responses.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Error {
    /// Human-readable message.
    #[prost(string, tag = "2")]
    pub msg: ::prost::alloc::string::String,
}
