#![deny(missing_docs)]
//! SLP token support for eCash.
//!
//! Provides token identifiers and types, the SEND marker script carried at
//! output 0 of a transfer, and selection of token-bearing UTXOs.

pub mod error;
pub mod script;
pub mod selection;
pub mod token_id;
pub mod types;

pub use error::TokenError;
pub use script::{build_send_script, parse_send_script, SlpSend};
pub use selection::{plain_utxos_by_value, select_token_utxos, SelectionResult};
pub use token_id::TokenId;
pub use types::{
    Outpoint, PlainUtxo, TokenAnnotation, TokenInfo, TokenProtocol, TokenType, TokenUtxo, Utxo,
};
