//! Payout error taxonomy.

use ecash_chronik::ChronikError;
use ecash_slp::TokenError;
use ecash_transaction::TransactionError;

use crate::keys::KeyDecodeError;

/// The wallet cannot fund the payout.
#[derive(Debug, thiserror::Error)]
pub enum FundsError {
    /// The indexer returned no UTXOs for the wallet.
    #[error("no UTXOs available for the reward wallet")]
    NoUtxos,

    /// Token UTXOs do not cover the requested amount.
    #[error("insufficient token balance for payout: requested {requested} atoms, available {available}")]
    InsufficientTokenBalance { requested: u64, available: u64 },

    /// Every plain UTXO was added and the inputs still fall short.
    #[error("insufficient plain value for dust and fees; last error: {last_error}")]
    InsufficientPlainValue { last_error: TransactionError },
}

/// Errors returned by a payout request.
#[derive(Debug, thiserror::Error)]
pub enum PayoutError {
    /// The request itself is malformed.
    #[error("{0}")]
    Validation(String),

    /// Missing or malformed configuration.
    #[error("{0}")]
    Config(String),

    /// The configured token is not usable for SLP payouts.
    #[error("{0}")]
    Protocol(String),

    #[error("wallet key: {0}")]
    KeyDecode(#[from] KeyDecodeError),

    #[error(transparent)]
    Funds(#[from] FundsError),

    #[error("chronik: {0}")]
    Network(#[from] ChronikError),

    /// Signing failed for a reason other than a value shortfall.
    #[error("transaction: {0}")]
    Transaction(#[from] TransactionError),
}

impl From<TokenError> for PayoutError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::InsufficientTokenBalance { requested, available } => {
                PayoutError::Funds(FundsError::InsufficientTokenBalance { requested, available })
            }
            other => PayoutError::Validation(other.to_string()),
        }
    }
}
