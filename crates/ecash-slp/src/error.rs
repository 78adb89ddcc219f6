//! Token error types.

use ecash_script::ScriptError;

/// Errors that can occur during token operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The matching token UTXOs do not hold enough atoms.
    #[error("insufficient token balance: requested {requested} atoms, available {available}")]
    InsufficientTokenBalance {
        /// Atoms requested.
        requested: u64,
        /// Atoms held by all eligible UTXOs.
        available: u64,
    },

    /// An atom count does not fit a SEND amount.
    #[error("atom count {0} exceeds u64")]
    AtomsOverflow(u128),

    /// A token id was not 32 bytes of hex.
    #[error("invalid token id: {0}")]
    InvalidTokenId(String),

    /// SEND messages carry between 1 and 19 output amounts.
    #[error("SEND must carry 1..=19 amounts, got {0}")]
    InvalidOutputCount(usize),

    /// The script is not a well-formed SLP SEND message.
    #[error("invalid SLP script: {0}")]
    InvalidScript(String),

    /// Script error.
    #[error(transparent)]
    Script(#[from] ScriptError),
}
