use ecash_script::ScriptError;
use ecash_primitives::PrimitivesError;

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction structure is invalid (e.g. an input index out of range).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Signing failed for a reason other than funding.
    #[error("signing error: {0}")]
    SigningError(String),

    /// Binary/hex decoding failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// The inputs cannot pay for the fixed outputs plus the estimated fee.
    ///
    /// Callers that can add funding inputs match on this variant and retry.
    #[error("insufficient input value: {available} sats available, {required} sats required")]
    InsufficientInputValue {
        /// Sum of input values.
        available: u64,
        /// Sum of fixed outputs plus the fee.
        required: u64,
    },

    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}
