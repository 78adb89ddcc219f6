/// Errors raised while building, parsing or addressing scripts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Push-data opcodes must go through `append_push_data`.
    #[error("use append_push_data for push opcode 0x{0:02x}")]
    InvalidOpcodeType(u8),

    /// A push ran past the end of the script.
    #[error("not enough data")]
    DataTooSmall,

    /// A push exceeds the largest encodable length.
    #[error("data too big")]
    DataTooBig,

    /// Script is not a P2PKH script.
    #[error("not a P2PKH")]
    NotP2PKH,

    /// The address string could not be decoded.
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress {
        /// The offending input.
        address: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The cashaddr checksum did not verify.
    #[error("checksum failed for '{0}'")]
    ChecksumFailed(String),

    /// The address decoded but its type or hash size is not supported.
    #[error("address not supported: {0}")]
    UnsupportedAddress(String),

    /// The address belongs to a different network.
    #[error("address prefix '{found}' does not match expected '{expected}'")]
    WrongNetwork {
        /// Prefix required by the caller.
        expected: String,
        /// Prefix found in the address.
        found: String,
    },
}
