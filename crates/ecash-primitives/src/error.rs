/// Errors raised by key handling, encoding and wire decoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// Base58Check decoded but the WIF framing is wrong.
    #[error("invalid WIF: {0}")]
    InvalidWif(String),

    #[error("base58check checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("unexpected end of data: needed {needed} bytes, {remaining} left")]
    UnexpectedEof { needed: usize, remaining: usize },
}
