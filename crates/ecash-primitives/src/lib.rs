//! eCash primitives: hashing, Base58Check, secp256k1 keys and signatures.
//!
//! This crate sits at the bottom of the workspace and has no knowledge of
//! scripts or transactions:
//! - SHA-256, SHA-256d, RIPEMD-160 and Hash160
//! - Base58 / Base58Check (WIF private keys)
//! - secp256k1 private keys, public keys and low-S ECDSA signatures
//! - VarInt plus little-endian byte reader/writer for the wire format

pub mod base58;
pub mod ec;
pub mod hash;
pub mod util;

mod error;
pub use error::PrimitivesError;
