//! eCash script handling.
//!
//! Provides the `Script` byte newtype, opcode constants, push-data
//! encoding and chunk decoding, and cashaddr address parsing that maps
//! `ecash:` addresses to P2PKH / P2SH locking scripts.

pub mod address;
pub mod cashaddr;
pub mod chunk;
pub mod opcodes;
pub mod script;

mod error;
pub use address::{Address, AddressType, Network};
pub use chunk::ScriptChunk;
pub use error::ScriptError;
pub use script::Script;
