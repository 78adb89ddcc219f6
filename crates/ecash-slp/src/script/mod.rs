//! SLP script building and parsing.

pub mod send;

pub use send::{build_send_script, parse_send_script, SlpSend};

/// Lokad id prefixing every SLP message.
pub const SLP_LOKAD_ID: &[u8; 4] = b"SLP\0";

/// Transaction type tag for transfers.
pub const SEND: &[u8; 4] = b"SEND";

/// Most amounts a single SEND may carry (outputs 1..=19).
pub const MAX_SEND_OUTPUTS: usize = 19;
