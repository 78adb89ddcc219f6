//! Script byte newtype.
//!
//! A `Script` is the raw byte sequence of a locking or unlocking script.
//! Only the classifications the payout path needs are provided: P2PKH,
//! P2SH and `OP_RETURN` data outputs.

use std::fmt;

use crate::chunk::{decode_script, push_data_prefix, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

/// A script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Script(Vec<u8>);

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or `InvalidHex`.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str).map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        Ok(Script(bytes))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Standard P2PKH locking script for a 20-byte key hash.
    ///
    /// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`
    pub fn p2pkh(hash: &[u8; 20]) -> Self {
        let mut b = Vec::with_capacity(25);
        b.extend_from_slice(&[OP_DUP, OP_HASH160, OP_DATA_20]);
        b.extend_from_slice(hash);
        b.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
        Script(b)
    }

    /// Standard P2SH locking script for a 20-byte script hash.
    ///
    /// `OP_HASH160 <hash> OP_EQUAL`
    pub fn p2sh(hash: &[u8; 20]) -> Self {
        let mut b = Vec::with_capacity(23);
        b.extend_from_slice(&[OP_HASH160, OP_DATA_20]);
        b.extend_from_slice(hash);
        b.push(OP_EQUAL);
        Script(b)
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Encode the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Return a reference to the underlying bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // -----------------------------------------------------------------------
    // Script classification
    // -----------------------------------------------------------------------

    /// Check if this is a Pay-to-Public-Key-Hash (P2PKH) output script.
    ///
    /// Pattern: OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
    pub fn is_p2pkh(&self) -> bool {
        let b = &self.0;
        b.len() == 25
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_DATA_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
    }

    /// Check if this is a Pay-to-Script-Hash (P2SH) output script.
    ///
    /// Pattern: OP_HASH160 <20 bytes> OP_EQUAL
    pub fn is_p2sh(&self) -> bool {
        let b = &self.0;
        b.len() == 23 && b[0] == OP_HASH160 && b[1] == OP_DATA_20 && b[22] == OP_EQUAL
    }

    /// Whether the script starts with OP_RETURN, making the output
    /// provably unspendable.
    pub fn is_data(&self) -> bool {
        self.0.first() == Some(&OP_RETURN)
    }

    // -----------------------------------------------------------------------
    // Data extraction
    // -----------------------------------------------------------------------

    /// Extract the 20-byte key hash from a P2PKH script.
    ///
    /// # Returns
    /// The hash, or `NotP2PKH` when the script does not match the pattern.
    pub fn public_key_hash(&self) -> Result<[u8; 20], ScriptError> {
        if !self.is_p2pkh() {
            return Err(ScriptError::NotP2PKH);
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&self.0[3..23]);
        Ok(out)
    }

    /// Extract the 20-byte script hash from a P2SH script.
    pub fn script_hash(&self) -> Option<[u8; 20]> {
        if !self.is_p2sh() {
            return None;
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&self.0[2..22]);
        Some(out)
    }

    /// Parse the script into decoded chunks.
    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }

    // -----------------------------------------------------------------------
    // Mutation / building
    // -----------------------------------------------------------------------

    /// Append data bytes with the minimal push prefix.
    ///
    /// # Arguments
    /// * `data` - The data bytes to push.
    ///
    /// # Returns
    /// `Ok(())` on success, or `DataTooBig` if the data cannot be pushed.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append raw opcodes to the script.
    ///
    /// Rejects push opcodes (OP_DATA_1..OP_PUSHDATA4); use
    /// `append_push_data` for those.
    pub fn append_opcodes(&mut self, opcodes: &[u8]) -> Result<(), ScriptError> {
        if let Some(&op) = opcodes.iter().find(|op| is_push_data_op(**op)) {
            return Err(ScriptError::InvalidOpcodeType(op));
        }
        self.0.extend_from_slice(opcodes);
        Ok(())
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
