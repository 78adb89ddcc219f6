//! Transaction input referencing a previous output.
//!
//! An input carries the outpoint it spends, its unlocking script once
//! signed, and (for inputs this wallet signs) a copy of the source output
//! so the sighash can commit to its value and script.

use ecash_primitives::util::{ByteReader, ByteWriter, VarInt};
use ecash_script::Script;

use crate::output::TransactionOutput;
use crate::TransactionError;

/// Default sequence number indicating a finalized input (no relative lock-time).
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// A single input in a transaction.
///
/// # Wire format
///
/// | Field               | Size             |
/// |---------------------|------------------|
/// | source_txid         | 32 bytes (LE)    |
/// | source_tx_out_index | 4 bytes (LE)     |
/// | script length       | VarInt           |
/// | unlocking_script    | variable         |
/// | sequence_number     | 4 bytes (LE)     |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    /// Txid of the output being spent, in internal (little-endian) order.
    pub source_txid: [u8; 32],

    pub source_tx_out_index: u32,

    pub sequence_number: u32,

    /// `None` until the input is signed.
    pub unlocking_script: Option<Script>,

    source_output: Option<TransactionOutput>,
}

impl TransactionInput {
    /// Create an input with a zeroed outpoint and finalized sequence.
    pub fn new() -> Self {
        TransactionInput {
            source_txid: [0u8; 32],
            source_tx_out_index: 0,
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
            unlocking_script: None,
            source_output: None,
        }
    }

    /// Build an unsigned input spending `txid:vout`.
    ///
    /// # Arguments
    /// * `txid_hex` - Txid in display (big-endian) hex order.
    /// * `vout` - Output index being spent.
    /// * `source_output` - Value and locking script of the spent output.
    ///
    /// # Returns
    /// The input, or `SerializationError` if the txid is not 32 bytes of hex.
    pub fn from_outpoint(
        txid_hex: &str,
        vout: u32,
        source_output: TransactionOutput,
    ) -> Result<Self, TransactionError> {
        let bytes = hex::decode(txid_hex)
            .map_err(|e| TransactionError::SerializationError(format!("invalid txid hex: {}", e)))?;
        let mut source_txid: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            TransactionError::SerializationError(format!("txid must be 32 bytes, got {}", bytes.len()))
        })?;
        source_txid.reverse();

        Ok(TransactionInput {
            source_txid,
            source_tx_out_index: vout,
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
            unlocking_script: None,
            source_output: Some(source_output),
        })
    }

    /// Deserialize an input from a `ByteReader`.
    ///
    /// Source output information is not part of the wire format and is left
    /// unset.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let txid_bytes = reader.read_bytes(32).map_err(|e| {
            TransactionError::SerializationError(format!("reading source txid: {}", e))
        })?;
        let mut source_txid = [0u8; 32];
        source_txid.copy_from_slice(txid_bytes);

        let source_tx_out_index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output index: {}", e))
        })?;
        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;
        let script_bytes = reader.read_bytes(script_len.value() as usize).map_err(|e| {
            TransactionError::SerializationError(format!("reading unlocking script: {}", e))
        })?;
        let sequence_number = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence number: {}", e))
        })?;

        let unlocking_script = if script_bytes.is_empty() {
            None
        } else {
            Some(Script::from_bytes(script_bytes))
        };

        Ok(TransactionInput {
            source_txid,
            source_tx_out_index,
            sequence_number,
            unlocking_script,
            source_output: None,
        })
    }

    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_bytes(&self.source_txid);
        writer.write_u32_le(self.source_tx_out_index);
        let script = self.unlocking_script.as_ref().map(|s| s.to_bytes()).unwrap_or(&[]);
        writer.write_var_bytes(script);
        writer.write_u32_le(self.sequence_number);
    }

    /// Txid of the spent output in display order.
    pub fn source_txid_hex(&self) -> String {
        let mut id = self.source_txid;
        id.reverse();
        hex::encode(id)
    }

    pub fn set_source_output(&mut self, output: Option<TransactionOutput>) {
        self.source_output = output;
    }

    pub fn source_tx_output(&self) -> Option<&TransactionOutput> {
        self.source_output.as_ref()
    }

    pub fn source_tx_satoshis(&self) -> Option<u64> {
        self.source_output.as_ref().map(|o| o.satoshis)
    }
}

impl Default for TransactionInput {
    fn default() -> Self {
        Self::new()
    }
}
