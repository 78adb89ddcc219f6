//! Transaction output with satoshi value and locking script.

use ecash_primitives::util::{ByteReader, ByteWriter, VarInt};
use ecash_script::Script;

use crate::TransactionError;

/// A single output in a transaction.
///
/// The `change` flag marks the slot that [`crate::builder::sign_with_fee`]
/// fills with leftover value. It is never serialized.
///
/// # Wire format
///
/// | Field            | Size           |
/// |------------------|----------------|
/// | satoshis         | 8 bytes (LE)   |
/// | script length    | VarInt         |
/// | locking_script   | variable       |
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionOutput {
    pub satoshis: u64,
    pub locking_script: Script,
    pub change: bool,
}

impl TransactionOutput {
    /// An output with a fixed value.
    pub fn new(satoshis: u64, locking_script: Script) -> Self {
        TransactionOutput {
            satoshis,
            locking_script,
            change: false,
        }
    }

    /// An automatic-change slot paying to `locking_script`. Its value is
    /// assigned at signing time.
    pub fn change_slot(locking_script: Script) -> Self {
        TransactionOutput {
            satoshis: 0,
            locking_script,
            change: true,
        }
    }

    /// Deserialize an output from a `ByteReader`.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let satoshis = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading satoshis: {}", e))
        })?;
        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;
        let script_bytes = reader.read_bytes(script_len.value() as usize).map_err(|e| {
            TransactionError::SerializationError(format!("reading locking script: {}", e))
        })?;

        Ok(TransactionOutput::new(satoshis, Script::from_bytes(script_bytes)))
    }

    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u64_le(self.satoshis);
        let script_bytes = self.locking_script.to_bytes();
        writer.write_varint(VarInt::from(script_bytes.len()));
        writer.write_bytes(script_bytes);
    }

    /// Serialized length in bytes.
    pub fn serialized_len(&self) -> usize {
        8 + VarInt::from(self.locking_script.len()).length() + self.locking_script.len()
    }
}
