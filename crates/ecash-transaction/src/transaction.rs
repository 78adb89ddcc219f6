//! Core transaction type.
//!
//! Holds version, inputs, outputs and lock time, with wire serialization,
//! txid computation and per-input sighash lookup.

use ecash_primitives::hash::sha256d;
use ecash_primitives::util::{ByteReader, ByteWriter, VarInt};

use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::sighash;
use crate::TransactionError;

/// Version used for newly built transactions.
pub const DEFAULT_VERSION: u32 = 2;

/// A transaction consisting of a version, inputs, outputs, and a lock time.
///
/// # Wire format
///
/// | Field        | Size                      |
/// |--------------|---------------------------|
/// | version      | 4 bytes (LE)              |
/// | input count  | VarInt                    |
/// | inputs       | variable (per input)      |
/// | output count | VarInt                    |
/// | outputs      | variable (per output)     |
/// | lock_time    | 4 bytes (LE)              |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    /// Create an empty transaction with [`DEFAULT_VERSION`] and lock time 0.
    pub fn new() -> Self {
        Transaction {
            version: DEFAULT_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| TransactionError::SerializationError(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Parse exactly one transaction; trailing bytes are an error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let version = reader
            .read_u32_le()
            .map_err(|e| TransactionError::SerializationError(format!("reading version: {}", e)))?;

        let input_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading input count: {}", e))
        })?;
        // Capacity is bounded by what the reader could possibly hold.
        let mut inputs = Vec::with_capacity((input_count.value() as usize).min(reader.remaining() / 41));
        for _ in 0..input_count.value() {
            inputs.push(TransactionInput::read_from(reader)?);
        }

        let output_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading output count: {}", e))
        })?;
        let mut outputs = Vec::with_capacity((output_count.value() as usize).min(reader.remaining() / 9));
        for _ in 0..output_count.value() {
            outputs.push(TransactionOutput::read_from(reader)?);
        }

        let lock_time = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading lock time: {}", e))
        })?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(256);
        writer.write_u32_le(self.version);

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(&mut writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(&mut writer);
        }

        writer.write_u32_le(self.lock_time);
        writer.into_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn size(&self) -> usize {
        self.to_bytes().len()
    }

    // -----------------------------------------------------------------
    // Transaction ID
    // -----------------------------------------------------------------

    /// Double SHA-256 of the serialized bytes, in internal byte order.
    pub fn tx_id(&self) -> [u8; 32] {
        sha256d(&self.to_bytes())
    }

    /// The txid as conventionally displayed (byte-reversed hex).
    pub fn tx_id_hex(&self) -> String {
        let mut id = self.tx_id();
        id.reverse();
        hex::encode(id)
    }

    // -----------------------------------------------------------------
    // Inputs and outputs
    // -----------------------------------------------------------------

    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
    }

    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Sum of all output values, or `InvalidTransaction` on overflow.
    pub fn total_output_satoshis(&self) -> Result<u64, TransactionError> {
        self.outputs.iter().try_fold(0u64, |acc, o| {
            acc.checked_add(o.satoshis)
                .ok_or_else(|| TransactionError::InvalidTransaction("output value overflow".into()))
        })
    }

    /// Sum of all input values from their attached source outputs.
    ///
    /// Fails if any input lacks source output information.
    pub fn total_input_satoshis(&self) -> Result<u64, TransactionError> {
        self.inputs.iter().enumerate().try_fold(0u64, |acc, (i, input)| {
            let sats = input.source_tx_satoshis().ok_or_else(|| {
                TransactionError::InvalidTransaction(format!("input {} has no source output", i))
            })?;
            acc.checked_add(sats)
                .ok_or_else(|| TransactionError::InvalidTransaction("input value overflow".into()))
        })
    }

    /// The fee this transaction pays: inputs minus outputs.
    ///
    /// Returns `InvalidTransaction` if outputs exceed inputs.
    pub fn fee(&self) -> Result<u64, TransactionError> {
        let inputs = self.total_input_satoshis()?;
        let outputs = self.total_output_satoshis()?;
        inputs.checked_sub(outputs).ok_or_else(|| {
            TransactionError::InvalidTransaction(format!(
                "outputs ({}) exceed inputs ({})",
                outputs, inputs
            ))
        })
    }

    // -----------------------------------------------------------------
    // Signature hash
    // -----------------------------------------------------------------

    /// Sighash for `input_index` using its attached source output.
    pub fn calc_input_signature_hash(
        &self,
        input_index: usize,
        sighash_flag: u32,
    ) -> Result<[u8; 32], TransactionError> {
        let input = self.inputs.get(input_index).ok_or_else(|| {
            TransactionError::InvalidTransaction(format!(
                "input index {} out of range (tx has {} inputs)",
                input_index,
                self.inputs.len()
            ))
        })?;
        let source_output = input.source_tx_output().ok_or_else(|| {
            TransactionError::SigningError(format!("input {} has no source output", input_index))
        })?;

        sighash::signature_hash(
            self,
            input_index,
            source_output.locking_script.to_bytes(),
            sighash_flag,
            source_output.satoshis,
        )
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Transaction {
    /// Display the transaction as its hex-encoded serialization.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
