//! Signature hash computation for transaction signing.
//!
//! eCash inherits the BIP143 digest with the FORKID bit set: the preimage
//! commits to the value of the spent output, which is what lets a signer
//! prove the fee without fetching parent transactions.

use ecash_primitives::hash::sha256d;
use ecash_primitives::util::{ByteWriter, VarInt};

use crate::transaction::Transaction;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Sighash flag constants
// -----------------------------------------------------------------------

pub const SIGHASH_ALL: u32 = 0x01;

/// Replay-protection bit; mandatory on eCash.
pub const SIGHASH_FORKID: u32 = 0x40;

/// The only flag payout inputs are signed with, `0x41`.
pub const SIGHASH_ALL_FORKID: u32 = SIGHASH_ALL | SIGHASH_FORKID;

// -----------------------------------------------------------------------
// BIP143 (FORKID) digest
// -----------------------------------------------------------------------

/// Compute the sighash for one input.
///
/// # Arguments
/// * `tx` - The transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `script_code` - Locking script of the output being spent.
/// * `sighash_type` - Must be `SIGHASH_ALL_FORKID`.
/// * `satoshis` - Value of the output being spent.
///
/// # Returns
/// The 32-byte double-SHA256 digest to sign.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    script_code: &[u8],
    sighash_type: u32,
    satoshis: u64,
) -> Result<[u8; 32], TransactionError> {
    let preimage = calc_preimage(tx, input_index, script_code, sighash_type, satoshis)?;
    Ok(sha256d(&preimage))
}

/// Build the BIP143 preimage:
///
/// `version || hashPrevouts || hashSequence || outpoint || scriptCode ||
/// value || nSequence || hashOutputs || nLockTime || sighashType`
pub fn calc_preimage(
    tx: &Transaction,
    input_index: usize,
    script_code: &[u8],
    sighash_type: u32,
    satoshis: u64,
) -> Result<Vec<u8>, TransactionError> {
    let input = tx.inputs.get(input_index).ok_or_else(|| {
        TransactionError::InvalidTransaction(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        ))
    })?;
    if sighash_type != SIGHASH_ALL_FORKID {
        return Err(TransactionError::SigningError(format!(
            "unsupported sighash type 0x{:02x}, expected ALL|FORKID",
            sighash_type
        )));
    }

    let hash_prevouts = prevouts_hash(tx);
    let hash_sequence = sequence_hash(tx);
    let hash_outputs = outputs_hash(tx);

    let mut writer = ByteWriter::with_capacity(156 + script_code.len());
    writer.write_u32_le(tx.version);
    writer.write_bytes(&hash_prevouts);
    writer.write_bytes(&hash_sequence);
    writer.write_bytes(&input.source_txid);
    writer.write_u32_le(input.source_tx_out_index);
    writer.write_varint(VarInt::from(script_code.len()));
    writer.write_bytes(script_code);
    writer.write_u64_le(satoshis);
    writer.write_u32_le(input.sequence_number);
    writer.write_bytes(&hash_outputs);
    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(sighash_type);
    Ok(writer.into_bytes())
}

fn prevouts_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = ByteWriter::with_capacity(tx.inputs.len() * 36);
    for input in &tx.inputs {
        writer.write_bytes(&input.source_txid);
        writer.write_u32_le(input.source_tx_out_index);
    }
    sha256d(writer.as_bytes())
}

fn sequence_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = ByteWriter::with_capacity(tx.inputs.len() * 4);
    for input in &tx.inputs {
        writer.write_u32_le(input.sequence_number);
    }
    sha256d(writer.as_bytes())
}

fn outputs_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = ByteWriter::new();
    for output in &tx.outputs {
        output.write_to(&mut writer);
    }
    sha256d(writer.as_bytes())
}
