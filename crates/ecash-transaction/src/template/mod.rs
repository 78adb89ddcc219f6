//! Unlocking script templates.
//!
//! A template knows how to produce the unlocking script for an input and
//! how large that script can get, which is what fee estimation needs
//! before anything is signed.

pub mod p2pkh;

use ecash_script::Script;

use crate::transaction::Transaction;
use crate::TransactionError;

/// Produces unlocking scripts for the inputs it controls.
pub trait UnlockingScriptTemplate {
    /// Produce the unlocking script for `input_index`.
    ///
    /// The input must carry its source output.
    fn sign(&self, tx: &Transaction, input_index: usize) -> Result<Script, TransactionError>;

    /// Upper bound on the unlocking script length, in bytes.
    fn estimate_length(&self, tx: &Transaction, input_index: usize) -> usize;
}
