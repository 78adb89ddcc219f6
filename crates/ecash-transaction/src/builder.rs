//! Fee-aware signing.
//!
//! [`sign_with_fee`] takes an unsigned transaction whose inputs carry their
//! source outputs, sizes the fee from the template's unlocking-script bound,
//! fills the automatic-change slot (or drops it below dust) and signs every
//! input.

use ecash_primitives::util::VarInt;
use tracing::debug;

use crate::template::UnlockingScriptTemplate;
use crate::transaction::Transaction;
use crate::TransactionError;

/// Default relay fee rate in satoshis per 1000 bytes.
pub const DEFAULT_FEE_PER_KB: u64 = 1200;

/// Smallest value a standard output may carry.
pub const DEFAULT_DUST_SATS: u64 = 546;

/// Fee rate and dust threshold used when signing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeePolicy {
    pub fee_per_kb: u64,
    pub dust_sats: u64,
}

impl Default for FeePolicy {
    fn default() -> Self {
        FeePolicy {
            fee_per_kb: DEFAULT_FEE_PER_KB,
            dust_sats: DEFAULT_DUST_SATS,
        }
    }
}

impl FeePolicy {
    /// `ceil(size * fee_per_kb / 1000)`.
    pub fn fee_for_size(&self, size: usize) -> u64 {
        (size as u64).saturating_mul(self.fee_per_kb).div_ceil(1000)
    }
}

/// Serialized size once every input carries an unlocking script of the
/// template's estimated length.
pub fn estimate_signed_size<T: UnlockingScriptTemplate>(tx: &Transaction, template: &T) -> usize {
    let mut size = tx.size();
    for (i, input) in tx.inputs.iter().enumerate() {
        let current = input.unlocking_script.as_ref().map_or(0, |s| s.len());
        let estimate = template.estimate_length(tx, i);
        size = size + estimate + VarInt::from(estimate).length()
            - current
            - VarInt::from(current).length();
    }
    size
}

/// Fund and sign `tx` in place.
///
/// Outputs not flagged `change` are fixed. At most one output may be
/// flagged `change`; it receives `inputs - fixed outputs - fee` when that
/// is at least `policy.dust_sats` and is removed otherwise, leaving the
/// remainder to the fee. The fee is sized with the change slot present.
///
/// # Returns
/// The fee actually paid (inputs minus outputs), or
/// `InsufficientInputValue` when the inputs cannot cover the fixed outputs
/// plus the fee. On that error `tx` is left unmodified.
pub fn sign_with_fee<T: UnlockingScriptTemplate>(
    tx: &mut Transaction,
    template: &T,
    policy: &FeePolicy,
) -> Result<u64, TransactionError> {
    if tx.inputs.is_empty() {
        return Err(TransactionError::InvalidTransaction("transaction has no inputs".into()));
    }

    let mut change_slots = tx.outputs.iter().enumerate().filter(|(_, o)| o.change).map(|(i, _)| i);
    let change_idx = change_slots.next();
    if change_slots.next().is_some() {
        return Err(TransactionError::InvalidTransaction(
            "more than one change output".into(),
        ));
    }

    let available = tx.total_input_satoshis()?;
    let fixed = tx
        .outputs
        .iter()
        .filter(|o| !o.change)
        .try_fold(0u64, |acc, o| acc.checked_add(o.satoshis))
        .ok_or_else(|| TransactionError::InvalidTransaction("output value overflow".into()))?;

    let size = estimate_signed_size(tx, template);
    let fee = policy.fee_for_size(size);
    let required = fixed
        .checked_add(fee)
        .ok_or_else(|| TransactionError::InvalidTransaction("output value overflow".into()))?;

    if available < required {
        return Err(TransactionError::InsufficientInputValue { available, required });
    }
    let leftover = available - required;

    debug!(size, fee, leftover, inputs = tx.inputs.len(), "fee estimated");

    if let Some(idx) = change_idx {
        if leftover < policy.dust_sats {
            tx.outputs.remove(idx);
        } else {
            tx.outputs[idx].satoshis = leftover;
        }
    }

    sign_all(tx, template)?;
    tx.fee()
}

/// Sign every input with `template`.
///
/// The FORKID digest does not commit to other inputs' unlocking scripts, so
/// inputs can be signed in any order.
pub fn sign_all<T: UnlockingScriptTemplate>(
    tx: &mut Transaction,
    template: &T,
) -> Result<(), TransactionError> {
    for i in 0..tx.inputs.len() {
        let script = template.sign(tx, i)?;
        tx.inputs[i].unlocking_script = Some(script);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_rounds_up() {
        let policy = FeePolicy::default();
        assert_eq!(policy.fee_for_size(0), 0);
        assert_eq!(policy.fee_for_size(1), 2);
        assert_eq!(policy.fee_for_size(250), 300);
        assert_eq!(policy.fee_for_size(251), 302);
    }

    #[test]
    fn test_default_policy() {
        let policy = FeePolicy::default();
        assert_eq!(policy.fee_per_kb, 1200);
        assert_eq!(policy.dust_sats, 546);
    }
}
