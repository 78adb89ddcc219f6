//! Payout transaction assembly and fee discovery.
//!
//! Output layout is fixed:
//!
//! | index | value | script                               |
//! |-------|-------|--------------------------------------|
//! | 0     | 0     | SLP SEND `[amount]` or `[amount, change]` |
//! | 1     | dust  | recipient                            |
//! | 2     | dust  | wallet (only when token change > 0)  |
//! | last  | auto  | wallet change slot                   |
//!
//! Inputs start with the selected token UTXOs. Whenever signing reports an
//! input shortfall the next largest plain UTXO is appended and signing is
//! retried, so at most `plain.len() + 1` attempts are made.

use tracing::{debug, info, warn};

use ecash_script::Script;
use ecash_slp::{build_send_script, Outpoint, PlainUtxo, SelectionResult, TokenId};
use ecash_transaction::template::UnlockingScriptTemplate;
use ecash_transaction::{sign_with_fee, FeePolicy, Transaction, TransactionError, TransactionInput, TransactionOutput};

use crate::{FundsError, PayoutError};

/// A signed payout ready to broadcast.
#[derive(Debug, Clone)]
pub struct AssembledPayout {
    /// The signed transaction.
    pub tx: Transaction,
    /// Inputs minus outputs.
    pub fee_sats: u64,
    /// Token UTXOs spent, always the leading inputs.
    pub token_inputs: usize,
    /// Plain UTXOs spent to cover dust and fees.
    pub fee_inputs: usize,
    /// Atoms returned to the wallet at output 2, `0` when there is none.
    pub token_change_atoms: u64,
    /// Signing attempts made, including the successful one.
    pub attempts: usize,
}

impl AssembledPayout {
    /// Serialized transaction.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.tx.to_bytes()
    }
}

/// What to pay and which token inputs fund it.
#[derive(Debug, Clone, Copy)]
pub struct PayoutPlan<'a> {
    /// Token being sent.
    pub token_id: &'a TokenId,
    /// SLP type number pushed in the SEND message.
    pub token_type: u8,
    /// Locking script of the recipient output.
    pub recipient: &'a Script,
    /// Atoms paid to the recipient.
    pub amount_atoms: u64,
    /// Token inputs and their change.
    pub selection: &'a SelectionResult,
}

/// Builds and signs payouts spending outputs locked to `wallet_script`.
pub struct TransactionAssembler<'a, T: UnlockingScriptTemplate> {
    signer: &'a T,
    wallet_script: Script,
    policy: FeePolicy,
}

impl<'a, T: UnlockingScriptTemplate> TransactionAssembler<'a, T> {
    /// Assembler signing every input with `signer`; change goes to `wallet_script`.
    pub fn new(signer: &'a T, wallet_script: Script, policy: FeePolicy) -> Self {
        Self {
            signer,
            wallet_script,
            policy,
        }
    }

    /// Run the fee-discovery loop.
    ///
    /// # Arguments
    /// * `plan` - Token side of the payout.
    /// * `plain` - Fee candidates, already ordered largest first.
    ///
    /// # Returns
    /// The signed payout, `FundsError::InsufficientPlainValue` once every
    /// candidate is spent without covering the outputs, or the signing error
    /// unchanged for any other failure.
    pub fn assemble(&self, plan: &PayoutPlan<'_>, plain: &[PlainUtxo]) -> Result<AssembledPayout, PayoutError> {
        let change_atoms = plan.selection.change_atoms;
        let amounts: Vec<u64> = if change_atoms > 0 {
            vec![plan.amount_atoms, change_atoms]
        } else {
            vec![plan.amount_atoms]
        };
        let marker = build_send_script(plan.token_id, plan.token_type, &amounts)?;

        let mut fee_inputs = 0;
        let mut attempts = 0;
        loop {
            attempts += 1;
            let mut tx = self.candidate(&marker, plan, &plain[..fee_inputs])?;
            debug!(attempt = attempts, inputs = tx.input_count(), fee_inputs, "signing payout candidate");

            match sign_with_fee(&mut tx, self.signer, &self.policy) {
                Ok(fee_sats) => {
                    info!(
                        inputs = tx.input_count(),
                        outputs = tx.output_count(),
                        fee_sats,
                        token_atoms = plan.amount_atoms,
                        token_change = change_atoms,
                        "payout built"
                    );
                    return Ok(AssembledPayout {
                        tx,
                        fee_sats,
                        token_inputs: plan.selection.inputs.len(),
                        fee_inputs,
                        token_change_atoms: change_atoms,
                        attempts,
                    });
                }
                Err(e @ TransactionError::InsufficientInputValue { .. }) => {
                    if fee_inputs == plain.len() {
                        warn!(attempts, candidates = plain.len(), error = %e, "fee candidates exhausted");
                        return Err(FundsError::InsufficientPlainValue { last_error: e }.into());
                    }
                    debug!(error = %e, "adding fee input");
                    fee_inputs += 1;
                }
                Err(e) => return Err(PayoutError::Transaction(e)),
            }
        }
    }

    fn candidate(&self, marker: &Script, plan: &PayoutPlan<'_>, fee: &[PlainUtxo]) -> Result<Transaction, PayoutError> {
        let mut tx = Transaction::new();

        for utxo in &plan.selection.inputs {
            tx.add_input(self.input(&utxo.outpoint, utxo.sats)?);
        }
        for utxo in fee {
            tx.add_input(self.input(&utxo.outpoint, utxo.sats)?);
        }

        tx.add_output(TransactionOutput::new(0, marker.clone()));
        tx.add_output(TransactionOutput::new(self.policy.dust_sats, plan.recipient.clone()));
        if plan.selection.change_atoms > 0 {
            tx.add_output(TransactionOutput::new(self.policy.dust_sats, self.wallet_script.clone()));
        }
        tx.add_output(TransactionOutput::change_slot(self.wallet_script.clone()));
        Ok(tx)
    }

    fn input(&self, outpoint: &Outpoint, sats: u64) -> Result<TransactionInput, TransactionError> {
        TransactionInput::from_outpoint(
            &outpoint.txid,
            outpoint.out_idx,
            TransactionOutput::new(sats, self.wallet_script.clone()),
        )
    }
}
