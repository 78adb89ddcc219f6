//! End-to-end payout flow against a ledger reader and a broadcaster.

use tracing::{debug, info};

use ecash_chronik::{Broadcaster, LedgerReader};
use ecash_script::Script;
use ecash_slp::{plain_utxos_by_value, select_token_utxos, TokenProtocol};
use ecash_transaction::template::p2pkh;

use crate::assembler::{AssembledPayout, PayoutPlan, TransactionAssembler};
use crate::config::PayoutConfig;
use crate::{parse_recipient, FundsError, PayoutError};

/// A single payout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    /// `ecash:` cashaddr of the recipient.
    pub recipient_address: String,
    /// Token amount in atoms; must be positive.
    pub requested_atoms: u64,
}

impl SendRequest {
    /// Request `requested_atoms` for `recipient_address`. Checked by
    /// [`validate`](Self::validate), not here.
    pub fn new(recipient_address: impl Into<String>, requested_atoms: u64) -> Self {
        Self {
            recipient_address: recipient_address.into(),
            requested_atoms,
        }
    }

    /// Check the amount, then the recipient, without touching the network.
    ///
    /// # Returns
    /// The recipient's locking script, or `PayoutError::Validation`.
    pub fn validate(&self) -> Result<Script, PayoutError> {
        if self.requested_atoms == 0 {
            return Err(PayoutError::Validation("requested atoms must be greater than zero".into()));
        }
        parse_recipient(&self.recipient_address)
    }
}

/// Runs payouts for one reward wallet.
pub struct PayoutSender<R, B> {
    config: PayoutConfig,
    reader: R,
    broadcaster: B,
}

impl<R: LedgerReader, B: Broadcaster> PayoutSender<R, B> {
    /// Create a sender for the wallet and token in `config`.
    pub fn new(config: PayoutConfig, reader: R, broadcaster: B) -> Self {
        Self {
            config,
            reader,
            broadcaster,
        }
    }

    /// The configuration this sender pays from.
    pub fn config(&self) -> &PayoutConfig {
        &self.config
    }

    /// Build, sign and broadcast a payout.
    ///
    /// # Returns
    /// The txid reported by the broadcaster. Nothing is broadcast when any
    /// earlier step fails.
    pub async fn send(&self, request: &SendRequest) -> Result<String, PayoutError> {
        let payout = self.build(request).await?;
        let txid = self.broadcaster.broadcast_tx(&payout.to_bytes()).await?;
        info!(txid = %txid, fee_sats = payout.fee_sats, "payout broadcast");
        Ok(txid)
    }

    /// Build and sign a payout without broadcasting it.
    pub async fn build(&self, request: &SendRequest) -> Result<AssembledPayout, PayoutError> {
        let recipient = request.validate()?;

        let token_id = &self.config.token_id;
        let token = self.reader.token(token_id).await?;
        if token.token_type.protocol != TokenProtocol::Slp {
            return Err(PayoutError::Protocol(format!(
                "RMZ token is not an SLP token (protocol {})",
                token.token_type.protocol
            )));
        }

        let key = self.config.wallet_key()?;
        let wallet_script: Script = p2pkh::lock_for_key(&key);
        let signer = p2pkh::unlock(key, None);

        let utxos = self.reader.script_utxos(&wallet_script).await?;
        if utxos.is_empty() {
            return Err(FundsError::NoUtxos.into());
        }
        debug!(count = utxos.len(), "wallet utxos");

        let selection = select_token_utxos(&utxos, token_id, TokenProtocol::Slp, request.requested_atoms)?;
        let plain = plain_utxos_by_value(&utxos);

        let plan = PayoutPlan {
            token_id,
            token_type: token.token_type.number,
            recipient: &recipient,
            amount_atoms: request.requested_atoms,
            selection: &selection,
        };
        TransactionAssembler::new(&signer, wallet_script, self.config.fee_policy).assemble(&plan, &plain)
    }
}
