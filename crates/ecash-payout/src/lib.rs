//! RMZ token payouts on eCash.
//!
//! Given a recipient cashaddr and an amount of token atoms, selects token
//! and plain UTXOs from the reward wallet, builds an SLP SEND transaction,
//! discovers the fee by adding plain inputs until signing succeeds, and
//! broadcasts the result through Chronik.
//!
//! ```no_run
//! # async fn example() -> Result<(), ecash_payout::PayoutError> {
//! let txid = ecash_payout::send_token_payout(
//!     "ecash:qpm2qsznhks23z7629mms6s4cwef74vcwva87rkuu2",
//!     1_000,
//! )
//! .await?;
//! println!("{txid}");
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod config;
pub mod keys;
pub mod sender;

mod error;

pub use assembler::{AssembledPayout, PayoutPlan, TransactionAssembler};
pub use config::PayoutConfig;
pub use error::{FundsError, PayoutError};
pub use keys::{KeyCodec, KeyDecodeError};
pub use sender::{PayoutSender, SendRequest};

use ecash_chronik::ChronikClient;
use ecash_script::{Address, Network, Script};

/// Validate an `ecash:` recipient and return its locking script.
///
/// Only mainnet cashaddrs with an explicit prefix are accepted.
pub fn parse_recipient(address: &str) -> Result<Script, PayoutError> {
    let has_prefix = address
        .get(..6)
        .is_some_and(|p| p.eq_ignore_ascii_case("ecash:"));
    if !has_prefix {
        return Err(PayoutError::Validation("recipient address must start with ecash:".into()));
    }
    let address = Address::parse_for_network(address, Network::Mainnet)
        .map_err(|e| PayoutError::Validation(format!("recipient address: {e}")))?;
    Ok(address.locking_script())
}

/// Send `requested_atoms` RMZ to `recipient` using configuration from the
/// environment and the configured Chronik indexer.
///
/// The request is validated before the environment is read, so a bad amount
/// or address is reported as `Validation` even when configuration is missing.
pub async fn send_token_payout(recipient: &str, requested_atoms: u64) -> Result<String, PayoutError> {
    let request = SendRequest::new(recipient, requested_atoms);
    request.validate()?;
    let config = PayoutConfig::from_env()?;
    let client = ChronikClient::new(config.chronik_config())?;
    let sender = PayoutSender::new(config, client.clone(), client);
    sender.send(&request).await
}
