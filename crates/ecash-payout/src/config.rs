//! Payout configuration from environment variables.
//!
//! | variable                  | required | default |
//! |---------------------------|----------|---------|
//! | `CHRONIK_URL`             | yes      |         |
//! | `RMZ_TOKEN_ID`            | yes      |         |
//! | `REWARD_WALLET_WIF`       | yes      |         |
//! | `REWARD_WALLET_KEY_CODEC` | no       | `wif`   |
//! | `RMZ_FEE_PER_KB`          | no       | 1200    |
//! | `RMZ_DUST_SATS`           | no       | 546     |

use std::fmt;

use zeroize::Zeroizing;

use ecash_chronik::ChronikConfig;
use ecash_primitives::ec::PrivateKey;
use ecash_slp::TokenId;
use ecash_transaction::FeePolicy;

use crate::keys::KeyCodec;
use crate::PayoutError;

pub const CHRONIK_URL: &str = "CHRONIK_URL";
pub const RMZ_TOKEN_ID: &str = "RMZ_TOKEN_ID";
pub const REWARD_WALLET_WIF: &str = "REWARD_WALLET_WIF";
pub const REWARD_WALLET_KEY_CODEC: &str = "REWARD_WALLET_KEY_CODEC";
pub const RMZ_FEE_PER_KB: &str = "RMZ_FEE_PER_KB";
pub const RMZ_DUST_SATS: &str = "RMZ_DUST_SATS";

/// Everything a payout needs besides the request itself.
#[derive(Clone)]
pub struct PayoutConfig {
    /// Indexer base URL, trailing slashes removed.
    pub chronik_url: String,
    pub token_id: TokenId,
    pub key_codec: KeyCodec,
    pub fee_policy: FeePolicy,
    wallet_secret: Zeroizing<String>,
}

impl PayoutConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, PayoutError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PayoutError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).ok_or_else(|| PayoutError::Config(format!("{key} is not set")));

        let chronik_url = require(CHRONIK_URL)?.trim().trim_end_matches('/').to_string();
        let token_id = require(RMZ_TOKEN_ID)?
            .trim()
            .parse::<TokenId>()
            .map_err(|e| PayoutError::Config(format!("{RMZ_TOKEN_ID}: {e}")))?;
        let wallet_secret = Zeroizing::new(require(REWARD_WALLET_WIF)?.trim().to_string());

        let key_codec = match get(REWARD_WALLET_KEY_CODEC) {
            Some(v) => v.parse().map_err(|e| PayoutError::Config(format!("{REWARD_WALLET_KEY_CODEC}: {e}")))?,
            None => KeyCodec::default(),
        };

        let defaults = FeePolicy::default();
        let fee_policy = FeePolicy {
            fee_per_kb: parse_u64(get(RMZ_FEE_PER_KB), RMZ_FEE_PER_KB, defaults.fee_per_kb)?,
            dust_sats: parse_u64(get(RMZ_DUST_SATS), RMZ_DUST_SATS, defaults.dust_sats)?,
        };

        Ok(PayoutConfig {
            chronik_url,
            token_id,
            key_codec,
            fee_policy,
            wallet_secret,
        })
    }

    /// Decode the wallet key with the configured codec.
    pub fn wallet_key(&self) -> Result<PrivateKey, PayoutError> {
        Ok(self.key_codec.decode(&self.wallet_secret)?)
    }

    /// Indexer client settings.
    pub fn chronik_config(&self) -> ChronikConfig {
        ChronikConfig::new(&self.chronik_url)
    }
}

fn parse_u64(value: Option<String>, key: &str, default: u64) -> Result<u64, PayoutError> {
    match value {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| PayoutError::Config(format!("{key} must be a non-negative integer, got {v:?}"))),
    }
}

impl fmt::Debug for PayoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayoutConfig")
            .field("chronik_url", &self.chronik_url)
            .field("token_id", &self.token_id)
            .field("key_codec", &self.key_codec)
            .field("fee_policy", &self.fee_policy)
            .field("wallet_secret", &"<redacted>")
            .finish()
    }
}
