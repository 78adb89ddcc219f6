//! eCash transaction building, signing, and serialization.
//!
//! Provides the `Transaction` type with inputs and outputs, the BIP143
//! FORKID signature hash, a P2PKH unlocking template, and a fee-aware
//! signer that fills an automatic-change output.

pub mod builder;
pub mod input;
pub mod output;
pub mod sighash;
pub mod template;
pub mod transaction;

mod error;
pub use builder::{sign_with_fee, FeePolicy};
pub use error::TransactionError;
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use transaction::Transaction;
