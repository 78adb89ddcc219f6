#![deny(missing_docs)]

//! # ecash-chronik
//!
//! Client for the Chronik eCash indexer, covering the three calls a payout
//! needs: token metadata, the UTXO set of a script, and transaction
//! broadcast.
//!
//! The [`LedgerReader`] and [`Broadcaster`] traits are the seams payout code
//! is written against; [`ChronikClient`] implements both over HTTP, speaking the
//! indexer's protobuf messages (see [`proto`]).
//!
//! # Example
//!
//! ```no_run
//! use ecash_chronik::{ChronikClient, ChronikConfig, LedgerReader};
//! use ecash_slp::TokenId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ChronikClient::new(ChronikConfig::new("https://chronik.e.cash/"))?;
//! let token_id: TokenId =
//!     "9e0a9d4720782cf661beaea6c5513f1972e0f3b1541ba4c83f4c87ef65f843dc".parse()?;
//! let info = client.token(&token_id).await?;
//! println!("protocol: {}", info.token_type.protocol);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod proto;
pub mod types;


pub use client::{Broadcaster, ChronikClient, LedgerReader, PROTOBUF_CONTENT_TYPE};
pub use error::ChronikError;
pub use types::ChronikConfig;
