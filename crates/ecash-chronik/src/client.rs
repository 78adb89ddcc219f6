//! Chronik HTTP client and the ledger contracts it fulfils.

use std::future::Future;

use prost::Message;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use tracing::debug;

use ecash_script::Script;
use ecash_slp::{TokenId, TokenInfo, Utxo};

use crate::error::ChronikError;
use crate::proto;
use crate::types::{txid_hex, ChronikConfig};

/// Read-only view of the ledger needed to build a payout.
pub trait LedgerReader {
    /// Metadata for a token.
    fn token(&self, token_id: &TokenId) -> impl Future<Output = Result<TokenInfo, ChronikError>> + Send;

    /// Unspent outputs locked by `script`.
    fn script_utxos(&self, script: &Script) -> impl Future<Output = Result<Vec<Utxo>, ChronikError>> + Send;
}

/// Submits serialized transactions to the network.
pub trait Broadcaster {
    /// Broadcast `raw_tx` and return the txid the network accepted.
    fn broadcast_tx(&self, raw_tx: &[u8]) -> impl Future<Output = Result<String, ChronikError>> + Send;
}

/// HTTP client for a Chronik indexer.
#[derive(Debug, Clone)]
pub struct ChronikClient {
    /// Client configuration.
    config: ChronikConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

/// Media type of every Chronik request and response body.
pub const PROTOBUF_CONTENT_TYPE: &str = "application/x-protobuf";

impl ChronikClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ChronikConfig) -> Result<Self, ChronikError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    /// The configured base URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Fetch token metadata.
    pub async fn get_token(&self, token_id: &TokenId) -> Result<TokenInfo, ChronikError> {
        let msg: proto::TokenInfo = self.get(&format!("token/{}", token_id)).await?;
        TokenInfo::try_from(msg)
    }

    /// Fetch the UTXOs of `script`.
    ///
    /// P2PKH and P2SH scripts are addressed by their hash
    /// (`/script/p2pkh/{hash}/utxos`); anything else by its full hex.
    pub async fn get_script_utxos(&self, script: &Script) -> Result<Vec<Utxo>, ChronikError> {
        let (kind, payload) = script_endpoint(script);
        let msg: proto::ScriptUtxos = self.get(&format!("script/{}/{}/utxos", kind, payload)).await?;
        debug!(kind, payload = %payload, count = msg.utxos.len(), "fetched utxos");
        msg.utxos.into_iter().map(Utxo::try_from).collect()
    }

    /// Broadcast a serialized transaction and return its display-order txid.
    pub async fn post_broadcast_tx(&self, raw_tx: &[u8]) -> Result<String, ChronikError> {
        let url = format!("{}/broadcast-tx", self.config.url);
        let body = proto::BroadcastTxRequest {
            raw_tx: raw_tx.to_vec(),
            skip_token_checks: false,
        };
        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, PROTOBUF_CONTENT_TYPE)
            .body(body.encode_to_vec())
            .send()
            .await?;
        let parsed: proto::BroadcastTxResponse = Self::read_proto(resp).await?;
        txid_hex(&parsed.txid)
    }

    /// Perform a GET request and decode the response.
    async fn get<T: Message + Default>(&self, path: &str) -> Result<T, ChronikError> {
        let url = format!("{}/{}", self.config.url, path);
        let resp = self.client.get(&url).send().await?;
        Self::read_proto(resp).await
    }

    async fn read_proto<T: Message + Default>(resp: Response) -> Result<T, ChronikError> {
        let status = resp.status();

        if status.as_u16() == 404 {
            return Err(ChronikError::NotFound);
        }

        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            return Err(ChronikError::Server {
                status_code: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = resp.bytes().await?;
        Ok(T::decode(body)?)
    }
}

/// The `msg` of a protobuf error body, or the body as text when it is not one.
fn error_message(body: &[u8]) -> String {
    match proto::Error::decode(body) {
        Ok(err) if !err.msg.is_empty() => err.msg,
        _ => String::from_utf8_lossy(body).into_owned(),
    }
}

fn script_endpoint(script: &Script) -> (&'static str, String) {
    if let Ok(hash) = script.public_key_hash() {
        return ("p2pkh", hex::encode(hash));
    }
    if let Some(hash) = script.script_hash() {
        return ("p2sh", hex::encode(hash));
    }
    ("other", script.to_hex())
}

impl LedgerReader for ChronikClient {
    async fn token(&self, token_id: &TokenId) -> Result<TokenInfo, ChronikError> {
        self.get_token(token_id).await
    }

    async fn script_utxos(&self, script: &Script) -> Result<Vec<Utxo>, ChronikError> {
        self.get_script_utxos(script).await
    }
}

impl Broadcaster for ChronikClient {
    async fn broadcast_tx(&self, raw_tx: &[u8]) -> Result<String, ChronikError> {
        self.post_broadcast_tx(raw_tx).await
    }
}
