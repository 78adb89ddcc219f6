//! Full payout against a mock Chronik server.

use prost::Message;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ecash_chronik::proto::{self, token_type};
use ecash_chronik::{ChronikClient, ChronikError, PROTOBUF_CONTENT_TYPE};
use ecash_payout::{PayoutConfig, PayoutError, PayoutSender, SendRequest};
use ecash_primitives::ec::PrivateKey;
use ecash_slp::parse_send_script;
use ecash_transaction::Transaction;

const TOKEN: &str = "9e0a9d4720782cf661beaea6c5513f1972e0f3b1541ba4c83f4c87ef65f843dc";
const WIF: &str = "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn";
const RECIPIENT: &str = "ecash:qpm2qsznhks23z7629mms6s4cwef74vcwva87rkuu2";

fn config(url: &str) -> PayoutConfig {
    let url = format!("{url}/");
    PayoutConfig::from_lookup(|key| match key {
        "CHRONIK_URL" => Some(url.clone()),
        "RMZ_TOKEN_ID" => Some(TOKEN.into()),
        "REWARD_WALLET_WIF" => Some(WIF.into()),
        _ => None,
    })
    .expect("complete config")
}

fn wallet_pkh() -> String {
    hex::encode(PrivateKey::from_wif(WIF).expect("valid wif").pub_key().hash160())
}

fn protobuf(status: u16, msg: &impl Message) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(msg.encode_to_vec(), PROTOBUF_CONTENT_TYPE)
}

fn slp_fungible() -> Option<proto::TokenType> {
    Some(proto::TokenType { token_type: Some(token_type::TokenType::Slp(1)) })
}

fn rmz_utxo(txid_byte: u8, out_idx: u32, atoms: u64) -> proto::ScriptUtxo {
    proto::ScriptUtxo {
        outpoint: Some(proto::OutPoint { txid: vec![txid_byte; 32], out_idx }),
        block_height: 850_000,
        sats: 546,
        is_final: true,
        token: Some(proto::Token {
            token_id: TOKEN.into(),
            token_type: slp_fungible(),
            entry_idx: -1,
            atoms,
            is_mint_baton: false,
        }),
        ..Default::default()
    }
}

async fn mount_token(server: &MockServer, token_type: Option<proto::TokenType>) {
    Mock::given(method("GET"))
        .and(path(format!("/token/{TOKEN}")))
        .respond_with(protobuf(200, &proto::TokenInfo { token_id: TOKEN.into(), token_type }))
        .mount(server)
        .await;
}

async fn mount_utxos(server: &MockServer) {
    let pkh = wallet_pkh();
    let utxos = proto::ScriptUtxos {
        output_script: hex::decode(format!("76a914{pkh}88ac")).expect("hex"),
        utxos: vec![
            rmz_utxo(0x11, 1, 600),
            rmz_utxo(0x22, 0, 500),
            proto::ScriptUtxo {
                outpoint: Some(proto::OutPoint { txid: vec![0x33; 32], out_idx: 2 }),
                block_height: -1,
                sats: 2000,
                ..Default::default()
            },
        ],
    };
    Mock::given(method("GET"))
        .and(path(format!("/script/p2pkh/{pkh}/utxos")))
        .respond_with(protobuf(200, &utxos))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_payout_over_http() {
    let server = MockServer::start().await;
    mount_token(&server, slp_fungible()).await;
    mount_utxos(&server).await;

    Mock::given(method("POST"))
        .and(path("/broadcast-tx"))
        .respond_with(protobuf(200, &proto::BroadcastTxResponse { txid: vec![0xab; 32] }))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server.uri());
    let client = ChronikClient::new(config.chronik_config()).expect("client");
    let sender = PayoutSender::new(config, client.clone(), client);

    let txid = sender.send(&SendRequest::new(RECIPIENT, 1000)).await.expect("payout succeeds");
    assert_eq!(txid, "ab".repeat(32));

    let requests = server.received_requests().await.expect("recording on");
    let broadcast = requests
        .iter()
        .find(|r| r.url.path() == "/broadcast-tx")
        .expect("broadcast request");
    let body = proto::BroadcastTxRequest::decode(broadcast.body.as_slice()).expect("protobuf body");
    assert!(!body.skip_token_checks);

    let tx = Transaction::from_bytes(&body.raw_tx).expect("valid tx");
    assert_eq!(tx.input_count(), 3);
    let send = parse_send_script(&tx.outputs[0].locking_script).expect("SEND marker");
    assert_eq!(send.amounts, vec![1000, 100]);
}

#[tokio::test]
async fn test_non_slp_token_over_http() {
    let server = MockServer::start().await;
    mount_token(
        &server,
        Some(proto::TokenType { token_type: Some(token_type::TokenType::Alp(0)) }),
    )
    .await;

    let config = config(&server.uri());
    let client = ChronikClient::new(config.chronik_config()).expect("client");
    let sender = PayoutSender::new(config, client.clone(), client);

    let err = sender.send(&SendRequest::new(RECIPIENT, 1000)).await.expect_err("ALP token");
    assert!(matches!(err, PayoutError::Protocol(_)));

    let requests = server.received_requests().await.expect("recording on");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_broadcast_rejection_propagates() {
    let server = MockServer::start().await;
    mount_token(&server, slp_fungible()).await;
    mount_utxos(&server).await;

    Mock::given(method("POST"))
        .and(path("/broadcast-tx"))
        .respond_with(protobuf(400, &proto::Error { msg: "txn-mempool-conflict".into() }))
        .mount(&server)
        .await;

    let config = config(&server.uri());
    let client = ChronikClient::new(config.chronik_config()).expect("client");
    let sender = PayoutSender::new(config, client.clone(), client);

    match sender.send(&SendRequest::new(RECIPIENT, 1000)).await {
        Err(PayoutError::Network(ChronikError::Server { status_code, message })) => {
            assert_eq!(status_code, 400);
            assert_eq!(message, "txn-mempool-conflict");
        }
        other => panic!("expected Network error, got {:?}", other),
    }
}
