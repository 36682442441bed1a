//! Full pipeline against mock node and model endpoints.

mod common;

use alloy::consensus::{SignableTransaction, Transaction, TxEnvelope};
use alloy::eips::eip2718::Decodable2718;
use alloy::primitives::{hex, keccak256, Address, TxKind, U256};
use common::{start_mock_model, test_config, test_secrets, MockNode, NodeBehavior, TEST_CHAIN_ID};
use hbar_agent::lifecycle::{bootstrap, StartupError};
use hbar_agent::pipeline::{FailureKind, PipelineStage};

const RECIPIENT: &str = "0x472e78859dcd440bfa657062b4eb666a0d97cafa";

#[tokio::test]
async fn test_transfer_is_signed_and_broadcast() {
    let node = MockNode::start(NodeBehavior::default()).await;
    let model =
        start_mock_model("Amount: 50 HBAR, Address: 0x472e78859dcd440bfa657062b4eb666a0d97cafa").await;
    let agent = bootstrap(&test_config(&node.url(), &model), &test_secrets())
        .await
        .unwrap();

    let run = agent.submit("Send 50 HBAR to 0x472e78859dcd440bfa657062b4eb666a0d97cafa").await;

    assert_eq!(run.stage, PipelineStage::Succeeded, "{}", run.reply());
    assert_eq!(
        node.calls(),
        vec![
            "eth_chainId",
            "eth_getTransactionCount",
            "eth_gasPrice",
            "eth_sendRawTransaction"
        ]
    );

    let raw = hex::decode(&node.submitted()[0]).unwrap();
    assert_eq!(run.tx_hash(), Some(keccak256(&raw)));

    let tx = TxEnvelope::decode_2718(&mut raw.as_slice()).unwrap();
    assert_eq!(tx.nonce(), 3);
    assert_eq!(tx.gas_price(), Some(1));
    assert_eq!(tx.gas_limit(), 3_000_000);
    assert_eq!(tx.chain_id(), Some(TEST_CHAIN_ID));
    let to: Address = RECIPIENT.parse().unwrap();
    assert_eq!(tx.kind(), TxKind::Call(to));
    assert_eq!(tx.value(), U256::from(50u64) * U256::from(10u64).pow(U256::from(18u64)));

    let TxEnvelope::Legacy(legacy) = tx else {
        panic!("expected a legacy transaction");
    };
    let recovered = legacy
        .signature()
        .recover_address_from_prehash(&legacy.tx().signature_hash())
        .unwrap();
    assert_eq!(recovered, agent.sender());
    assert!(run.reply().starts_with("Transaction successful! Hash: 0x"));
}

#[tokio::test]
async fn test_node_rejection_is_reported_verbatim() {
    let node = MockNode::start(NodeBehavior {
        reject_with: Some("insufficient payer balance".into()),
        ..NodeBehavior::default()
    })
    .await;
    let model = start_mock_model("Amount: 1.5 HBAR, Address: 0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359").await;
    let agent = bootstrap(&test_config(&node.url(), &model), &test_secrets())
        .await
        .unwrap();

    let run = agent.submit("send 1.5 HBAR").await;

    assert_eq!(run.stage, PipelineStage::Failed(FailureKind::NetworkError));
    assert_eq!(run.reply(), "Transaction failed: insufficient payer balance");
    assert_eq!(node.count("eth_sendRawTransaction"), 1);
}

#[tokio::test]
async fn test_invalid_request_never_touches_node() {
    let node = MockNode::start(NodeBehavior::default()).await;
    let model = start_mock_model("Invalid transaction request").await;
    let agent = bootstrap(&test_config(&node.url(), &model), &test_secrets())
        .await
        .unwrap();

    let reply = agent.handle_user_message("what's the weather?").await;

    assert_eq!(
        reply,
        "Sorry, I couldn't extract the amount and address. Please try again with a valid request."
    );
    assert_eq!(node.calls(), vec!["eth_chainId"]);
}

#[tokio::test]
async fn test_startup_fails_when_node_unreachable() {
    let model = start_mock_model("Invalid transaction request").await;
    let config = test_config("http://127.0.0.1:1", &model);

    let err = bootstrap(&config, &test_secrets()).await.unwrap_err();
    assert!(matches!(err, StartupError::Blockchain(_)), "{err}");
}

#[tokio::test]
async fn test_startup_rejects_chain_mismatch() {
    let node = MockNode::start(NodeBehavior::default()).await;
    let model = start_mock_model("Invalid transaction request").await;
    let mut config = test_config(&node.url(), &model);
    config.ledger.chain_id = Some(295);

    let err = bootstrap(&config, &test_secrets()).await.unwrap_err();
    assert!(err.to_string().contains("295"), "{err}");
}

#[tokio::test]
async fn test_startup_rejects_foreign_sender() {
    let node = MockNode::start(NodeBehavior::default()).await;
    let model = start_mock_model("Invalid transaction request").await;
    let mut config = test_config(&node.url(), &model);
    config.ledger.sender_address = RECIPIENT.to_string();

    let err = bootstrap(&config, &test_secrets()).await.unwrap_err();
    assert!(matches!(err, StartupError::SenderMismatch { .. }), "{err}");
}

#[tokio::test]
async fn test_startup_reports_malformed_key_as_wallet_error() {
    let node = MockNode::start(NodeBehavior::default()).await;
    let model = start_mock_model("Invalid transaction request").await;
    let config = test_config(&node.url(), &model);
    let mut secrets = test_secrets();
    secrets.private_key = "not-a-key".to_string().into();

    let err = bootstrap(&config, &secrets).await.unwrap_err();
    assert!(matches!(err, StartupError::Wallet(_)), "{err}");
    assert!(err.to_string().starts_with("signing key: Invalid private key"), "{err}");
}
