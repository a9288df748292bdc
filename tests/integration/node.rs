use crate::*;

use hm25_client::{ClientError, NodeClient, SubmitError};
use hm25_core::wire::{HEADER_SIZE, PROC_BURN, PROC_ECHO, SIGNATURE_LENGTH};
use serde_json::json;

#[tokio::test]
async fn test_contract_stats_round_trip() {
    let node = MockNode::start().await;
    node.set_stats(7, 9);

    let stats = contract_for(&node).stats().await.unwrap();
    assert_eq!(stats.number_of_echo_calls, 7);
    assert_eq!(stats.number_of_burn_calls, 9);
}

#[tokio::test]
async fn test_short_stats_payload_reads_as_zero() {
    let node = MockNode::start().await;
    node.set_stats_raw(vec![1u8; 8]);

    let stats = contract_for(&node).stats().await.unwrap();
    assert_eq!(stats.number_of_echo_calls, 0);
    assert_eq!(stats.number_of_burn_calls, 0);
}

#[tokio::test]
async fn test_missing_response_data_is_an_error() {
    let node = MockNode::start().await;
    node.clear_stats_response();

    let err = contract_for(&node).stats().await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_balance_accepts_string_and_number_forms() {
    let node = MockNode::start().await;
    node.set_balance_body(
        "STRINGY",
        json!({ "balance": { "id": "STRINGY", "balance": "1500", "validForTick": 12 } }),
    );
    node.set_balance_body(
        "NUMERIC",
        json!({ "balance": { "id": "NUMERIC", "balance": 7, "validForTick": 12 } }),
    );

    let client = NodeClient::new(node.url());
    assert_eq!(client.balance("STRINGY").await.unwrap().balance, 1500);
    assert_eq!(client.balance("NUMERIC").await.unwrap().balance, 7);
}

#[tokio::test]
async fn test_submit_echo_encodes_header_and_signs() {
    let node = MockNode::start().await;
    let contract = contract_for(&node);
    let source = test_identity(0xAA);

    let receipt = contract.submit_echo(&source, 42, &MockSigner).await.unwrap();
    assert_eq!(receipt.target_tick, BASE_TICK + 15);

    let broadcasts = node.broadcasts();
    assert_eq!(broadcasts.len(), 1);
    let tx = &broadcasts[0];

    assert_eq!(tx.len(), HEADER_SIZE + SIGNATURE_LENGTH);
    assert_eq!(&tx[..32], &[0xAA; 32]);
    assert_eq!(&tx[32..64], contract.contract_identity().as_bytes());
    assert_eq!(i64::from_le_bytes(tx[64..72].try_into().unwrap()), 42);
    assert_eq!(u32::from_le_bytes(tx[72..76].try_into().unwrap()), BASE_TICK + 15);
    assert_eq!(u16::from_le_bytes(tx[76..78].try_into().unwrap()), PROC_ECHO);
    assert_eq!(u16::from_le_bytes(tx[78..80].try_into().unwrap()), 0);
    assert_eq!(&tx[HEADER_SIZE..], &MOCK_SIGNATURE);
}

#[tokio::test]
async fn test_submit_burn_uses_burn_procedure() {
    let node = MockNode::start().await;
    let contract = contract_for(&node);
    let source = test_identity(0xBB);

    contract.submit_burn(&source, 1_000, &MockSigner).await.unwrap();

    let tx = &node.broadcasts()[0];
    assert_eq!(u16::from_le_bytes(tx[76..78].try_into().unwrap()), PROC_BURN);
    assert_eq!(i64::from_le_bytes(tx[64..72].try_into().unwrap()), 1_000);
}

#[tokio::test]
async fn test_rejected_broadcast_surfaces_code_and_message() {
    let node = MockNode::start().await;
    node.reject_broadcast_at(1);
    let contract = contract_for(&node);
    let source = test_identity(0xCC);

    let err = contract.submit_echo(&source, 5, &MockSigner).await.unwrap_err();
    match err {
        SubmitError::Rejected { code, message } => {
            assert_eq!(code, 3);
            assert_eq!(message, "tick in the past");
        }
        other => panic!("expected rejection, got: {other}"),
    }
}
