use crate::*;

use std::sync::Arc;
use std::time::Duration;

use hm25_client::{DeployError, Deployer};
use hm25_core::wire::{CHUNK_SIZE, CODE_CHUNK_INPUT_TYPE, HEADER_SIZE, SIGNATURE_LENGTH};

fn sample_bytecode(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[tokio::test]
async fn test_deploy_splits_bytecode_and_reassembles_on_the_node() {
    let node = MockNode::start().await;
    let deployer = Deployer::new(contract_for(&node));
    let source = test_identity(0x11);

    let code = sample_bytecode(2 * CHUNK_SIZE + 512);
    let receipts = deployer
        .deploy(&source, &hex::encode(&code), &MockSigner)
        .await
        .unwrap();

    assert_eq!(receipts.len(), 3);
    for (i, receipt) in receipts.iter().enumerate() {
        assert_eq!(receipt.chunk, i + 1);
        assert_eq!(receipt.target_tick, BASE_TICK + 15 + i as u32);
        assert_eq!(receipt.transaction_id.as_deref(), Some(format!("tx-{}", i + 1).as_str()));
    }

    let broadcasts = node.broadcasts();
    assert_eq!(broadcasts.len(), 3);

    let mut reassembled = Vec::new();
    let mut previous_tick = 0;
    for tx in &broadcasts {
        assert_eq!(&tx[tx.len() - SIGNATURE_LENGTH..], &MOCK_SIGNATURE);
        let (tick, payload) = parse_recorded_tx(tx);
        assert!(tick > previous_tick, "target ticks must advance per chunk");
        previous_tick = tick;
        reassembled.extend_from_slice(&payload);
    }
    assert_eq!(broadcasts[0].len(), HEADER_SIZE + CHUNK_SIZE + SIGNATURE_LENGTH);
    assert_eq!(broadcasts[2].len(), HEADER_SIZE + 512 + SIGNATURE_LENGTH);
    assert_eq!(reassembled, code);
}

#[tokio::test]
async fn test_chunk_transactions_carry_the_contract_header() {
    let node = MockNode::start().await;
    let contract = contract_for(&node);
    let deployer = Deployer::new(contract.clone());
    let source = test_identity(0x22);

    let code = sample_bytecode(600);
    deployer
        .deploy(&source, &hex::encode(&code), &MockSigner)
        .await
        .unwrap();

    let tx = &node.broadcasts()[0];
    assert_eq!(&tx[..32], source.as_bytes());
    assert_eq!(&tx[32..64], contract.contract_identity().as_bytes());
    assert_eq!(i64::from_le_bytes(tx[64..72].try_into().unwrap()), 0);
    assert_eq!(
        u16::from_le_bytes(tx[76..78].try_into().unwrap()),
        CODE_CHUNK_INPUT_TYPE
    );
    assert_eq!(u16::from_le_bytes(tx[78..80].try_into().unwrap()), 600);
    let (_, payload) = parse_recorded_tx(tx);
    assert_eq!(payload, code);
}

#[tokio::test]
async fn test_empty_bytecode_deploys_nothing() {
    let node = MockNode::start().await;
    let deployer = Deployer::new(contract_for(&node));
    let source = test_identity(0x33);

    let receipts = deployer.deploy(&source, "", &MockSigner).await.unwrap();
    assert!(receipts.is_empty());
    let receipts = deployer.deploy(&source, "0x", &MockSigner).await.unwrap();
    assert!(receipts.is_empty());

    assert!(node.broadcasts().is_empty());
}

#[tokio::test]
async fn test_rejected_chunk_aborts_the_remainder() {
    let node = MockNode::start().await;
    node.reject_broadcast_at(2);
    let deployer = Deployer::new(contract_for(&node));
    let source = test_identity(0x44);

    let code = sample_bytecode(3 * CHUNK_SIZE + 428);
    let err = deployer
        .deploy(&source, &hex::encode(&code), &MockSigner)
        .await
        .unwrap_err();

    match err {
        DeployError::ChunkRejected { chunk, total, code, .. } => {
            assert_eq!(chunk, 2);
            assert_eq!(total, 4);
            assert_eq!(code, 3);
        }
        other => panic!("expected chunk rejection, got: {other}"),
    }
    // Chunks 3 and 4 must never have been sent.
    assert_eq!(node.broadcasts().len(), 2);
}

#[tokio::test]
async fn test_invalid_hex_fails_before_any_network_io() {
    let node = MockNode::start().await;
    let deployer = Deployer::new(contract_for(&node));
    let source = test_identity(0x55);

    let err = deployer.deploy(&source, "0xZZ", &MockSigner).await.unwrap_err();
    assert!(matches!(err, DeployError::InvalidHex(_)));
    assert!(node.broadcasts().is_empty());
}

#[tokio::test]
async fn test_concurrent_deploys_are_refused() {
    let node = MockNode::start().await;
    let deployer = Arc::new(Deployer::new(contract_for(&node)));
    let source = test_identity(0x66);
    let code = hex::encode(sample_bytecode(64));

    let first = {
        let deployer = deployer.clone();
        let code = code.clone();
        tokio::spawn(async move {
            deployer
                .deploy(&source, &code, &SlowSigner(Duration::from_millis(300)))
                .await
        })
    };

    // Give the first deployment time to take the guard and park in
    // the signer.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = deployer.deploy(&source, &code, &MockSigner).await;
    assert!(matches!(second, Err(DeployError::InProgress)));

    let receipts = first.await.unwrap().unwrap();
    assert_eq!(receipts.len(), 1);
    assert_eq!(node.broadcasts().len(), 1);
}
