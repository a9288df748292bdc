use crate::*;

use hm25_client::NodeClient;
use hm25_core::wire::HM25_CONTRACT_INDEX;

/// Sanity-check the mock itself: every endpoint the client touches
/// answers, before any behavioral test relies on it.
#[tokio::test]
async fn test_mock_node_serves_all_endpoints() {
    let node = MockNode::start().await;
    let client = NodeClient::new(node.url());

    let tick = client.tick().await.expect("tick-info should answer");
    assert_eq!(tick.tick, BASE_TICK);
    assert_eq!(tick.initial_tick, BASE_TICK);

    let stats = client
        .contract_stats(HM25_CONTRACT_INDEX)
        .await
        .expect("query endpoint should answer");
    assert_eq!(stats.number_of_echo_calls, 0);
    assert_eq!(stats.number_of_burn_calls, 0);

    let balance = client
        .balance("UNKNOWN")
        .await
        .expect("balance endpoint should answer for any identity");
    assert_eq!(balance.balance, 0);

    let response = client
        .broadcast(&[0xAB; 144])
        .await
        .expect("broadcast endpoint should answer");
    assert!(!response.is_rejected());
    assert_eq!(node.broadcasts().len(), 1);
    assert_eq!(node.broadcasts()[0], vec![0xAB; 144]);
}

#[tokio::test]
async fn test_mock_tick_advances_per_request() {
    let node = MockNode::start().await;
    let client = NodeClient::new(node.url());

    let first = client.tick().await.unwrap().tick;
    let second = client.tick().await.unwrap().tick;
    let third = client.tick().await.unwrap().tick;

    assert_eq!(second, first + 1);
    assert_eq!(third, second + 1);
    assert_eq!(node.current_tick(), third + 1);
}
