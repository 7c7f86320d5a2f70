//! Failover ordering across multiple mock daemons.

use salvium_rpc::{RetryConfig, RpcClient, RpcClientError};
use serde_json::json;

fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        base_delay_ms: 1,
        jitter_ms: 1,
        max_delay_ms: 5,
        request_timeout_ms: 5_000,
    }
}

#[tokio::test]
async fn primary_is_fully_exhausted_before_secondary_is_contacted() {
    let mut node_a = mockito::Server::new_async().await;
    let mut node_b = mockito::Server::new_async().await;
    let mut node_c = mockito::Server::new_async().await;

    let mock_a = node_a
        .mock("POST", "/json_rpc")
        .with_status(500)
        .expect(2)
        .create_async()
        .await;
    let mock_b = node_b
        .mock("POST", "/json_rpc")
        .with_status(200)
        .with_body(r#"{"result":{"height":1000}}"#)
        .expect(1)
        .create_async()
        .await;
    let mock_c = node_c
        .mock("POST", "/json_rpc")
        .with_status(200)
        .with_body(r#"{"result":{"height":9999}}"#)
        .expect(0)
        .create_async()
        .await;

    let endpoints = vec![
        format!("{}/json_rpc", node_a.url()),
        format!("{}/json_rpc", node_b.url()),
        format!("{}/json_rpc", node_c.url()),
    ];
    let client = RpcClient::with_retry(fast_retry(2)).unwrap();
    let result = client
        .call_with_failover(&endpoints, "get_info", json!({}))
        .await
        .unwrap();

    mock_a.assert_async().await;
    mock_b.assert_async().await;
    mock_c.assert_async().await;
    assert_eq!(result, json!({"height": 1000}));
}

#[tokio::test]
async fn all_endpoints_failing_yields_causes_in_endpoint_order() {
    let mut node_a = mockito::Server::new_async().await;
    let mut node_b = mockito::Server::new_async().await;

    node_a
        .mock("POST", "/json_rpc")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;
    node_b
        .mock("POST", "/json_rpc")
        .with_status(200)
        .with_body("not json at all")
        .expect(1)
        .create_async()
        .await;

    let endpoints = vec![
        format!("{}/json_rpc", node_a.url()),
        format!("{}/json_rpc", node_b.url()),
    ];
    let client = RpcClient::with_retry(fast_retry(1)).unwrap();
    let err = client
        .call_with_failover(&endpoints, "get_info", json!({}))
        .await
        .unwrap_err();

    match err {
        RpcClientError::AllEndpointsFailed { causes } => {
            assert_eq!(causes.len(), 2);
            assert_eq!(causes[0].endpoint, endpoints[0]);
            assert_eq!(causes[1].endpoint, endpoints[1]);
            for failure in &causes {
                assert!(matches!(failure.cause, RpcClientError::Exhausted { .. }));
            }
        }
        other => panic!("expected AllEndpointsFailed, got {other:?}"),
    }
}

// End-to-end scenario from the dashboard: the primary seed returns HTTP 500
// for its whole retry budget, the second seed answers first try, the third
// is never touched.
#[tokio::test]
async fn end_to_end_three_seed_failover() {
    let mut n1 = mockito::Server::new_async().await;
    let mut n2 = mockito::Server::new_async().await;
    let mut n3 = mockito::Server::new_async().await;

    let mock_n1 = n1
        .mock("POST", "/json_rpc")
        .with_status(500)
        .expect(3)
        .create_async()
        .await;
    let mock_n2 = n2
        .mock("POST", "/json_rpc")
        .with_status(200)
        .with_body(r#"{"result":{"height":1000,"difficulty":50000}}"#)
        .expect(1)
        .create_async()
        .await;
    let mock_n3 = n3
        .mock("POST", "/json_rpc")
        .expect(0)
        .create_async()
        .await;

    let endpoints = vec![
        format!("{}/json_rpc", n1.url()),
        format!("{}/json_rpc", n2.url()),
        format!("{}/json_rpc", n3.url()),
    ];
    let client = RpcClient::with_retry(fast_retry(3)).unwrap();
    let result = client
        .call_with_failover(&endpoints, "get_info", json!({}))
        .await
        .unwrap();

    mock_n1.assert_async().await;
    mock_n2.assert_async().await;
    mock_n3.assert_async().await;
    assert_eq!(result, json!({"height": 1000, "difficulty": 50000}));
}

#[tokio::test]
async fn empty_endpoint_list_fails_with_no_causes() {
    let client = RpcClient::with_retry(fast_retry(1)).unwrap();
    let err = client
        .call_with_failover(&[], "get_info", json!({}))
        .await
        .unwrap_err();
    match err {
        RpcClientError::AllEndpointsFailed { causes } => assert!(causes.is_empty()),
        other => panic!("expected AllEndpointsFailed, got {other:?}"),
    }
}
