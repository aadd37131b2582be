use std::{future::Future, sync::Arc, time::Duration};

use alloy::{
    eips::BlockNumberOrTag,
    primitives::U64,
    providers::{Provider, RootProvider},
    rpc::client::ClientBuilder,
    transports::{layers::RetryBackoffLayer, TransportResult},
};
use async_trait::async_trait;
use reqwest::Url;
use thiserror::Error;

use super::layer_extensions::RpcLoggingLayer;
use crate::gas::{BlockFees, ChainClient, ChainClientError, FeeHistoryResponse};

pub type GasFeeProvider = RootProvider;

#[derive(Error, Debug)]
pub enum RetryClientError {
    #[error("http provider cant be created for {0}: {1}")]
    HttpProviderCantBeCreated(String, String),
}

/// Builds an HTTP provider that backs off on rate limits and logs each call.
pub fn create_retry_client(rpc_url: &str) -> Result<Arc<GasFeeProvider>, RetryClientError> {
    let url = Url::parse(rpc_url).map_err(|e| {
        // the url itself may hold an api key, keep it out of the error
        RetryClientError::HttpProviderCantBeCreated("rpc url".to_string(), e.to_string())
    })?;

    let rpc_host = url.host_str().unwrap_or("unknown").to_string();

    let retry_layer = RetryBackoffLayer::new(10, 500, 660);
    let client = ClientBuilder::default()
        .layer(retry_layer)
        .layer(RpcLoggingLayer::new(rpc_host))
        .http(url);

    Ok(Arc::new(RootProvider::new(client)))
}

/// [`ChainClient`] backed by a JSON-RPC node.
///
/// Requests are sent raw so quantities reach the estimator exactly as the
/// node encoded them.
#[derive(Clone)]
pub struct EvmChainClient {
    provider: Arc<GasFeeProvider>,
    request_timeout: Duration,
}

impl EvmChainClient {
    pub fn new(provider: Arc<GasFeeProvider>, request_timeout: Duration) -> Self {
        EvmChainClient { provider, request_timeout }
    }

    /// Connects to `rpc_url`, bounding every call by `request_timeout`.
    pub fn connect(rpc_url: &str, request_timeout: Duration) -> Result<Self, RetryClientError> {
        Ok(Self::new(create_retry_client(rpc_url)?, request_timeout))
    }

    async fn with_timeout<T>(
        &self,
        method: &'static str,
        request: impl Future<Output = TransportResult<T>>,
    ) -> Result<T, ChainClientError> {
        tokio::time::timeout(self.request_timeout, request)
            .await
            .map_err(|_| ChainClientError::Timeout { method, timeout: self.request_timeout })?
            .map_err(ChainClientError::Rpc)
    }
}

#[async_trait]
impl ChainClient for EvmChainClient {
    async fn get_fee_history(
        &self,
        block_count: u64,
        newest_block: BlockNumberOrTag,
        percentiles: &[f64],
    ) -> Result<FeeHistoryResponse, ChainClientError> {
        let params = (U64::from(block_count), newest_block, percentiles.to_vec());
        self.with_timeout(
            "eth_feeHistory",
            self.provider.raw_request("eth_feeHistory".into(), params),
        )
        .await
    }

    async fn get_block(
        &self,
        tag: BlockNumberOrTag,
    ) -> Result<Option<BlockFees>, ChainClientError> {
        self.with_timeout(
            "eth_getBlockByNumber",
            self.provider.raw_request("eth_getBlockByNumber".into(), (tag, false)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;

    type SeenRequests = Arc<Mutex<Vec<Value>>>;

    /// Minimal JSON-RPC node answering the two methods the estimator uses.
    async fn rpc_handler(
        State((seen, delay)): State<(SeenRequests, Duration)>,
        Json(request): Json<Value>,
    ) -> Json<Value> {
        seen.lock().unwrap().push(request.clone());
        tokio::time::sleep(delay).await;

        let result = match request["method"].as_str() {
            Some("eth_feeHistory") => json!({
                "oldestBlock": "0x64",
                "baseFeePerGas": ["0x0", "0x0"],
                "gasUsedRatio": [0.5],
                "reward": [["0x5", "0xa", "0xf"]]
            }),
            Some("eth_getBlockByNumber") => json!({ "number": "0x65", "baseFeePerGas": "0x2" }),
            _ => Value::Null,
        };

        Json(json!({ "jsonrpc": "2.0", "id": request["id"], "result": result }))
    }

    async fn spawn_node(delay: Duration) -> (String, SeenRequests) {
        let seen: SeenRequests = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().route("/", post(rpc_handler)).with_state((seen.clone(), delay));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/", address), seen)
    }

    #[test]
    fn test_create_retry_client_rejects_bad_url() {
        let err = create_retry_client("not a url").unwrap_err();
        assert!(matches!(err, RetryClientError::HttpProviderCantBeCreated(_, _)));
        assert!(!err.to_string().contains("not a url"));
    }

    #[tokio::test]
    async fn test_get_fee_history_sends_raw_params() {
        let (url, seen) = spawn_node(Duration::ZERO).await;
        let client = EvmChainClient::connect(&url, Duration::from_secs(5)).unwrap();

        let history = client
            .get_fee_history(10, BlockNumberOrTag::Latest, &[25.0, 50.0, 75.0])
            .await
            .unwrap();

        assert_eq!(history.oldest_block, "0x64");
        assert_eq!(history.reward, vec![vec!["0x5", "0xa", "0xf"]]);

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0]["method"], "eth_feeHistory");
        assert_eq!(seen[0]["params"], json!(["0xa", "latest", [25.0, 50.0, 75.0]]));
    }

    #[tokio::test]
    async fn test_get_block_requests_pending_without_transactions() {
        let (url, seen) = spawn_node(Duration::ZERO).await;
        let client = EvmChainClient::connect(&url, Duration::from_secs(5)).unwrap();

        let block = client.get_block(BlockNumberOrTag::Pending).await.unwrap();

        assert_eq!(block, Some(BlockFees { base_fee_per_gas: Some("0x2".to_string()) }));
        assert_eq!(seen.lock().unwrap()[0]["params"], json!(["pending", false]));
    }

    #[tokio::test]
    async fn test_slow_node_times_out() {
        let (url, _) = spawn_node(Duration::from_secs(5)).await;
        let client = EvmChainClient::connect(&url, Duration::from_millis(100)).unwrap();

        let err = client.get_block(BlockNumberOrTag::Pending).await.unwrap_err();

        assert!(matches!(
            err,
            ChainClientError::Timeout { method: "eth_getBlockByNumber", .. }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_node_is_rpc_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let client =
            EvmChainClient::connect(&format!("http://{}/", address), Duration::from_secs(5))
                .unwrap();

        let err = client.get_block(BlockNumberOrTag::Pending).await.unwrap_err();

        assert!(matches!(err, ChainClientError::Rpc(_)));
    }
}
