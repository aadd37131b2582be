use alloy::{
    rpc::json_rpc::{RequestPacket, ResponsePacket},
    transports::TransportError,
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::{Duration, Instant},
};
use tower::{Layer, Service};
use tracing::{debug, error, info};

const SLOW_RPC_CALL: Duration = Duration::from_secs(10);

/// Logs every JSON-RPC call made through the client.
///
/// Only the provider host is logged; provider URLs usually carry an API key
/// in their path.
#[derive(Clone)]
pub struct RpcLoggingLayer {
    rpc_host: String,
}

impl RpcLoggingLayer {
    pub fn new(rpc_host: String) -> Self {
        Self { rpc_host }
    }
}

impl<S> Layer<S> for RpcLoggingLayer {
    type Service = RpcLoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RpcLoggingService { inner, rpc_host: self.rpc_host.clone() }
    }
}

#[derive(Debug, Clone)]
pub struct RpcLoggingService<S> {
    inner: S,
    rpc_host: String,
}

fn method_name(req: &RequestPacket) -> String {
    match req {
        RequestPacket::Single(r) => r.method().to_string(),
        RequestPacket::Batch(reqs) => match reqs.len() {
            0 => "empty_batch".to_string(),
            1 => reqs[0].method().to_string(),
            n => format!("batch_{}_requests", n),
        },
    }
}

/// Rough classification of a failed call, from the transport error text.
fn failure_kind(error: &str) -> &'static str {
    let error = error.to_lowercase();
    if error.contains("timeout") || error.contains("timed out") {
        "TIMEOUT"
    } else if error.contains("429") || error.contains("rate limit") {
        "RATE LIMITED"
    } else if error.contains("connection") || error.contains("network") {
        "CONNECTION ERROR"
    } else {
        "ERROR"
    }
}

impl<S> Service<RequestPacket> for RpcLoggingService<S>
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: RequestPacket) -> Self::Future {
        let start_time = Instant::now();
        let rpc_host = self.rpc_host.clone();
        let method_name = method_name(&req);

        let fut = self.inner.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(response) => {
                    let duration = start_time.elapsed();

                    if duration >= SLOW_RPC_CALL {
                        info!(
                            "SLOW RPC call - method: {}, duration: {:?}, host: {}",
                            method_name, duration, rpc_host
                        );
                    } else {
                        debug!(
                            "RPC call - method: {}, duration: {:?}, host: {}",
                            method_name, duration, rpc_host
                        );
                    }

                    Ok(response)
                }
                Err(err) => {
                    error!(
                        "RPC {} - method: {}, duration: {:?}, host: {}, error: {}",
                        failure_kind(&err.to_string()),
                        method_name,
                        start_time.elapsed(),
                        rpc_host,
                        err
                    );

                    Err(err)
                }
            }
        })
    }
}
