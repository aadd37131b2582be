mod evm_provider;
pub use evm_provider::{create_retry_client, EvmChainClient, GasFeeProvider, RetryClientError};

mod layer_extensions;
