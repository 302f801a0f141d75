use alloy::{
    network::Ethereum,
    primitives::{Address, TxKind, B256, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::{TransactionInput, TransactionRequest},
    sol,
    sol_types::SolCall,
};
use anyhow::{Context, Result};
use async_trait::async_trait;

use super::NameService;

type HttpProvider = RootProvider<Ethereum>;

sol! {
    #[sol(rpc)]
    interface EVMReverseResolverV1 {
        function get(address addr) external view returns (bytes32 name);
    }
}

sol! {
    #[sol(rpc)]
    interface RainbowTableV1 {
        function lookup(bytes32 hash) external view returns (uint256[] memory);
    }
}

/// Name service backed by the on-chain reverse resolver and rainbow table
pub struct ContractNameService {
    provider: HttpProvider,
    reverse_resolver: Address,
    rainbow_table: Address,
}

impl ContractNameService {
    pub fn new(rpc_url: &str, reverse_resolver: &str, rainbow_table: &str) -> Result<Self> {
        let url = rpc_url.parse().context("Invalid RPC URL")?;
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<Ethereum>()
            .connect_http(url);

        Ok(Self {
            provider,
            reverse_resolver: reverse_resolver
                .parse()
                .context("Invalid reverse resolver address")?,
            rainbow_table: rainbow_table
                .parse()
                .context("Invalid rainbow table address")?,
        })
    }

    async fn eth_call(&self, to: Address, calldata: Vec<u8>) -> Result<alloy::primitives::Bytes> {
        let tx = TransactionRequest {
            to: Some(TxKind::Call(to)),
            input: TransactionInput::new(calldata.into()),
            ..Default::default()
        };
        self.provider
            .call(tx)
            .await
            .with_context(|| format!("eth_call to {to:?} failed"))
    }
}

#[async_trait]
impl NameService for ContractNameService {
    async fn reverse_lookup(&self, address: &str) -> Result<B256> {
        let addr: Address = address
            .parse()
            .with_context(|| format!("Invalid address {address}"))?;

        let call = EVMReverseResolverV1::getCall { addr };
        let response = self
            .eth_call(self.reverse_resolver, call.abi_encode())
            .await
            .context("Failed to query reverse resolver")?;

        EVMReverseResolverV1::getCall::abi_decode_returns(&response)
            .context("Failed to decode reverse record")
    }

    async fn lookup(&self, name_hash: B256) -> Result<Vec<U256>> {
        let call = RainbowTableV1::lookupCall { hash: name_hash };
        let response = self
            .eth_call(self.rainbow_table, call.abi_encode())
            .await
            .context("Failed to query rainbow table")?;

        RainbowTableV1::lookupCall::abi_decode_returns(&response)
            .context("Failed to decode name signal")
    }
}
