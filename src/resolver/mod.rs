//! Address → domain name resolution.
//!
//! Resolution is best effort: any failure along the lookup chain falls back
//! to the raw address, and nothing is cached.

mod contracts;
mod helper;

pub use contracts::ContractNameService;
pub use helper::{decode_name_signals, encode_name_signals};

use alloy::primitives::{B256, U256};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::feed::{RawEdge, TransactionEdge};

/// The external naming service, one method per lookup step
#[async_trait]
pub trait NameService: Send + Sync {
    /// Hash of the primary name registered for `address`
    async fn reverse_lookup(&self, address: &str) -> Result<B256>;

    /// Encoded name signal stored under `name_hash`
    async fn lookup(&self, name_hash: B256) -> Result<Vec<U256>>;

    fn decode(&self, signal: &[U256]) -> Result<String> {
        decode_name_signals(signal)
    }
}

#[derive(Clone, Default)]
pub struct AddressResolver {
    service: Option<Arc<dyn NameService>>,
}

impl AddressResolver {
    pub fn new(service: Arc<dyn NameService>) -> Self {
        Self {
            service: Some(service),
        }
    }

    /// A resolver that always answers with the raw address
    pub fn disabled() -> Self {
        Self { service: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.service.is_some()
    }

    /// Display name for `address`: its domain name, or `address` unchanged
    /// if any lookup step fails or no name is registered.
    pub async fn resolve(&self, address: &str) -> String {
        self.resolve_name(address)
            .await
            .unwrap_or_else(|| address.to_string())
    }

    /// Domain name for `address`, `None` on any failure
    pub async fn resolve_name(&self, address: &str) -> Option<String> {
        let service = self.service.as_ref()?;
        match lookup_name(service.as_ref(), address).await {
            Ok(name) => Some(name),
            Err(e) => {
                debug!(address, error = %format!("{e:#}"), "name resolution fell back to address");
                None
            }
        }
    }

    /// Resolve both sides of an edge, sender first
    pub async fn resolve_edge(&self, edge: RawEdge) -> TransactionEdge {
        let from_name = self.resolve_name(&edge.transaction.from).await;
        let to_name = match edge.transaction.to.as_deref() {
            Some(to) => self.resolve_name(to).await,
            None => None,
        };

        TransactionEdge {
            cursor: edge.cursor,
            transaction: edge.transaction,
            from_name,
            to_name,
        }
    }
}

async fn lookup_name(service: &dyn NameService, address: &str) -> Result<String> {
    let name_hash = service
        .reverse_lookup(address)
        .await
        .context("Reverse lookup failed")?;
    if name_hash == B256::ZERO {
        return Err(anyhow!("No reverse record"));
    }

    let signal = service
        .lookup(name_hash)
        .await
        .context("Name lookup failed")?;
    if signal.is_empty() {
        return Err(anyhow!("Empty name signal"));
    }

    let name = service.decode(&signal)?;
    if name.trim().is_empty() {
        return Err(anyhow!("Decoded name is empty"));
    }

    Ok(name)
}
