//! Wallet provider abstraction.
//!
//! The storefront never signs anything itself. Account discovery, network
//! switching and value transfers are delegated to whatever wallet bridge the
//! host environment injects, modelled here as an opaque capability provider.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::NetworkParams;
use crate::error::ProviderError;

/// Everything a wallet reports when a connection is established.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderHandshake {
    /// Accounts exposed by the wallet; the first one is the active account.
    pub accounts: Vec<String>,
    /// Network the wallet is currently on.
    pub chain_id: u64,
    /// Balance of the first account, in native units.
    pub balance: Decimal,
}

/// A value transfer to hand to the wallet's signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRequest {
    pub to: String,
    pub value: Decimal,
}

/// Handle of a transaction accepted by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxHandle {
    pub hash: String,
    pub to: String,
    pub value: Decimal,
}

/// Change notifications pushed by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ProviderEvent {
    AccountsChanged { accounts: Vec<String> },
    ChainChanged { chain_id: u64 },
}

/// Abstraction over an injected wallet bridge.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Open the wallet and report accounts, network and balance.
    async fn connect(&self) -> Result<ProviderHandshake, ProviderError>;

    /// Ask the wallet to switch to `chain_id`.
    ///
    /// Returns [`ProviderError::UnknownNetwork`] when the wallet has never
    /// heard of the network, in which case the caller may register it first.
    async fn switch_network(&self, chain_id: u64) -> Result<(), ProviderError>;

    /// Register a network with the wallet.
    async fn add_network(&self, params: &NetworkParams) -> Result<(), ProviderError>;

    /// Sign and submit a value transfer.
    async fn send_transaction(&self, request: TxRequest) -> Result<TxHandle, ProviderError>;
}
