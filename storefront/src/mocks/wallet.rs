//! Mock wallet provider for testing.

use crate::config::NetworkParams;
use crate::error::ProviderError;
use crate::format::generate_tx_hash;
use crate::mocks::MockRandom;
use crate::traits::{ProviderHandshake, TxHandle, TxRequest, WalletProvider};
use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct MockWalletState {
    accounts: Vec<String>,
    chain_id: u64,
    balance: Decimal,
    known_networks: BTreeSet<u64>,
    latency: Option<Duration>,
    connect_failure: Option<ProviderError>,
    add_network_failure: Option<ProviderError>,
    send_failure: Option<ProviderError>,
    handshakes: usize,
    switch_requests: Vec<u64>,
    added_networks: Vec<u64>,
    send_attempts: usize,
    sent: Vec<TxHandle>,
}

/// Scriptable wallet that records every request it receives.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the session under test owns another.
#[derive(Debug, Clone)]
pub struct MockWallet {
    state: Arc<Mutex<MockWalletState>>,
    random: MockRandom,
}

impl MockWallet {
    /// A wallet exposing `account` on `chain_id` with `balance`.
    pub fn new(account: &str, chain_id: u64, balance: Decimal) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockWalletState {
                accounts: vec![account.to_string()],
                chain_id,
                balance,
                known_networks: BTreeSet::from([chain_id]),
                ..MockWalletState::default()
            })),
            random: MockRandom::default(),
        }
    }

    /// A wallet that connects but exposes no account.
    pub fn without_accounts(chain_id: u64) -> Self {
        let wallet = Self::new("", chain_id, Decimal::ZERO);
        wallet.state.lock().accounts.clear();
        wallet
    }

    /// Delay every connect and send by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.state.lock().latency = Some(latency);
    }

    pub fn add_known_network(&self, chain_id: u64) {
        self.state.lock().known_networks.insert(chain_id);
    }

    pub fn fail_connect(&self, error: ProviderError) {
        self.state.lock().connect_failure = Some(error);
    }

    pub fn fail_add_network(&self, error: ProviderError) {
        self.state.lock().add_network_failure = Some(error);
    }

    pub fn fail_sends(&self, error: ProviderError) {
        self.state.lock().send_failure = Some(error);
    }

    pub fn handshake_count(&self) -> usize {
        self.state.lock().handshakes
    }

    pub fn switch_requests(&self) -> Vec<u64> {
        self.state.lock().switch_requests.clone()
    }

    pub fn added_networks(&self) -> Vec<u64> {
        self.state.lock().added_networks.clone()
    }

    pub fn send_attempts(&self) -> usize {
        self.state.lock().send_attempts
    }

    pub fn sent_transactions(&self) -> Vec<TxHandle> {
        self.state.lock().sent.clone()
    }

    async fn simulate_latency(&self) {
        let latency = self.state.lock().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn connect(&self) -> Result<ProviderHandshake, ProviderError> {
        self.state.lock().handshakes += 1;
        self.simulate_latency().await;

        let state = self.state.lock();
        if let Some(error) = state.connect_failure.clone() {
            return Err(error);
        }
        Ok(ProviderHandshake {
            accounts: state.accounts.clone(),
            chain_id: state.chain_id,
            balance: state.balance,
        })
    }

    async fn switch_network(&self, chain_id: u64) -> Result<(), ProviderError> {
        let mut state = self.state.lock();
        state.switch_requests.push(chain_id);
        if !state.known_networks.contains(&chain_id) {
            return Err(ProviderError::UnknownNetwork(chain_id));
        }
        state.chain_id = chain_id;
        Ok(())
    }

    async fn add_network(&self, params: &NetworkParams) -> Result<(), ProviderError> {
        let mut state = self.state.lock();
        if let Some(error) = state.add_network_failure.clone() {
            return Err(error);
        }
        state.added_networks.push(params.chain_id);
        state.known_networks.insert(params.chain_id);
        Ok(())
    }

    async fn send_transaction(&self, request: TxRequest) -> Result<TxHandle, ProviderError> {
        self.state.lock().send_attempts += 1;
        self.simulate_latency().await;

        let mut state = self.state.lock();
        if let Some(error) = state.send_failure.clone() {
            return Err(error);
        }
        let tx = TxHandle {
            hash: generate_tx_hash(&self.random),
            to: request.to,
            value: request.value,
        };
        state.sent.push(tx.clone());
        Ok(tx)
    }
}
