//! In-process wallet used when no browser wallet is available.
//!
//! Holds a single account with a native balance and debits it on every
//! transfer. Nothing leaves the process; transaction hashes are random.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::NetworkParams;
use crate::error::ProviderError;
use crate::format::generate_tx_hash;
use crate::traits::{ProviderHandshake, RandomSource, ThreadRng, TxHandle, TxRequest, WalletProvider};

struct Ledger {
    chain_id: u64,
    balance: Decimal,
    known_networks: BTreeSet<u64>,
}

/// A local wallet with one account and an in-memory balance.
#[derive(Clone)]
pub struct SimulatedWallet {
    account: String,
    ledger: Arc<Mutex<Ledger>>,
    random: Arc<dyn RandomSource>,
}

impl SimulatedWallet {
    pub fn new(account: impl Into<String>, chain_id: u64, balance: Decimal) -> Self {
        Self::with_random(account, chain_id, balance, Arc::new(ThreadRng::new()))
    }

    pub fn with_random(
        account: impl Into<String>,
        chain_id: u64,
        balance: Decimal,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            account: account.into(),
            ledger: Arc::new(Mutex::new(Ledger {
                chain_id,
                balance,
                known_networks: BTreeSet::from([chain_id]),
            })),
            random,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.ledger.lock().balance
    }
}

#[async_trait]
impl WalletProvider for SimulatedWallet {
    async fn connect(&self) -> Result<ProviderHandshake, ProviderError> {
        let ledger = self.ledger.lock();
        Ok(ProviderHandshake {
            accounts: vec![self.account.clone()],
            chain_id: ledger.chain_id,
            balance: ledger.balance,
        })
    }

    async fn switch_network(&self, chain_id: u64) -> Result<(), ProviderError> {
        let mut ledger = self.ledger.lock();
        if !ledger.known_networks.contains(&chain_id) {
            return Err(ProviderError::UnknownNetwork(chain_id));
        }
        ledger.chain_id = chain_id;
        Ok(())
    }

    async fn add_network(&self, params: &NetworkParams) -> Result<(), ProviderError> {
        debug!(chain_id = params.chain_id, name = %params.chain_name, "Registering network");
        self.ledger.lock().known_networks.insert(params.chain_id);
        Ok(())
    }

    async fn send_transaction(&self, request: TxRequest) -> Result<TxHandle, ProviderError> {
        if request.value.is_sign_negative() {
            return Err(ProviderError::Failed(format!(
                "negative transfer of {}",
                request.value
            )));
        }

        let mut ledger = self.ledger.lock();
        if request.value > ledger.balance {
            return Err(ProviderError::Failed(format!(
                "insufficient funds: balance {}, transfer {}",
                ledger.balance, request.value
            )));
        }
        ledger.balance -= request.value;

        Ok(TxHandle {
            hash: generate_tx_hash(self.random.as_ref()),
            to: request.to,
            value: request.value,
        })
    }
}
