//! Wallet session state and its lifecycle.
//!
//! A session moves `Disconnected -> Connecting -> Connected` and back to
//! `Disconnected` on disconnect or when the wallet reports an account or
//! network change. Consumers hold a [`WalletSession`] handle (clones share
//! state) and may subscribe to [`SessionEvent`]s to re-derive their views.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

use crate::config::{NetworkParams, StorefrontConfig};
use crate::error::{ProviderError, StoreError, StoreResult};
use crate::traits::{
    ConnectionMarker, Notifier, ProviderEvent, ProviderHandshake, TxHandle, TxRequest,
    WalletProvider,
};

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// The fields of an established session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub account: String,
    pub chain_id: u64,
    /// Native balance as of connect time.
    pub balance: Decimal,
}

/// Lifecycle notifications for views that depend on the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Connected(SessionSnapshot),
    Disconnected,
    /// The wallet changed account or network; all derived state is stale.
    Reset(ProviderEvent),
}

#[derive(Debug, Default)]
struct SessionState {
    status: SessionStatus,
    session: Option<SessionSnapshot>,
    /// Bumped on every clear. A handshake only commits into the epoch it
    /// started in.
    epoch: u64,
}

/// Puts a `Connecting` status back to `Disconnected` if the connect future
/// is dropped before it resolves.
struct ConnectingGuard {
    state: Arc<RwLock<SessionState>>,
    epoch: u64,
    armed: bool,
}

impl ConnectingGuard {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for ConnectingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.write();
        if state.epoch == self.epoch && state.status == SessionStatus::Connecting {
            debug!("Connect abandoned mid-handshake");
            state.status = SessionStatus::Disconnected;
        }
    }
}

/// Process-wide wallet connection, passed explicitly to whoever needs it.
#[derive(Clone)]
pub struct WalletSession {
    provider: Arc<dyn WalletProvider>,
    marker: Arc<dyn ConnectionMarker>,
    notifier: Arc<dyn Notifier>,
    network: NetworkParams,
    timeout: Duration,
    state: Arc<RwLock<SessionState>>,
    /// Held for the whole provider handshake so only one runs at a time.
    handshake: Arc<Mutex<()>>,
    events: broadcast::Sender<SessionEvent>,
}

impl WalletSession {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        marker: Arc<dyn ConnectionMarker>,
        notifier: Arc<dyn Notifier>,
        config: &StorefrontConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            provider,
            marker,
            notifier,
            network: config.network.clone(),
            timeout: config.provider_timeout,
            state: Arc::new(RwLock::new(SessionState::default())),
            handshake: Arc::new(Mutex::new(())),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.read().status
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.state.read().session.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state.read().session.is_some()
    }

    pub fn account(&self) -> Option<String> {
        self.state.read().session.as_ref().map(|s| s.account.clone())
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.state.read().session.as_ref().map(|s| s.chain_id)
    }

    pub fn balance(&self) -> Option<Decimal> {
        self.state.read().session.as_ref().map(|s| s.balance)
    }

    /// The network this session insists on.
    pub const fn target_network(&self) -> &NetworkParams {
        &self.network
    }

    /// Connect to the wallet.
    ///
    /// Callers arriving while a handshake is in flight wait for it and get
    /// its session back; a second handshake is never started while one is
    /// running. Nothing is committed until the handshake has completed, so
    /// a failure leaves the session fully disconnected. A disconnect or a
    /// wallet reset during the handshake wins: the handshake result is
    /// discarded and `InvalidState` is returned.
    pub async fn connect(&self) -> StoreResult<SessionSnapshot> {
        let _handshake = self.handshake.lock().await;
        if let Some(existing) = self.snapshot() {
            debug!(account = %existing.account, "Already connected");
            return Ok(existing);
        }

        let epoch = {
            let mut state = self.state.write();
            state.status = SessionStatus::Connecting;
            state.epoch
        };
        let guard = ConnectingGuard {
            state: Arc::clone(&self.state),
            epoch,
            armed: true,
        };

        let handshake = match self.bounded(self.provider.connect()).await {
            Ok(handshake) => handshake,
            Err(e) => return Err(self.fail_connect(epoch, e)),
        };
        let snapshot = match Self::snapshot_from(handshake) {
            Ok(snapshot) => snapshot,
            Err(e) => return Err(self.fail_connect(epoch, e)),
        };

        let committed = {
            let mut state = self.state.write();
            if state.epoch == epoch {
                state.session = Some(snapshot.clone());
                state.status = SessionStatus::Connected;
                true
            } else {
                false
            }
        };
        guard.disarm();
        if !committed {
            info!(account = %snapshot.account, "Session cleared during handshake, discarding it");
            return Err(StoreError::InvalidState(
                "wallet session was reset while connecting".to_string(),
            ));
        }

        if let Err(e) = self.marker.set() {
            warn!("Could not persist connection marker: {e}");
        }
        info!(account = %snapshot.account, chain_id = snapshot.chain_id, "Wallet connected");

        if snapshot.chain_id != self.network.chain_id {
            self.notifier
                .warning(&format!("Please switch to {}", self.network.chain_name));
            // Switch failures are reported inside and never undo the connection.
            let _ = self.switch_to_target_network().await;
        }

        self.notifier.success("Wallet connected successfully!");
        let snapshot = self.snapshot().unwrap_or(snapshot);
        let _ = self.events.send(SessionEvent::Connected(snapshot.clone()));
        Ok(snapshot)
    }

    /// Reconnect automatically if a previous session left the marker behind.
    pub async fn connect_on_load(&self) -> StoreResult<Option<SessionSnapshot>> {
        if !self.marker.is_set() {
            debug!("No previous session, skipping auto-connect");
            return Ok(None);
        }
        info!("Previous session found, reconnecting");
        self.connect().await.map(Some)
    }

    /// Forget the session and the auto-reconnect marker.
    pub fn disconnect(&self) {
        self.clear();
        if let Err(e) = self.marker.clear() {
            warn!("Could not clear connection marker: {e}");
        }
        info!("Wallet disconnected");
        self.notifier.info("Wallet disconnected");
        let _ = self.events.send(SessionEvent::Disconnected);
    }

    /// React to a change pushed by the wallet.
    ///
    /// Any account or network change tears the session down completely;
    /// subscribers receive [`SessionEvent::Reset`] and are expected to
    /// reconnect and re-derive their state. The marker is kept so
    /// [`Self::connect_on_load`] picks the wallet up again.
    pub fn handle_provider_event(&self, event: ProviderEvent) {
        warn!(?event, "Wallet changed underneath the session, resetting");
        self.clear();
        let _ = self.events.send(SessionEvent::Reset(event));
    }

    /// Ask the wallet to move to the target network, registering it first
    /// if the wallet does not know it.
    pub async fn switch_to_target_network(&self) -> StoreResult<()> {
        let target = self.network.chain_id;
        let result = match self.bounded(self.provider.switch_network(target)).await {
            Err(ProviderError::UnknownNetwork(_)) => {
                info!(chain_id = target, "Network unknown to wallet, registering it");
                match self.bounded(self.provider.add_network(&self.network)).await {
                    Ok(()) => self.bounded(self.provider.switch_network(target)).await,
                    Err(e) => {
                        error!("Error adding {}: {e}", self.network.chain_name);
                        Err(e)
                    }
                }
            }
            other => other,
        };

        match result {
            Ok(()) => {
                info!(chain_id = target, "Switched network");
                if let Some(session) = self.state.write().session.as_mut() {
                    session.chain_id = target;
                }
                Ok(())
            }
            Err(e) => {
                error!("Network switch failed: {e}");
                self.notifier
                    .error(&format!("Could not switch to {}", self.network.chain_name));
                Err(e.into())
            }
        }
    }

    /// Send `amount` native units to `to` through the wallet's signer.
    ///
    /// Fails with [`StoreError::NotConnected`] before touching the wallet if
    /// there is no session. Rejections are returned once, without retry.
    pub async fn send_value(&self, to: &str, amount: Decimal) -> StoreResult<TxHandle> {
        if !self.is_connected() {
            return Err(StoreError::NotConnected);
        }

        let request = TxRequest {
            to: to.to_string(),
            value: amount,
        };
        match self.bounded(self.provider.send_transaction(request)).await {
            Ok(tx) => {
                info!(hash = %tx.hash, to, %amount, "Transaction sent");
                Ok(tx)
            }
            Err(e) => {
                error!("Transaction error: {e}");
                Err(e.into())
            }
        }
    }

    fn clear(&self) {
        let mut state = self.state.write();
        state.session = None;
        state.status = SessionStatus::Disconnected;
        state.epoch += 1;
    }

    fn fail_connect(&self, epoch: u64, e: ProviderError) -> StoreError {
        {
            let mut state = self.state.write();
            if state.epoch == epoch {
                state.status = SessionStatus::Disconnected;
            }
        }
        error!("Error connecting wallet: {e}");
        self.notifier.error("Failed to connect wallet");
        e.into()
    }

    fn snapshot_from(handshake: ProviderHandshake) -> Result<SessionSnapshot, ProviderError> {
        let account = handshake
            .accounts
            .into_iter()
            .next()
            .ok_or(ProviderError::NoAccounts)?;
        Ok(SessionSnapshot {
            account,
            chain_id: handshake.chain_id,
            balance: handshake.balance,
        })
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ProviderError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| ProviderError::Timeout)?
    }
}
