//! Single-storefront test harness for integration testing.
//!
//! Wires a `Storefront` to mock collaborators and keeps a handle on each of
//! them so tests can script the wallet and inspect notices.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use storefront::catalog::{CatalogStore, Product};
use storefront::config::{StorefrontConfig, TARGET_CHAIN_ID};
use storefront::mocks::{MemoryMarker, MockNotifier, MockRandom, MockSeed, MockTime, MockWallet};
use storefront::traits::{Notice, NoticeLevel};
use storefront::{ListingForm, SessionSnapshot, Storefront, WalletSession};

/// Account the harness wallet exposes.
pub const BUYER: &str = "0xb0b16607a8c0b3eebe82f8d8cc9d417442dc9a9c";

/// Seller of product "1" in the built-in catalog.
pub const SELLER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// A storefront over mocks, plus handles on every mock.
pub struct StorefrontHarness {
    storefront: Storefront,
    wallet: MockWallet,
    marker: MemoryMarker,
    notifier: MockNotifier,
    time: MockTime,
}

#[allow(dead_code)]
impl StorefrontHarness {
    /// A fresh harness whose wallet holds 1 BNB on the target network.
    pub fn new() -> Self {
        Self::with_parts(
            MockWallet::new(BUYER, TARGET_CHAIN_ID, Decimal::ONE),
            MemoryMarker::new(),
        )
    }

    pub fn with_parts(wallet: MockWallet, marker: MemoryMarker) -> Self {
        let time = MockTime::default();
        let notifier = MockNotifier::new();
        let config = StorefrontConfig {
            provider_timeout: Duration::from_secs(5),
            ..StorefrontConfig::default()
        };

        let catalog = CatalogStore::with_time(Arc::new(time.clone()));
        let session = WalletSession::new(
            Arc::new(wallet.clone()),
            Arc::new(marker.clone()),
            Arc::new(notifier.clone()),
            &config,
        );
        let storefront = Storefront::new(
            catalog,
            session,
            Arc::new(notifier.clone()),
            Arc::new(time.clone()),
            Arc::new(MockRandom::new(7)),
        );

        Self {
            storefront,
            wallet,
            marker,
            notifier,
            time,
        }
    }

    /// A harness with the built-in catalog loaded.
    pub async fn seeded() -> Self {
        let harness = Self::new();
        harness.storefront.start(&MockSeed::builtin()).await;
        harness
    }

    /// A seeded harness that is already connected. Connection notices are
    /// cleared so tests only see their own.
    pub async fn connected() -> Self {
        let harness = Self::seeded().await;
        harness.connect().await;
        harness.notifier.clear();
        harness
    }

    pub async fn connect(&self) -> SessionSnapshot {
        self.storefront
            .session()
            .connect()
            .await
            .expect("mock wallet connects")
    }

    pub fn storefront(&self) -> &Storefront {
        &self.storefront
    }

    pub fn wallet(&self) -> &MockWallet {
        &self.wallet
    }

    pub fn marker(&self) -> &MemoryMarker {
        &self.marker
    }

    pub fn time(&self) -> &MockTime {
        &self.time
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notifier.notices()
    }

    pub fn clear_notices(&self) {
        self.notifier.clear();
    }

    pub fn levels(&self) -> Vec<NoticeLevel> {
        self.notifier.levels()
    }

    pub fn product(&self, id: &str) -> Product {
        self.storefront
            .catalog()
            .get_by_id(id)
            .unwrap_or_else(|| panic!("product {id} exists"))
    }

    /// A listing form that passes validation.
    pub fn listing_form(name: &str, price: &str) -> ListingForm {
        ListingForm {
            name: name.to_string(),
            description: format!("{name} in great condition"),
            price: price.to_string(),
            category: "Gaming".to_string(),
            stock: "2".to_string(),
            image: Some("https://example.com/item.jpg".to_string()),
        }
    }
}
