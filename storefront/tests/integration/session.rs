//! Wallet session lifecycle as seen through the storefront.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use storefront::config::{StorefrontConfig, TARGET_CHAIN_ID};
use storefront::flows::buy;
use storefront::mocks::{MemoryMarker, MockSeed, MockWallet};
use storefront::traits::{ConnectionMarker, NoticeLevel, ProviderEvent};
use storefront::{BuiltinSeed, SessionEvent, SessionStatus, SimulatedWallet, Storefront};

use crate::common::{StorefrontHarness, BUYER, SELLER};

#[tokio::test]
async fn test_start_reconnects_when_marker_present() {
    let wallet = MockWallet::new(BUYER, TARGET_CHAIN_ID, dec!(2));
    let harness = StorefrontHarness::with_parts(wallet, MemoryMarker::preset());

    harness.storefront().start(&MockSeed::builtin()).await;

    assert_eq!(harness.storefront().session().account().as_deref(), Some(BUYER));
    assert_eq!(harness.storefront().catalog().len(), 5);
    assert_eq!(harness.wallet().handshake_count(), 1);
}

#[tokio::test]
async fn test_start_stays_disconnected_without_marker() {
    let harness = StorefrontHarness::seeded().await;

    assert_eq!(harness.storefront().session().status(), SessionStatus::Disconnected);
    assert_eq!(harness.wallet().handshake_count(), 0);
    assert!(harness.notices().is_empty());
}

#[tokio::test]
async fn test_concurrent_connects_share_one_handshake() {
    let harness = StorefrontHarness::seeded().await;
    harness.wallet().set_latency(Duration::from_millis(20));
    let session = harness.storefront().session();

    let (a, b, c) = tokio::join!(session.connect(), session.connect(), session.connect());

    let a = a.unwrap();
    assert_eq!(a, b.unwrap());
    assert_eq!(a, c.unwrap());
    assert_eq!(harness.wallet().handshake_count(), 1);
}

#[tokio::test]
async fn test_account_change_resets_then_reconnects() {
    let harness = StorefrontHarness::connected().await;
    let session = harness.storefront().session();
    let mut events = session.subscribe();

    let change = ProviderEvent::AccountsChanged {
        accounts: vec!["0x2222222222222222222222222222222222222222".to_string()],
    };
    session.handle_provider_event(change.clone());

    assert!(!session.is_connected());
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Reset(change));
    assert!(harness.marker().is_set());

    let restored = session.connect_on_load().await.unwrap();
    assert!(restored.is_some());
    assert_eq!(harness.wallet().handshake_count(), 2);
}

#[tokio::test]
async fn test_purchase_after_disconnect_is_refused() {
    let harness = StorefrontHarness::connected().await;
    harness.storefront().session().disconnect();
    assert!(!harness.marker().is_set());

    let result = buy(harness.storefront(), "1", 1).await;

    assert!(result.is_err());
    assert!(harness.wallet().sent_transactions().is_empty());
    assert_eq!(
        harness.levels(),
        vec![NoticeLevel::Info, NoticeLevel::Warning]
    );
}

#[tokio::test]
async fn test_wallet_on_foreign_network_is_moved_to_target() {
    let wallet = MockWallet::new(BUYER, 56, dec!(1));
    let harness = StorefrontHarness::with_parts(wallet, MemoryMarker::new());

    let snapshot = harness.connect().await;

    assert_eq!(snapshot.chain_id, TARGET_CHAIN_ID);
    assert_eq!(harness.wallet().added_networks(), vec![TARGET_CHAIN_ID]);
    assert_eq!(
        harness.levels(),
        vec![NoticeLevel::Warning, NoticeLevel::Success]
    );
}

#[tokio::test]
async fn test_file_marker_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorefrontConfig {
        data_dir: dir.path().join("nested"),
        seed_delay: Duration::ZERO,
        ..StorefrontConfig::default()
    };
    let wallet = SimulatedWallet::new(BUYER, TARGET_CHAIN_ID, dec!(1));

    let first = Storefront::from_config(&config, Arc::new(wallet.clone()));
    first.start(&BuiltinSeed::new(config.seed_delay)).await;
    assert!(!first.session().is_connected());
    first.session().connect().await.unwrap();
    assert!(config.marker_path().exists());

    let second = Storefront::from_config(&config, Arc::new(wallet.clone()));
    second.start(&BuiltinSeed::new(config.seed_delay)).await;
    assert_eq!(second.session().account().as_deref(), Some(BUYER));

    second.session().disconnect();
    assert!(!config.marker_path().exists());
}

#[tokio::test]
async fn test_simulated_wallet_is_debited_by_purchase() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorefrontConfig {
        data_dir: dir.path().to_path_buf(),
        seed_delay: Duration::ZERO,
        ..StorefrontConfig::default()
    };
    let wallet = SimulatedWallet::new(BUYER, TARGET_CHAIN_ID, dec!(1));
    let storefront = Storefront::from_config(&config, Arc::new(wallet.clone()));
    storefront.start(&BuiltinSeed::new(config.seed_delay)).await;
    storefront.session().connect().await.unwrap();

    let receipt = buy(&storefront, "1", 2).await.unwrap();

    assert_eq!(receipt.tx.to, SELLER);
    assert_eq!(wallet.balance(), dec!(0.8975));
}
