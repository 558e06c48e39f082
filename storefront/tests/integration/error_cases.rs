//! Failure paths that must leave the storefront consistent.

use std::time::Duration;

use rust_decimal_macros::dec;
use storefront::config::TARGET_CHAIN_ID;
use storefront::flows::view_profile;
use storefront::mocks::{MemoryMarker, MockSeed, MockWallet};
use storefront::traits::{ConnectionMarker, NoticeLevel};
use storefront::{ProviderError, SessionStatus, StoreError};

use crate::common::{StorefrontHarness, BUYER};

#[tokio::test]
async fn test_failing_seed_leaves_empty_catalog() {
    let harness = StorefrontHarness::new();
    let seed = MockSeed::failing("backend unavailable");

    harness.storefront().start(&seed).await;

    let catalog = harness.storefront().catalog();
    assert!(!catalog.is_loading());
    assert!(catalog.is_empty());
    assert_eq!(seed.fetch_count(), 1);
    assert!(harness.notices().is_empty());
}

#[tokio::test]
async fn test_rejected_connect_leaves_nothing_behind() {
    let wallet = MockWallet::new(BUYER, TARGET_CHAIN_ID, dec!(1));
    wallet.fail_connect(ProviderError::Rejected);
    let harness = StorefrontHarness::with_parts(wallet, MemoryMarker::new());
    let session = harness.storefront().session();

    let err = session.connect().await.unwrap_err();

    assert!(matches!(err, StoreError::Provider(ProviderError::Rejected)));
    assert_eq!(session.status(), SessionStatus::Disconnected);
    assert!(session.account().is_none());
    assert!(session.balance().is_none());
    assert!(!harness.marker().is_set());
    assert_eq!(harness.levels(), vec![NoticeLevel::Error]);
}

#[tokio::test]
async fn test_failed_auto_reconnect_does_not_block_startup() {
    let wallet = MockWallet::new(BUYER, TARGET_CHAIN_ID, dec!(1));
    wallet.fail_connect(ProviderError::Failed("locked".to_string()));
    let harness = StorefrontHarness::with_parts(wallet, MemoryMarker::preset());

    harness.storefront().start(&MockSeed::builtin()).await;

    assert_eq!(harness.storefront().catalog().len(), 5);
    assert!(!harness.storefront().session().is_connected());
    assert_eq!(harness.levels(), vec![NoticeLevel::Error]);
}

#[tokio::test(start_paused = true)]
async fn test_unresponsive_wallet_times_out() {
    let harness = StorefrontHarness::seeded().await;
    harness.wallet().set_latency(Duration::from_secs(600));

    let err = harness.storefront().session().connect().await.unwrap_err();

    assert!(matches!(err, StoreError::Provider(ProviderError::Timeout)));
    assert!(!harness.storefront().session().is_connected());
}

#[tokio::test]
async fn test_wallet_without_accounts_is_rejected() {
    let harness = StorefrontHarness::with_parts(
        MockWallet::without_accounts(TARGET_CHAIN_ID),
        MemoryMarker::new(),
    );

    let err = harness.storefront().session().connect().await.unwrap_err();

    assert!(matches!(err, StoreError::Provider(ProviderError::NoAccounts)));
}

#[tokio::test]
async fn test_profile_requires_session() {
    let harness = StorefrontHarness::seeded().await;
    let storefront = harness.storefront();

    let err = view_profile(storefront).unwrap_err();

    assert!(matches!(err, StoreError::NotConnected));
}
