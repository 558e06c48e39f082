//! Listing flow: validation, insertion and seller attribution.

use rust_decimal_macros::dec;
use storefront::flows::{list_product, view_profile, FormField};
use storefront::traits::{NoticeLevel, TimeProvider};
use storefront::{Category, StoreError};

use crate::common::{StorefrontHarness, BUYER};

#[tokio::test]
async fn test_listing_is_prepended_and_attributed() {
    let harness = StorefrontHarness::connected().await;
    let form = StorefrontHarness::listing_form("Retro Console", " 0.04 ");

    let product = list_product(harness.storefront(), &form).unwrap();

    let catalog = harness.storefront().catalog();
    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog.products()[0], product);
    assert_eq!(product.price, dec!(0.04));
    assert_eq!(product.category, Category::Gaming);
    assert_eq!(product.stock, 2);
    assert_eq!(product.seller.address, BUYER);
    assert_eq!(product.seller.name.as_deref(), Some("Anonymous"));
    assert!(product.reviews().is_empty());
    assert_eq!(product.average_rating(), 0.0);
    assert_eq!(product.created_at, harness.time().now());
    assert_eq!(harness.levels(), vec![NoticeLevel::Success]);
}

#[tokio::test]
async fn test_same_millisecond_listings_get_distinct_ids() {
    let harness = StorefrontHarness::connected().await;
    let storefront = harness.storefront();

    let first = list_product(storefront, &StorefrontHarness::listing_form("A", "1")).unwrap();
    let second = list_product(storefront, &StorefrontHarness::listing_form("B", "1")).unwrap();
    let third = list_product(storefront, &StorefrontHarness::listing_form("C", "1")).unwrap();

    assert_ne!(first.id, second.id);
    assert_ne!(second.id, third.id);
    assert_ne!(first.id, third.id);
    assert_eq!(storefront.catalog().get_by_id(&second.id), Some(second));
}

#[tokio::test]
async fn test_empty_name_is_the_only_error() {
    let harness = StorefrontHarness::connected().await;
    let form = StorefrontHarness::listing_form("", "0.04");

    let err = list_product(harness.storefront(), &form).unwrap_err();

    match err {
        StoreError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get(FormField::Name), Some("Product name is required"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(harness.storefront().catalog().len(), 5);
    assert_eq!(harness.levels(), vec![NoticeLevel::Error]);
}

#[tokio::test]
async fn test_listing_requires_connected_wallet() {
    let harness = StorefrontHarness::seeded().await;
    let form = StorefrontHarness::listing_form("Retro Console", "0.04");

    let err = list_product(harness.storefront(), &form).unwrap_err();

    assert!(matches!(err, StoreError::NotConnected));
    assert_eq!(harness.storefront().catalog().len(), 5);
    assert_eq!(harness.levels(), vec![NoticeLevel::Warning]);
}

#[tokio::test]
async fn test_profile_shows_own_listings() {
    let harness = StorefrontHarness::connected().await;
    let storefront = harness.storefront();
    list_product(storefront, &StorefrontHarness::listing_form("Old Lamp", "0.01")).unwrap();
    harness.time().advance(60);
    list_product(storefront, &StorefrontHarness::listing_form("New Lamp", "0.02")).unwrap();

    let profile = view_profile(storefront).unwrap();

    assert_eq!(profile.account, BUYER);
    assert_eq!(profile.short_address, "0xb0b1...9a9c");
    assert_eq!(profile.balance, "1.0000");
    assert_eq!(profile.loyalty_points, "2,500");
    let names: Vec<&str> = profile.listings.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["New Lamp", "Old Lamp"]);

    assert_eq!(profile.purchases.len(), 3);
    for record in &profile.purchases {
        assert!(storefront.catalog().get_by_id(&record.product.id).is_some());
    }
}
