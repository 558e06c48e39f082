//! Reviews and the derived average rating.

use rust_decimal::Decimal;
use storefront::catalog::{NewProduct, Rating, Review};
use storefront::flows::{write_review, ReviewForm};
use storefront::traits::{NoticeLevel, TimeProvider};
use storefront::{Category, StoreError};

use crate::common::{StorefrontHarness, BUYER};

fn review(id: &str, rating: u8, harness: &StorefrontHarness) -> Review {
    Review {
        id: id.to_string(),
        user: BUYER.to_string(),
        username: "buyer".to_string(),
        rating: Rating::new(rating).unwrap(),
        comment: "ok".to_string(),
        date: harness.time().now(),
    }
}

#[tokio::test]
async fn test_average_follows_every_review() {
    let harness = StorefrontHarness::seeded().await;
    let catalog = harness.storefront().catalog();
    let product = catalog
        .add(NewProduct {
            name: "Desk".to_string(),
            description: "Standing desk".to_string(),
            price: Decimal::ONE,
            category: Category::SmartHome,
            stock: 1,
            image: "https://example.com/desk.jpg".to_string(),
            seller_address: "0xSeller".to_string(),
        })
        .unwrap();

    catalog.add_review(&product.id, review("a", 5, &harness)).unwrap();
    let updated = catalog.add_review(&product.id, review("b", 4, &harness)).unwrap();
    assert_eq!(updated.average_rating(), 4.5);

    let updated = catalog.add_review(&product.id, review("c", 3, &harness)).unwrap();
    assert_eq!(updated.average_rating(), 4.0);

    let ids: Vec<&str> = updated.reviews().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(catalog.get_by_id(&product.id), Some(updated));
}

#[tokio::test]
async fn test_write_review_appends_for_connected_account() {
    let harness = StorefrontHarness::connected().await;
    let form = ReviewForm {
        rating: 1,
        comment: "Stopped working after a week".to_string(),
    };

    let product = write_review(harness.storefront(), "2", &form).unwrap();

    assert_eq!(product.reviews().len(), 2);
    let review = product.reviews().last().unwrap();
    assert_eq!(review.user, BUYER);
    assert_eq!(review.username, "0xb0b1...9a9c");
    assert_eq!(review.id, harness.time().now_millis().to_string());
    assert_eq!(product.average_rating(), 3.0);
    assert_eq!(harness.levels(), vec![NoticeLevel::Success]);
}

#[tokio::test]
async fn test_write_review_requires_comment() {
    let harness = StorefrontHarness::connected().await;

    let err = write_review(harness.storefront(), "2", &ReviewForm::default()).unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(harness.product("2").reviews().len(), 1);
    let notices = harness.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "Please enter a comment");
}

#[tokio::test]
async fn test_write_review_requires_session() {
    let harness = StorefrontHarness::seeded().await;
    let form = ReviewForm {
        rating: 4,
        comment: "Nice".to_string(),
    };

    let err = write_review(harness.storefront(), "2", &form).unwrap_err();

    assert!(matches!(err, StoreError::NotConnected));
    assert_eq!(harness.levels(), vec![NoticeLevel::Warning]);
}

#[tokio::test]
async fn test_review_for_missing_product_is_not_found() {
    let harness = StorefrontHarness::connected().await;
    let form = ReviewForm {
        rating: 4,
        comment: "Nice".to_string(),
    };

    let err = write_review(harness.storefront(), "missing", &form).unwrap_err();

    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(harness.levels(), vec![NoticeLevel::Error]);
}
