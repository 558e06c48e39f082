//! Catalog browsing: filtering, sorting and price bounds over the seed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use storefront::catalog::Product;
use storefront::flows::list_product;
use storefront::{CatalogQuery, Category, PriceRange, SortKey};

use crate::common::StorefrontHarness;

fn ids(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn test_seed_loads_five_products() {
    let harness = StorefrontHarness::seeded().await;
    let catalog = harness.storefront().catalog();

    assert!(!catalog.is_loading());
    assert_eq!(catalog.len(), 5);
    assert_eq!(harness.product("1").average_rating(), 4.5);
    assert_eq!(harness.product("2").average_rating(), 5.0);
}

#[tokio::test]
async fn test_unfiltered_query_returns_store_order() {
    let harness = StorefrontHarness::seeded().await;
    let catalog = harness.storefront().catalog();

    let all = catalog.filter("", None, Decimal::ZERO, Some(Decimal::MAX));
    assert_eq!(all, catalog.products());
    assert_eq!(ids(&all), vec!["1", "2", "3", "4", "5"]);
}

#[tokio::test]
async fn test_text_search_is_case_insensitive_over_name_and_description() {
    let harness = StorefrontHarness::seeded().await;
    let storefront = harness.storefront();

    let by_name = storefront.browse(&CatalogQuery::default().with_query("WIRELESS"));
    assert_eq!(ids(&by_name), vec!["1"]);

    // "gaming" only appears in the keyboard's description.
    let by_description = storefront.browse(&CatalogQuery::default().with_query("Gaming"));
    assert_eq!(ids(&by_description), vec!["3"]);

    let both = storefront.browse(&CatalogQuery::default().with_query("smart"));
    assert_eq!(ids(&both), vec!["2", "5"]);
}

#[tokio::test]
async fn test_category_and_price_filters_combine() {
    let harness = StorefrontHarness::seeded().await;
    let storefront = harness.storefront();

    let electronics =
        storefront.browse(&CatalogQuery::default().with_category(Some(Category::Electronics)));
    assert_eq!(ids(&electronics), vec!["1", "4"]);

    // Bounds are inclusive on both ends.
    let mid_priced = storefront
        .browse(&CatalogQuery::default().with_price(PriceRange::new(dec!(0.03), dec!(0.05))));
    assert_eq!(ids(&mid_priced), vec!["1", "2"]);

    let cheap_electronics = storefront.browse(
        &CatalogQuery::default()
            .with_category(Some(Category::Electronics))
            .with_price(PriceRange::new(Decimal::ZERO, dec!(0.05))),
    );
    assert_eq!(ids(&cheap_electronics), vec!["1"]);
}

#[tokio::test]
async fn test_sort_keys() {
    let harness = StorefrontHarness::seeded().await;
    let storefront = harness.storefront();
    let sorted = |key: SortKey| storefront.browse(&CatalogQuery::default().with_sort(key));

    assert_eq!(ids(&sorted(SortKey::PriceLow)), vec!["5", "3", "2", "1", "4"]);
    assert_eq!(ids(&sorted(SortKey::PriceHigh)), vec!["4", "1", "2", "3", "5"]);
    assert_eq!(ids(&sorted(SortKey::Newest)), vec!["1", "2", "3", "5", "4"]);
    // Ties on rating keep catalog order.
    assert_eq!(ids(&sorted(SortKey::Rating)), vec!["2", "4", "1", "3", "5"]);
}

#[tokio::test]
async fn test_price_ceiling_tracks_catalog() {
    let harness = StorefrontHarness::connected().await;
    let storefront = harness.storefront();

    let mut query = CatalogQuery::for_catalog(storefront.catalog());
    assert_eq!(query.price, Some(PriceRange::new(Decimal::ZERO, dec!(0.12))));

    list_product(
        storefront,
        &StorefrontHarness::listing_form("Arcade Cabinet", "0.2"),
    )
    .unwrap();
    query.refresh_ceiling(storefront.catalog());

    assert_eq!(query.price.map(|p| p.max), Some(dec!(0.30)));
    assert_eq!(storefront.browse(&query).len(), 6);
}

#[tokio::test]
async fn test_clear_keeps_upper_price_bound() {
    let harness = StorefrontHarness::seeded().await;
    let storefront = harness.storefront();

    let mut query = CatalogQuery::for_catalog(storefront.catalog())
        .with_query("watch")
        .with_category(Some(Category::Wearables))
        .with_sort(SortKey::PriceHigh);
    if let Some(price) = query.price.as_mut() {
        price.min = dec!(0.01);
    }

    query.clear();

    assert!(query.query.is_empty());
    assert_eq!(query.category, None);
    assert_eq!(query.sort, SortKey::Default);
    assert_eq!(query.price, Some(PriceRange::new(Decimal::ZERO, dec!(0.12))));
    assert_eq!(storefront.browse(&query).len(), 5);
}

#[tokio::test]
async fn test_featured_is_front_of_catalog() {
    let harness = StorefrontHarness::connected().await;
    let storefront = harness.storefront();
    assert_eq!(ids(&storefront.featured()), vec!["1", "2", "3", "4"]);

    let fresh = list_product(storefront, &StorefrontHarness::listing_form("Pinball", "0.1")).unwrap();
    let featured = storefront.featured();
    assert_eq!(featured.len(), 4);
    assert_eq!(featured[0], fresh);
}

#[tokio::test]
async fn test_empty_catalog_has_unit_price_range() {
    let harness = StorefrontHarness::new();
    let catalog = harness.storefront().catalog();

    assert!(catalog.is_loading());
    assert_eq!(PriceRange::for_catalog(catalog), PriceRange::new(Decimal::ZERO, Decimal::ONE));
    assert!(harness.storefront().browse(&CatalogQuery::default()).is_empty());
    assert!(harness.storefront().featured().is_empty());
}
