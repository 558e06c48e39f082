//! Filter/sort pipeline.
//!
//! Derives the displayed product list from the catalog. The derivation is
//! pure: re-run it whenever the query, category, price bounds, sort key or
//! the catalog itself changes.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogStore, Category, Product};
use crate::config::PRICE_CEILING_FACTOR;

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order (newest listing first).
    #[default]
    Default,
    PriceLow,
    PriceHigh,
    Rating,
    Newest,
}

impl SortKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Newest => "newest",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Default => Ordering::Equal,
            Self::PriceLow => a.price.cmp(&b.price),
            Self::PriceHigh => b.price.cmp(&a.price),
            Self::Rating => b.average_rating().total_cmp(&a.average_rating()),
            Self::Newest => b.created_at.cmp(&a.created_at),
        }
    }

    /// Sort in place. Equal keys keep their relative order.
    pub fn sort(self, products: &mut [Product]) {
        if self != Self::Default {
            products.sort_by(|a, b| self.compare(a, b));
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "" => Ok(Self::Default),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "rating" => Ok(Self::Rating),
            "newest" => Ok(Self::Newest),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Default bounds for the current catalog: zero up to 1.5 times the
    /// most expensive product, saturating at `Decimal::MAX`. An empty
    /// catalog gets `0..=1`.
    pub fn for_catalog(store: &CatalogStore) -> Self {
        let max = store
            .max_price()
            .map_or(Decimal::ONE, |price| {
                price
                    .checked_mul(PRICE_CEILING_FACTOR)
                    .unwrap_or(Decimal::MAX)
            });
        Self::new(Decimal::ZERO, max)
    }

    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(Decimal::ZERO, Decimal::ONE)
    }
}

/// Everything the product list view can filter and sort by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub category: Option<Category>,
    /// `None` means no price filtering at all.
    #[serde(default)]
    pub price: Option<PriceRange>,
    #[serde(default)]
    pub sort: SortKey,
}

impl CatalogQuery {
    /// A query over the whole catalog with the default price bounds.
    pub fn for_catalog(store: &CatalogStore) -> Self {
        Self {
            price: Some(PriceRange::for_catalog(store)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub const fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub const fn with_price(mut self, price: PriceRange) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Reset query, category, sort and the lower price bound.
    /// The upper bound is kept.
    pub fn clear(&mut self) {
        self.query.clear();
        self.category = None;
        self.sort = SortKey::Default;
        if let Some(price) = self.price.as_mut() {
            price.min = Decimal::ZERO;
        }
    }

    /// Refresh the upper price bound after the catalog changed.
    pub fn refresh_ceiling(&mut self, store: &CatalogStore) {
        let ceiling = PriceRange::for_catalog(store).max;
        match self.price.as_mut() {
            Some(price) => price.max = ceiling,
            None => self.price = Some(PriceRange::new(Decimal::ZERO, ceiling)),
        }
    }

    /// Run the pipeline against the catalog.
    pub fn apply(&self, store: &CatalogStore) -> Vec<Product> {
        let (min, max) = match self.price {
            Some(range) => (range.min, Some(range.max)),
            None => (Decimal::ZERO, None),
        };
        let mut products = store.filter(&self.query, self.category, min, max);
        self.sort.sort(&mut products);
        products
    }
}
