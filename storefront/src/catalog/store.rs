use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::model::{Category, Product, Review};
use crate::config::DEFAULT_SELLER_NAME;
use crate::error::{StoreError, StoreResult};
use crate::traits::{SeedSource, SystemTimeProvider, TimeProvider};

/// Validated input for a new listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub stock: u32,
    pub image: String,
    pub seller_address: String,
}

struct CatalogState {
    /// Newest first.
    products: Vec<Product>,
    loading: bool,
    /// Last id handed out by `add`, in milliseconds.
    last_id: i64,
}

/// In-memory product catalog shared by every view of the storefront.
///
/// Cloning is cheap and every clone sees the same collection. All mutations
/// are applied under a single write guard, so readers never observe a
/// product halfway through an update.
#[derive(Clone)]
pub struct CatalogStore {
    state: Arc<RwLock<CatalogState>>,
    time: Arc<dyn TimeProvider>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::with_time(Arc::new(SystemTimeProvider::new()))
    }

    pub fn with_time(time: Arc<dyn TimeProvider>) -> Self {
        Self {
            state: Arc::new(RwLock::new(CatalogState {
                products: Vec::new(),
                loading: true,
                last_id: 0,
            })),
            time,
        }
    }

    /// Populate the catalog from `source`.
    ///
    /// The loading flag stays set until the source resolves. A failing
    /// source is logged and leaves the collection as it was.
    pub async fn initialize(&self, source: &dyn SeedSource) {
        self.state.write().loading = true;

        match source.fetch_products().await {
            Ok(products) => {
                info!("Catalog seeded with {} products", products.len());
                let mut state = self.state.write();
                state.products = products;
                state.loading = false;
            }
            Err(e) => {
                error!("Error fetching products: {e:#}");
                self.state.write().loading = false;
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Snapshot of the whole collection, newest first.
    pub fn products(&self) -> Vec<Product> {
        self.state.read().products.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().products.is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Product> {
        self.state
            .read()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Insert a new listing at the front of the catalog.
    ///
    /// Ids are creation timestamps in milliseconds, bumped forward when two
    /// listings land in the same millisecond.
    pub fn add(&self, input: NewProduct) -> StoreResult<Product> {
        let created_at = self.time.now();
        let mut state = self.state.write();

        let mut id = created_at.timestamp_millis().max(state.last_id + 1);
        while state.products.iter().any(|p| p.id == id.to_string()) {
            id += 1;
        }
        state.last_id = id;

        let product = Product::builder()
            .id(id.to_string())
            .name(input.name)
            .description(input.description)
            .price(input.price)
            .category(input.category)
            .stock(input.stock)
            .image(input.image)
            .created_at(created_at)
            .seller(input.seller_address, Some(DEFAULT_SELLER_NAME))
            .build()?;

        state.products.insert(0, product.clone());
        info!(id = %product.id, name = %product.name, "Product listed");
        Ok(product)
    }

    /// Append a review and recompute the product's average rating.
    pub fn add_review(&self, product_id: &str, review: Review) -> StoreResult<Product> {
        let mut state = self.state.write();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| StoreError::NotFound(format!("product {product_id}")))?;

        product.push_review(review);
        debug!(
            id = %product.id,
            reviews = product.reviews().len(),
            average = product.average_rating(),
            "Review added"
        );
        Ok(product.clone())
    }

    /// Products matching every predicate, in catalog order.
    ///
    /// An empty `query` and a `None` category match everything; `max_price`
    /// of `None` is unbounded. Both price bounds are inclusive.
    pub fn filter(
        &self,
        query: &str,
        category: Option<Category>,
        min_price: Decimal,
        max_price: Option<Decimal>,
    ) -> Vec<Product> {
        self.state
            .read()
            .products
            .iter()
            .filter(|p| p.matches_query(query))
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter(|p| p.price >= min_price && max_price.map_or(true, |max| p.price <= max))
            .cloned()
            .collect()
    }

    /// Highest price in the catalog, if any.
    pub fn max_price(&self) -> Option<Decimal> {
        self.state.read().products.iter().map(|p| p.price).max()
    }

    /// Products listed by `address`.
    pub fn listings_by_seller(&self, address: &str) -> Vec<Product> {
        self.state
            .read()
            .products
            .iter()
            .filter(|p| p.is_sold_by(address))
            .cloned()
            .collect()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
