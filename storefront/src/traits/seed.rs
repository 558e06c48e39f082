//! Seed data source abstraction.

use anyhow::Result;
use async_trait::async_trait;

use crate::catalog::Product;

/// Supplies the initial product collection in a single fetch.
#[async_trait]
pub trait SeedSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>>;
}
